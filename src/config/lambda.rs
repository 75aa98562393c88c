use crate::core::ConfigProvider;
use crate::domain::model::TableNames;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::env;
use std::time::Duration;

/// 預設快取五分鐘，溫啟動的 Lambda 不必每次重讀 S3
pub const DEFAULT_LAMBDA_CACHE_TTL_SECONDS: u64 = 300;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub cache_ttl_seconds: u64,
    pub tables: TableNames,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("FARE_S3_BUCKET").map_err(|_| FareError::ConfigError {
                message: "FARE_S3_BUCKET environment variable is required".to_string(),
            })?,
            s3_prefix: env::var("FARE_S3_PREFIX").unwrap_or_else(|_| "reference".to_string()),
            s3_region: env::var("FARE_S3_REGION").unwrap_or_else(|_| "ap-southeast-3".to_string()),
            cache_ttl_seconds: match env::var("FARE_CACHE_TTL_SECONDS") {
                Ok(raw) => raw.parse().map_err(|_| FareError::InvalidValueError {
                    field: "FARE_CACHE_TTL_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: "Must be a whole number of seconds".to_string(),
                })?,
                Err(_) => DEFAULT_LAMBDA_CACHE_TTL_SECONDS,
            },
            tables: TableNames::default(),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn table_names(&self) -> &TableNames {
        &self.tables
    }

    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        // 驗證S3 bucket名稱
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;

        // 驗證區域
        validate_aws_region("s3_region", &self.s3_region)?;

        validate_range("cache_ttl_seconds", self.cache_ttl_seconds, 0, 86_400)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(FareError::InvalidValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(FareError::InvalidValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(FareError::InvalidValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(FareError::InvalidValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}
