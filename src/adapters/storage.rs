use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;

/// 本機目錄中的參考表
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(&full_path).await?;
        Ok(data)
    }
}

/// S3 bucket 中指定前綴下的參考表
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key_for(&self, path: &str) -> String {
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", prefix, path)
        }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let key = self.key_for(path);
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| crate::utils::error::FareError::DataSourceError {
                message: format!("Failed to read s3://{}/{}: {}", self.bucket, key, e),
            })?;

        let data =
            resp.body
                .collect()
                .await
                .map_err(|e| crate::utils::error::FareError::DataSourceError {
                    message: format!("Failed to collect S3 data: {}", e),
                })?;

        Ok(data.into_bytes().to_vec())
    }
}
