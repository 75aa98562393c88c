use crate::core::ConfigProvider;
use crate::domain::model::TableNames;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "./data";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub tables: TableNames,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Local,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSourceKind,
    pub path: Option<String>,
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FareError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FareError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FARE_DATA_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FareError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        match self.data.source {
            DataSourceKind::Local => validate_path("data.path", self.data_path())?,
            DataSourceKind::Http => {
                let url = validate_required_field("data.url", &self.data.url)?;
                validate_url("data.url", url)?;
            }
        }

        if let Some(timeout) = self.data.timeout_seconds {
            validate_range("data.timeout_seconds", timeout, 1, 300)?;
        }

        validate_non_empty_string("tables.jet", &self.tables.jet)?;
        validate_non_empty_string("tables.small_propeller", &self.tables.small_propeller)?;
        validate_non_empty_string("tables.big_propeller", &self.tables.big_propeller)?;
        validate_non_empty_string("tables.service_category", &self.tables.service_category)?;

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_lowercase().as_str()) {
                return Err(FareError::InvalidValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    /// 本地資料目錄
    pub fn data_path(&self) -> &str {
        self.data.path.as_deref().unwrap_or(DEFAULT_DATA_PATH)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.data.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// 預設不快取，每次查詢都重新讀取參考資料
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_seconds.unwrap_or(0))
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn table_names(&self) -> &TableNames {
        &self.tables
    }

    fn cache_ttl(&self) -> Duration {
        self.cache_ttl()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[data]
source = "http"
url = "https://reference.example.com/tables"
timeout_seconds = 5

[tables]
jet = "JET.csv"

[cache]
ttl_seconds = 300

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.source, DataSourceKind::Http);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.tables.jet, "JET.csv");
        assert_eq!(config.tables.small_propeller, "small_propeller.csv");
        assert_eq!(ConfigProvider::cache_ttl(&config), Duration::from_secs(300));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data.source, DataSourceKind::Local);
        assert_eq!(config.data_path(), DEFAULT_DATA_PATH);
        assert_eq!(config.cache_ttl(), Duration::ZERO);
        assert_eq!(config.tables, TableNames::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FARE_TEST_DATA_URL", "https://test.reference.com");

        let toml_content = r#"
[data]
source = "http"
url = "${FARE_TEST_DATA_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.url.as_deref(), Some("https://test.reference.com"));

        std::env::remove_var("FARE_TEST_DATA_URL");
    }

    #[test]
    fn test_http_source_requires_url() {
        let config = TomlConfig::from_toml_str("[data]\nsource = \"http\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(FareError::MissingFieldError { .. })
        ));

        let config =
            TomlConfig::from_toml_str("[data]\nsource = \"http\"\nurl = \"invalid-url\"\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = TomlConfig::from_toml_str("[data]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());

        assert!(TomlConfig::from_toml_str("[data]\nsource = \"ftp\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\npath = \"/srv/fare-data\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_path(), "/srv/fare-data");
    }
}
