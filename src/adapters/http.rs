use crate::core::Storage;
use crate::utils::error::{FareError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 透過 HTTP 提供的參考表，每張表一次 GET
#[derive(Debug, Clone)]
pub struct HttpStorage {
    client: Client,
    base_url: Url,
}

impl HttpStorage {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| FareError::InvalidValueError {
            field: "data.url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        // 確保以 "/" 結尾，join 時才不會覆蓋最後一段路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Storage for HttpStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FareError::DataSourceError {
                message: format!("Cannot build URL for {}: {}", path, e),
            })?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(FareError::DataSourceError {
                message: format!("GET {} returned {}", url, response.status()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
