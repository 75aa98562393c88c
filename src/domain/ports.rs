use crate::domain::model::{AircraftCategory, RouteRecord, ServiceCategoryRecord, TableNames};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// 存放參考表的唯讀位元組來源
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn table_names(&self) -> &TableNames;
    fn cache_ttl(&self) -> Duration;
}

/// 法規參考資料: 每個機型一張航線表，加上航空公司服務等級表
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn routes(&self, category: AircraftCategory) -> Result<Vec<RouteRecord>>;
    async fn service_categories(&self) -> Result<Vec<ServiceCategoryRecord>>;
}

#[async_trait]
impl<R: ReferenceRepository + ?Sized> ReferenceRepository for Arc<R> {
    async fn routes(&self, category: AircraftCategory) -> Result<Vec<RouteRecord>> {
        (**self).routes(category).await
    }

    async fn service_categories(&self) -> Result<Vec<ServiceCategoryRecord>> {
        (**self).service_categories().await
    }
}
