use crate::adapters::memory::InMemoryRepository;
use crate::core::ReferenceRepository;
use crate::domain::model::{AircraftCategory, RouteRecord, ServiceCategoryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Snapshot {
    data: Arc<InMemoryRepository>,
    loaded_at: Instant,
}

/// 包在其他 repository 外層的讀取快取
///
/// 四張表一次載入，在 `ttl` 到期或呼叫 [`CachedRepository::invalidate`] 之前
/// 都使用同一份快照。`ttl` 為零時不快取，每次都讀取內層來源。
pub struct CachedRepository<R: ReferenceRepository> {
    inner: R,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<R: ReferenceRepository> CachedRepository<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub async fn invalidate(&self) {
        let mut snapshot = self.snapshot.write().await;
        if snapshot.take().is_some() {
            tracing::info!("Reference data cache invalidated");
        }
    }

    fn fresh(&self, snapshot: &Option<Snapshot>) -> Option<Arc<InMemoryRepository>> {
        snapshot
            .as_ref()
            .filter(|snapshot| snapshot.loaded_at.elapsed() < self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.data))
    }

    async fn current(&self) -> Result<Arc<InMemoryRepository>> {
        if let Some(data) = self.fresh(&*self.snapshot.read().await) {
            return Ok(data);
        }

        let mut snapshot = self.snapshot.write().await;
        // 等待寫鎖期間可能已被其他請求重新載入
        if let Some(data) = self.fresh(&snapshot) {
            return Ok(data);
        }

        let data = Arc::new(InMemoryRepository::load_from(&self.inner).await?);
        tracing::info!(
            "Reference data loaded: {} routes, cached for {:?}",
            data.route_count(),
            self.ttl
        );
        *snapshot = Some(Snapshot {
            data: Arc::clone(&data),
            loaded_at: Instant::now(),
        });
        Ok(data)
    }
}

#[async_trait]
impl<R: ReferenceRepository> ReferenceRepository for CachedRepository<R> {
    async fn routes(&self, category: AircraftCategory) -> Result<Vec<RouteRecord>> {
        if self.ttl.is_zero() {
            return self.inner.routes(category).await;
        }
        self.current().await?.routes(category).await
    }

    async fn service_categories(&self) -> Result<Vec<ServiceCategoryRecord>> {
        if self.ttl.is_zero() {
            return self.inner.service_categories().await;
        }
        self.current().await?.service_categories().await
    }
}
