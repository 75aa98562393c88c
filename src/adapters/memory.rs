use crate::core::ReferenceRepository;
use crate::domain::model::{AircraftCategory, RouteRecord, ServiceCategoryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// 記憶體中的參考資料，作為快取快照，也是測試用的資料來源
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    routes: HashMap<AircraftCategory, Vec<RouteRecord>>,
    service_categories: Vec<ServiceCategoryRecord>,
    #[cfg(test)]
    failing: Option<AircraftCategory>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 一次讀取來源的四張表
    pub async fn load_from<R: ReferenceRepository + ?Sized>(source: &R) -> Result<Self> {
        let (jet, small_propeller, big_propeller, service_categories) = tokio::try_join!(
            source.routes(AircraftCategory::Jet),
            source.routes(AircraftCategory::SmallPropeller),
            source.routes(AircraftCategory::BigPropeller),
            source.service_categories(),
        )?;

        let mut routes = HashMap::new();
        routes.insert(AircraftCategory::Jet, jet);
        routes.insert(AircraftCategory::SmallPropeller, small_propeller);
        routes.insert(AircraftCategory::BigPropeller, big_propeller);

        Ok(Self {
            routes,
            service_categories,
            ..Self::default()
        })
    }

    pub fn with_route(mut self, category: AircraftCategory, route: RouteRecord) -> Self {
        self.routes.entry(category).or_default().push(route);
        self
    }

    pub fn with_airline(mut self, airline: &str, category: &str) -> Self {
        self.service_categories
            .push(ServiceCategoryRecord::new(airline, category));
        self
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub(crate) fn failing_on(mut self, category: AircraftCategory) -> Self {
        self.failing = Some(category);
        self
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryRepository {
    async fn routes(&self, category: AircraftCategory) -> Result<Vec<RouteRecord>> {
        #[cfg(test)]
        if self.failing == Some(category) {
            return Err(crate::utils::error::FareError::DataSourceError {
                message: format!("{} table unavailable", category),
            });
        }

        Ok(self.routes.get(&category).cloned().unwrap_or_default())
    }

    async fn service_categories(&self) -> Result<Vec<ServiceCategoryRecord>> {
        Ok(self.service_categories.clone())
    }
}
