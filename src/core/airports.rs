use crate::core::ReferenceRepository;
use crate::domain::model::{AircraftCategory, AirportCode, RouteRecord};
use crate::utils::error::{FareError, Result};
use futures::future::try_join_all;
use std::collections::BTreeSet;

/// 所有航線表中出現過的機場代碼
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    codes: BTreeSet<AirportCode>,
}

impl AirportDirectory {
    /// 同時讀取三個機型的航線表並合併所有端點
    pub async fn load<R: ReferenceRepository + ?Sized>(repository: &R) -> Result<Self> {
        let partitions = try_join_all(
            AircraftCategory::ALL
                .iter()
                .map(|category| repository.routes(*category)),
        )
        .await?;

        let directory = Self::from_routes(partitions.iter().flatten());
        tracing::debug!("Loaded {} known airports", directory.len());
        Ok(directory)
    }

    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a RouteRecord>) -> Self {
        let codes = routes
            .into_iter()
            .flat_map(|route| [route.point_1.clone(), route.point_2.clone()])
            .filter(|code| !code.is_empty())
            .collect();
        Self { codes }
    }

    pub fn contains(&self, code: &AirportCode) -> bool {
        self.codes.contains(code)
    }

    /// 先檢查出發地，回報第一個不存在的機場
    pub fn ensure_known(&self, origin: &AirportCode, destination: &AirportCode) -> Result<()> {
        for code in [origin, destination] {
            if !self.contains(code) {
                return Err(FareError::AirportNotAvailableError { code: code.clone() });
            }
        }
        Ok(())
    }

    pub fn codes(&self) -> impl Iterator<Item = &AirportCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
