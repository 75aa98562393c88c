use crate::core::ReferenceRepository;
use crate::domain::model::{AircraftCategory, AircraftSelection, AirportCode, RouteRecord};
use crate::utils::error::{FareError, Result};
use futures::future::try_join_all;
use std::collections::BTreeMap;

/// 每個機型最多一條航線，依回報順序迭代
pub type RouteMatches = BTreeMap<AircraftCategory, RouteRecord>;

/// 第一條連接兩機場的航線 (不分方向)
pub fn match_route<'a>(
    routes: &'a [RouteRecord],
    origin: &AirportCode,
    destination: &AirportCode,
) -> Option<&'a RouteRecord> {
    routes
        .iter()
        .find(|route| route.connects(origin, destination))
}

async fn find_in_category<R: ReferenceRepository + ?Sized>(
    repository: &R,
    category: AircraftCategory,
    origin: &AirportCode,
    destination: &AirportCode,
) -> Result<Option<(AircraftCategory, RouteRecord)>> {
    let routes = repository.routes(category).await?;

    let hits = routes
        .iter()
        .filter(|route| route.connects(origin, destination))
        .count();
    if hits > 1 {
        tracing::warn!(
            "{} rows for {}-{} in the {} table, using the first",
            hits,
            origin,
            destination,
            category
        );
    }

    Ok(match_route(&routes, origin, destination).map(|route| (category, route.clone())))
}

/// 在指定機型的航線表中尋找航線 (不分方向)
pub async fn find_routes<R: ReferenceRepository + ?Sized>(
    repository: &R,
    origin: &AirportCode,
    destination: &AirportCode,
    categories: &[AircraftCategory],
) -> Result<RouteMatches> {
    let found = try_join_all(
        categories
            .iter()
            .map(|category| find_in_category(repository, *category, origin, destination)),
    )
    .await?;

    Ok(found.into_iter().flatten().collect())
}

/// 依機型選擇解析航線
///
/// 未指定機型時搜尋所有機型，全部找不到才失敗。指定機型找不到時，
/// 會再搜尋其他機型，以便在錯誤中列出實際有飛的機型。
pub async fn resolve_routes<R: ReferenceRepository + ?Sized>(
    repository: &R,
    origin: &AirportCode,
    destination: &AirportCode,
    selection: AircraftSelection,
) -> Result<RouteMatches> {
    let matches = find_routes(repository, origin, destination, &selection.categories()).await?;
    if !matches.is_empty() {
        return Ok(matches);
    }

    if let AircraftSelection::Specific(requested) = selection {
        let others: Vec<AircraftCategory> = requested.others().collect();
        let elsewhere = find_routes(repository, origin, destination, &others).await?;
        if !elsewhere.is_empty() {
            return Err(FareError::RouteNotOnAircraftError {
                requested,
                available: elsewhere.into_keys().collect(),
            });
        }
    }

    Err(FareError::RouteNotFoundError {
        origin: origin.clone(),
        destination: destination.clone(),
    })
}
