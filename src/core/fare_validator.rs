use crate::domain::model::{AircraftCategory, FareVerdict, RouteRecord, ServiceTier};
use crate::utils::error::{FareError, Result};

/// 以航線上該等級的價格區間檢查報價
///
/// 航線缺少該等級的區間屬於資料問題，不視為價格不合法
pub fn validate(
    category: AircraftCategory,
    route: &RouteRecord,
    tier: ServiceTier,
    offered_price: u64,
) -> Result<FareVerdict> {
    let band = route
        .band(tier)
        .copied()
        .ok_or_else(|| FareError::MissingPriceBandError {
            category,
            tier,
            point_1: route.point_1.clone(),
            point_2: route.point_2.clone(),
        })?;

    Ok(FareVerdict {
        category,
        band,
        offered_price,
        is_valid: band.contains(offered_price),
    })
}
