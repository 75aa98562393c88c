use crate::core::ReferenceRepository;
use crate::domain::model::{ServiceCategoryRecord, ServiceTier};
use crate::utils::error::{FareError, Result};

pub async fn resolve_service_tier<R: ReferenceRepository + ?Sized>(
    repository: &R,
    airline: &str,
) -> Result<ServiceTier> {
    let records = repository.service_categories().await?;
    classify(&records, airline)
}

/// 航空公司名稱完全比對 (不分大小寫)，重複時取第一列
pub fn classify(records: &[ServiceCategoryRecord], airline: &str) -> Result<ServiceTier> {
    let mut matches = records.iter().filter(|record| record.matches(airline));

    let record = matches.next().ok_or_else(|| FareError::AirlineNotFoundError {
        airline: airline.to_string(),
    })?;

    if matches.next().is_some() {
        tracing::warn!(
            "Airline '{}' appears more than once in the service category table, using the first row",
            airline
        );
    }

    let tier = record.tier()?;
    tracing::debug!("Airline '{}' classified as {}", record.airline, tier);
    Ok(tier)
}
