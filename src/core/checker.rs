use crate::core::airports::AirportDirectory;
use crate::core::{classifier, composer, route_matcher, ReferenceRepository};
use crate::domain::contract::{CheckPriceRequest, CheckPriceResponse};
use crate::domain::model::{AirlineListing, AirportCode, PriceCheckQuery, PriceCheckResult};
use crate::utils::error::{ErrorSeverity, FareError, Result};

pub struct FareChecker<R: ReferenceRepository> {
    repository: R,
}

impl<R: ReferenceRepository> FareChecker<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// 查價流程: 機場 → 航空公司等級 → 航線 → 價格區間
    pub async fn check(&self, query: &PriceCheckQuery) -> Result<PriceCheckResult> {
        tracing::info!(
            "Checking {} {}-{} ({}) at {}",
            query.airline,
            query.origin,
            query.destination,
            query.aircraft,
            query.offered_price
        );

        let directory = AirportDirectory::load(&self.repository).await?;
        directory.ensure_known(&query.origin, &query.destination)?;

        let tier = classifier::resolve_service_tier(&self.repository, &query.airline).await?;

        let matches = route_matcher::resolve_routes(
            &self.repository,
            &query.origin,
            &query.destination,
            query.aircraft,
        )
        .await?;
        tracing::debug!("Matched {} aircraft categories", matches.len());

        composer::compose(query, tier, &matches)
    }

    /// 處理原始請求，所有錯誤都轉為狀態碼與錯誤內容，不會回傳 Err
    pub async fn handle(&self, request: CheckPriceRequest) -> CheckPriceResponse {
        let outcome = match request.into_query() {
            Ok(query) => self.check(&query).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => CheckPriceResponse::from(result),
            Err(e) => {
                log_failure(&e);
                CheckPriceResponse::from(&e)
            }
        }
    }

    /// 排序後的機場代碼，供出發地與目的地選單使用
    pub async fn list_airports(&self) -> Result<Vec<AirportCode>> {
        let directory = AirportDirectory::load(&self.repository).await?;
        Ok(directory.codes().cloned().collect())
    }

    /// 依名稱排序的航空公司與服務等級，無法辨識等級的列會略過
    pub async fn list_airlines(&self) -> Result<Vec<AirlineListing>> {
        let records = self.repository.service_categories().await?;

        let mut listings: Vec<AirlineListing> = records
            .iter()
            .filter_map(|record| match record.tier() {
                Ok(tier) => Some(AirlineListing {
                    airline: record.airline.trim().to_string(),
                    service_category: tier,
                }),
                Err(e) => {
                    tracing::warn!("Skipping airline row: {}", e);
                    None
                }
            })
            .collect();

        listings.sort_by_key(|listing| listing.airline.to_lowercase());
        listings.dedup_by(|a, b| a.airline.eq_ignore_ascii_case(&b.airline));
        Ok(listings)
    }
}

fn log_failure(error: &FareError) {
    match error.severity() {
        ErrorSeverity::Low => tracing::info!(
            "Price check rejected: {} (Category: {:?})",
            error,
            error.category()
        ),
        ErrorSeverity::Medium | ErrorSeverity::High | ErrorSeverity::Critical => {
            tracing::error!(
                "❌ Price check failed: {} (Category: {:?}, Severity: {:?})",
                error,
                error.category(),
                error.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
        }
    }
}
