use crate::core::fare_validator;
use crate::core::route_matcher::RouteMatches;
use crate::domain::model::{
    AircraftSelection, PriceCheckQuery, PriceCheckResult, ServiceTier, Verdicts,
};
use crate::utils::error::{FareError, Result};

/// 將比對到的航線組成單一結果或依機型列出的多筆結果
pub fn compose(
    query: &PriceCheckQuery,
    tier: ServiceTier,
    matches: &RouteMatches,
) -> Result<PriceCheckResult> {
    if matches.is_empty() {
        return Err(FareError::RouteNotFoundError {
            origin: query.origin.clone(),
            destination: query.destination.clone(),
        });
    }

    let verdicts = match query.aircraft {
        AircraftSelection::Specific(category) => {
            let route = matches
                .get(&category)
                .ok_or_else(|| FareError::RouteNotOnAircraftError {
                    requested: category,
                    available: matches.keys().copied().collect(),
                })?;
            Verdicts::Single(fare_validator::validate(
                category,
                route,
                tier,
                query.offered_price,
            )?)
        }
        AircraftSelection::Unspecified => Verdicts::Multiple(
            matches
                .iter()
                .map(|(category, route)| {
                    fare_validator::validate(*category, route, tier, query.offered_price)
                })
                .collect::<Result<Vec<_>>>()?,
        ),
    };

    Ok(PriceCheckResult {
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        airline: query.airline.clone(),
        service_tier: tier,
        offered_price: query.offered_price,
        verdicts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AircraftCategory, RouteRecord};

    fn query(aircraft: AircraftSelection, offered_price: u64) -> PriceCheckQuery {
        PriceCheckQuery {
            origin: "CGK".into(),
            destination: "DPS".into(),
            airline: "Garuda Indonesia".to_string(),
            aircraft,
            offered_price,
        }
    }

    fn matches() -> RouteMatches {
        let mut matches = RouteMatches::new();
        matches.insert(
            AircraftCategory::BigPropeller,
            RouteRecord::new("DPS".into(), "CGK".into())
                .with_band(ServiceTier::FullService, 700_000, 1_100_000),
        );
        matches.insert(
            AircraftCategory::Jet,
            RouteRecord::new("CGK".into(), "DPS".into())
                .with_band(ServiceTier::FullService, 900_000, 1_500_000),
        );
        matches
    }

    #[test]
    fn test_specific_category_gives_single_verdict() {
        let result = compose(
            &query(AircraftSelection::Specific(AircraftCategory::Jet), 1_200_000),
            ServiceTier::FullService,
            &matches(),
        )
        .unwrap();

        match result.verdicts {
            Verdicts::Single(verdict) => {
                assert_eq!(verdict.category, AircraftCategory::Jet);
                assert!(verdict.is_valid);
            }
            other => panic!("unexpected verdicts: {other:?}"),
        }
    }

    #[test]
    fn test_unspecified_validates_each_option_independently() {
        let result = compose(
            &query(AircraftSelection::Unspecified, 1_200_000),
            ServiceTier::FullService,
            &matches(),
        )
        .unwrap();

        let Verdicts::Multiple(verdicts) = result.verdicts else {
            panic!("expected multiple verdicts");
        };
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].category, AircraftCategory::Jet);
        assert!(verdicts[0].is_valid);
        assert_eq!(verdicts[1].category, AircraftCategory::BigPropeller);
        assert!(!verdicts[1].is_valid);
    }

    #[test]
    fn test_identical_bands_are_not_merged() {
        let mut matches = RouteMatches::new();
        for category in [AircraftCategory::Jet, AircraftCategory::SmallPropeller] {
            matches.insert(
                category,
                RouteRecord::new("CGK".into(), "DPS".into())
                    .with_band(ServiceTier::NoFrills, 100, 200),
            );
        }

        let result = compose(
            &query(AircraftSelection::Unspecified, 150),
            ServiceTier::NoFrills,
            &matches,
        )
        .unwrap();
        assert!(matches!(result.verdicts, Verdicts::Multiple(ref v) if v.len() == 2));
    }

    #[test]
    fn test_empty_matches_are_not_found() {
        let err = compose(
            &query(AircraftSelection::Unspecified, 1),
            ServiceTier::FullService,
            &RouteMatches::new(),
        )
        .unwrap_err();
        assert!(matches!(err, FareError::RouteNotFoundError { .. }));
    }

    #[test]
    fn test_missing_band_in_any_option_fails_the_request() {
        let err = compose(
            &query(AircraftSelection::Unspecified, 1_000_000),
            ServiceTier::NoFrills,
            &matches(),
        )
        .unwrap_err();
        assert!(matches!(err, FareError::MissingPriceBandError { .. }));
    }
}
