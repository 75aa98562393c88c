pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use adapters::S3Storage;
#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use crate::core::checker::FareChecker;
pub use adapters::{
    reference_repository, CachedRepository, CsvReferenceRepository, HttpStorage,
    InMemoryRepository, LocalStorage,
};
pub use config::TomlConfig;
pub use domain::contract::{CheckPriceRequest, CheckPriceResponse, ResponseBody, ResponseStatus};
pub use domain::model::{
    AircraftCategory, AircraftSelection, AirportCode, PriceCheckQuery, PriceCheckResult,
    RouteRecord, ServiceCategoryRecord, ServiceTier,
};
pub use utils::error::{FareError, Result};
