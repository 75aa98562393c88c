pub mod airports;
pub mod checker;
pub mod classifier;
pub mod composer;
pub mod fare_validator;
pub mod route_matcher;

pub use crate::domain::model::{PriceCheckQuery, PriceCheckResult, RouteRecord};
pub use crate::domain::ports::{ConfigProvider, ReferenceRepository, Storage};
pub use crate::utils::error::Result;
