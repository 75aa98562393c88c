use crate::domain::model::{AircraftCategory, AirportCode, ServiceTier};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data source error: {message}")]
    DataSourceError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} '{value}': {reason}")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} is required")]
    MissingFieldError { field: String },

    #[error("{code} is not available in our database, please select another airport.")]
    AirportNotAvailableError { code: AirportCode },

    #[error("Airline not found")]
    AirlineNotFoundError { airline: String },

    #[error("No direct route found between {origin} and {destination}.")]
    RouteNotFoundError {
        origin: AirportCode,
        destination: AirportCode,
    },

    #[error("The chosen route is not available for the {requested} aircraft type, please choose another aircraft type.")]
    RouteNotOnAircraftError {
        requested: AircraftCategory,
        available: Vec<AircraftCategory>,
    },

    #[error("No {tier} price band on {category} route {point_1}-{point_2}")]
    MissingPriceBandError {
        category: AircraftCategory,
        tier: ServiceTier,
        point_1: AirportCode,
        point_2: AirportCode,
    },

    #[error("Unrecognized service category '{label}' for airline {airline}")]
    UnknownServiceTierError { airline: String, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 輸入格式錯誤
    Validation,
    /// 查無資料 (機場、航空公司、航線)
    NotFound,
    /// 參考資料不完整
    DataIntegrity,
    /// 資料來源讀取失敗
    DataSource,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FareError::InvalidValueError { .. } | FareError::MissingFieldError { .. } => {
                ErrorCategory::Validation
            }
            FareError::AirportNotAvailableError { .. }
            | FareError::AirlineNotFoundError { .. }
            | FareError::RouteNotFoundError { .. }
            | FareError::RouteNotOnAircraftError { .. } => ErrorCategory::NotFound,
            FareError::MissingPriceBandError { .. } | FareError::UnknownServiceTierError { .. } => {
                ErrorCategory::DataIntegrity
            }
            FareError::IoError(_)
            | FareError::HttpError(_)
            | FareError::CsvError(_)
            | FareError::SerializationError(_)
            | FareError::DataSourceError { .. } => ErrorCategory::DataSource,
            FareError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::DataIntegrity => ErrorSeverity::High,
            ErrorCategory::DataSource => ErrorSeverity::Critical,
        }
    }

    /// 可以直接顯示給請求者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound | ErrorCategory::Configuration => {
                self.to_string()
            }
            ErrorCategory::DataIntegrity => {
                "Fare data for this route is incomplete, please contact support.".to_string()
            }
            ErrorCategory::DataSource => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FareError::InvalidValueError { field, .. } => {
                format!("Correct the value of '{}' and submit again", field)
            }
            FareError::MissingFieldError { field } => format!("Provide a value for '{}'", field),
            FareError::AirportNotAvailableError { .. } => {
                "Run the `airports` command to see the supported airports".to_string()
            }
            FareError::AirlineNotFoundError { .. } => {
                "Run the `airlines` command to see the classified airlines".to_string()
            }
            FareError::RouteNotFoundError { .. } => {
                "Check the origin and destination, the pair may not have a direct service"
                    .to_string()
            }
            FareError::RouteNotOnAircraftError { available, .. } => format!(
                "Retry with one of: {}",
                available
                    .iter()
                    .map(|category| category.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            FareError::MissingPriceBandError { .. } | FareError::UnknownServiceTierError { .. } => {
                "Fix the reference tables, the matched row is incomplete".to_string()
            }
            FareError::ConfigError { .. } => "Review the configuration file and flags".to_string(),
            FareError::IoError(_) => {
                "Check that the data directory exists and the table files are readable".to_string()
            }
            FareError::HttpError(_) | FareError::DataSourceError { .. } => {
                "Check that the reference data source is reachable".to_string()
            }
            FareError::CsvError(_) | FareError::SerializationError(_) => {
                "Check the reference table format and headers".to_string()
            }
        }
    }

    /// 請求的機型沒有此航線時，實際有此航線的機型
    pub fn available_aircraft_types(&self) -> Option<&[AircraftCategory]> {
        match self {
            FareError::RouteNotOnAircraftError { available, .. } => Some(available),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FareError>;
