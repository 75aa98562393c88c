//! 查價端點的請求與回應格式

use crate::domain::model::{
    AircraftCategory, AircraftSelection, AirportCode, FareVerdict, PriceCheckQuery,
    PriceCheckResult, ServiceTier, Verdicts,
};
use crate::utils::error::{ErrorCategory, FareError, Result};
use crate::utils::validation::{validate_digits, validate_non_empty_string, validate_range, validate_required_field};
use serde::{Deserialize, Serialize};

pub const MAX_PRICE_DIGITS: usize = 8;
pub const MAX_OFFERED_PRICE: u64 = 99_999_999;

/// 表單送出的原始請求，欄位皆為 Option，缺少時可指名回報而非解碼失敗
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPriceRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub airline: Option<String>,
    pub aircraft_type: Option<String>,
    pub offered_price: Option<serde_json::Value>,
}

impl CheckPriceRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| FareError::InvalidValueError {
            field: "body".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })
    }

    pub fn from_value(body: serde_json::Value) -> Result<Self> {
        serde_json::from_value(body).map_err(|e| FareError::InvalidValueError {
            field: "body".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })
    }

    /// 驗證所有欄位並產生正規化後的查詢
    pub fn into_query(self) -> Result<PriceCheckQuery> {
        let origin = validate_required_field("origin", &self.origin)?;
        validate_non_empty_string("origin", origin)?;
        let destination = validate_required_field("destination", &self.destination)?;
        validate_non_empty_string("destination", destination)?;
        let airline = validate_required_field("airline", &self.airline)?;
        validate_non_empty_string("airline", airline)?;

        let aircraft = match self.aircraft_type.as_deref() {
            Some(label) => label.parse::<AircraftSelection>()?,
            None => AircraftSelection::Unspecified,
        };

        let price = validate_required_field("offeredPrice", &self.offered_price)?;
        let offered_price = parse_offered_price(price)?;

        Ok(PriceCheckQuery {
            origin: AirportCode::new(origin),
            destination: AirportCode::new(destination),
            airline: airline.trim().to_string(),
            aircraft,
            offered_price,
        })
    }
}

/// 價格可為 JSON 整數或 1 到 8 位數的數字字串
fn parse_offered_price(value: &serde_json::Value) -> Result<u64> {
    let price = match value {
        serde_json::Value::Number(number) => {
            number.as_u64().ok_or_else(|| FareError::InvalidValueError {
                field: "offeredPrice".to_string(),
                value: number.to_string(),
                reason: format!(
                    "Must be a number with maximum {} digits",
                    MAX_PRICE_DIGITS
                ),
            })?
        }
        serde_json::Value::String(text) => validate_digits("offeredPrice", text, MAX_PRICE_DIGITS)?,
        other => {
            return Err(FareError::InvalidValueError {
                field: "offeredPrice".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Must be a number with maximum {} digits",
                    MAX_PRICE_DIGITS
                ),
            })
        }
    };

    validate_range("offeredPrice", price, 1, MAX_OFFERED_PRICE)?;
    Ok(price)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl ResponseStatus {
    pub fn code(&self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::InternalServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglePriceBody {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub airline: String,
    pub aircraft_type: AircraftCategory,
    pub service_category: ServiceTier,
    pub offered_price: u64,
    pub ceiling_price: u64,
    pub floor_price: u64,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOption {
    pub aircraft_type: AircraftCategory,
    pub ceiling_price: u64,
    pub floor_price: u64,
    pub is_valid: bool,
}

impl From<&FareVerdict> for PriceOption {
    fn from(verdict: &FareVerdict) -> Self {
        Self {
            aircraft_type: verdict.category,
            ceiling_price: verdict.band.ceiling,
            floor_price: verdict.band.floor,
            is_valid: verdict.is_valid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplePriceBody {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub airline: String,
    pub service_category: ServiceTier,
    pub offered_price: u64,
    pub multiple_options: Vec<PriceOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_aircraft_types: Option<Vec<AircraftCategory>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Single(SinglePriceBody),
    Multiple(MultiplePriceBody),
    Error(ErrorBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckPriceResponse {
    pub status: ResponseStatus,
    pub body: ResponseBody,
}

impl From<PriceCheckResult> for CheckPriceResponse {
    fn from(result: PriceCheckResult) -> Self {
        let body = match result.verdicts {
            Verdicts::Single(verdict) => ResponseBody::Single(SinglePriceBody {
                origin: result.origin,
                destination: result.destination,
                airline: result.airline,
                aircraft_type: verdict.category,
                service_category: result.service_tier,
                offered_price: result.offered_price,
                ceiling_price: verdict.band.ceiling,
                floor_price: verdict.band.floor,
                is_valid: verdict.is_valid,
            }),
            Verdicts::Multiple(verdicts) => ResponseBody::Multiple(MultiplePriceBody {
                origin: result.origin,
                destination: result.destination,
                airline: result.airline,
                service_category: result.service_tier,
                offered_price: result.offered_price,
                multiple_options: verdicts.iter().map(PriceOption::from).collect(),
            }),
        };

        Self {
            status: ResponseStatus::Ok,
            body,
        }
    }
}

impl From<&FareError> for CheckPriceResponse {
    fn from(error: &FareError) -> Self {
        let status = match error.category() {
            ErrorCategory::Validation => ResponseStatus::BadRequest,
            ErrorCategory::NotFound => ResponseStatus::NotFound,
            ErrorCategory::DataIntegrity
            | ErrorCategory::DataSource
            | ErrorCategory::Configuration => ResponseStatus::InternalServerError,
        };

        // 設定錯誤屬於內部問題，不外流細節
        let message = match error.category() {
            ErrorCategory::Configuration => "Internal server error".to_string(),
            _ => error.user_friendly_message(),
        };

        Self {
            status,
            body: ResponseBody::Error(ErrorBody {
                error: message,
                available_aircraft_types: error.available_aircraft_types().map(<[_]>::to_vec),
            }),
        }
    }
}
