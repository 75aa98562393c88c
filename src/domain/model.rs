use crate::utils::error::{FareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 將標籤正規化: 去除空白、轉大寫、空白與連字號改為底線
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// 去除空白並轉大寫的機場代碼
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AirportCode(String);

impl AirportCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AirportCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// 機型類別，每種類別各有一張航線表
///
/// 宣告順序即為多筆結果的回報順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftCategory {
    Jet,
    SmallPropeller,
    BigPropeller,
}

impl AircraftCategory {
    pub const ALL: [AircraftCategory; 3] = [
        AircraftCategory::Jet,
        AircraftCategory::SmallPropeller,
        AircraftCategory::BigPropeller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftCategory::Jet => "JET",
            AircraftCategory::SmallPropeller => "SMALL_PROPELLER",
            AircraftCategory::BigPropeller => "BIG_PROPELLER",
        }
    }

    /// 除自身以外的所有機型，依回報順序
    pub fn others(self) -> impl Iterator<Item = AircraftCategory> {
        Self::ALL.into_iter().filter(move |category| *category != self)
    }
}

impl fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AircraftCategory {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "JET" => Ok(AircraftCategory::Jet),
            "SMALL_PROPELLER" => Ok(AircraftCategory::SmallPropeller),
            "BIG_PROPELLER" => Ok(AircraftCategory::BigPropeller),
            _ => Err(FareError::InvalidValueError {
                field: "aircraftType".to_string(),
                value: s.to_string(),
                reason: "Expected one of JET, SMALL_PROPELLER, BIG_PROPELLER, UNSPECIFIED"
                    .to_string(),
            }),
        }
    }
}

/// 請求的機型，旅客不確定時為未指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AircraftSelection {
    Specific(AircraftCategory),
    #[default]
    Unspecified,
}

impl AircraftSelection {
    /// 此選擇需要搜尋的機型
    pub fn categories(&self) -> Vec<AircraftCategory> {
        match self {
            AircraftSelection::Specific(category) => vec![*category],
            AircraftSelection::Unspecified => AircraftCategory::ALL.to_vec(),
        }
    }
}

impl FromStr for AircraftSelection {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self> {
        // 舊版表單送出的 "I DON'T KNOW" 也視為未指定
        match normalize_label(s).as_str() {
            "UNSPECIFIED" | "UNKNOWN" | "I_DON'T_KNOW" | "I_DONT_KNOW" => {
                Ok(AircraftSelection::Unspecified)
            }
            _ => s.parse().map(AircraftSelection::Specific),
        }
    }
}

impl fmt::Display for AircraftSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftSelection::Specific(category) => category.fmt(f),
            AircraftSelection::Unspecified => f.write_str("UNSPECIFIED"),
        }
    }
}

/// 航空公司服務等級，決定套用哪個價格區間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceTier {
    FullService,
    MediumService,
    NoFrills,
}

impl ServiceTier {
    pub const ALL: [ServiceTier; 3] = [
        ServiceTier::FullService,
        ServiceTier::MediumService,
        ServiceTier::NoFrills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::FullService => "FULL_SERVICE",
            ServiceTier::MediumService => "MEDIUM_SERVICE",
            ServiceTier::NoFrills => "NO_FRILLS",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceTier {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "FULL_SERVICE" => Ok(ServiceTier::FullService),
            "MEDIUM_SERVICE" => Ok(ServiceTier::MediumService),
            "NO_FRILLS" => Ok(ServiceTier::NoFrills),
            _ => Err(FareError::InvalidValueError {
                field: "category".to_string(),
                value: s.to_string(),
                reason: "Expected one of FULL_SERVICE, MEDIUM_SERVICE, NO_FRILLS".to_string(),
            }),
        }
    }
}

/// 單一航線單一等級的票價下限與上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBand {
    pub floor: u64,
    pub ceiling: u64,
}

impl PriceBand {
    pub fn new(floor: u64, ceiling: u64) -> Self {
        Self { floor, ceiling }
    }

    /// 上下限皆包含
    pub fn contains(&self, price: u64) -> bool {
        self.floor <= price && price <= self.ceiling
    }

    pub fn is_inverted(&self) -> bool {
        self.floor > self.ceiling
    }
}

/// 航線表的一列，兩端點不分方向
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub point_1: AirportCode,
    pub point_2: AirportCode,
    pub bands: HashMap<ServiceTier, PriceBand>,
}

impl RouteRecord {
    pub fn new(point_1: AirportCode, point_2: AirportCode) -> Self {
        Self {
            point_1,
            point_2,
            bands: HashMap::new(),
        }
    }

    pub fn with_band(mut self, tier: ServiceTier, floor: u64, ceiling: u64) -> Self {
        self.bands.insert(tier, PriceBand::new(floor, ceiling));
        self
    }

    pub fn connects(&self, a: &AirportCode, b: &AirportCode) -> bool {
        (&self.point_1 == a && &self.point_2 == b) || (&self.point_1 == b && &self.point_2 == a)
    }

    pub fn band(&self, tier: ServiceTier) -> Option<&PriceBand> {
        self.bands.get(&tier)
    }
}

/// 服務等級表的一列。等級保留原始字串，
/// 只有查詢到該航空公司時才會發現無法辨識的等級
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCategoryRecord {
    pub airline: String,
    pub category: String,
}

impl ServiceCategoryRecord {
    pub fn new(airline: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            airline: airline.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, airline: &str) -> bool {
        self.airline.trim().to_lowercase() == airline.trim().to_lowercase()
    }

    pub fn tier(&self) -> Result<ServiceTier> {
        self.category
            .parse()
            .map_err(|_| FareError::UnknownServiceTierError {
                airline: self.airline.clone(),
                label: self.category.clone(),
            })
    }
}

/// 儲存後端中四張參考表的檔名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub jet: String,
    pub small_propeller: String,
    pub big_propeller: String,
    pub service_category: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            jet: "jet.csv".to_string(),
            small_propeller: "small_propeller.csv".to_string(),
            big_propeller: "big_propeller.csv".to_string(),
            service_category: "service_category.csv".to_string(),
        }
    }
}

impl TableNames {
    pub fn route_table(&self, category: AircraftCategory) -> &str {
        match category {
            AircraftCategory::Jet => &self.jet,
            AircraftCategory::SmallPropeller => &self.small_propeller,
            AircraftCategory::BigPropeller => &self.big_propeller,
        }
    }
}

/// 驗證並正規化後的查價輸入
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCheckQuery {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub airline: String,
    pub aircraft: AircraftSelection,
    pub offered_price: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FareVerdict {
    pub category: AircraftCategory,
    pub band: PriceBand,
    pub offered_price: u64,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdicts {
    Single(FareVerdict),
    Multiple(Vec<FareVerdict>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceCheckResult {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub airline: String,
    pub service_tier: ServiceTier,
    pub offered_price: u64,
    pub verdicts: Verdicts,
}

/// 輸入表單中的航空公司選項
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineListing {
    pub airline: String,
    pub service_category: ServiceTier,
}
