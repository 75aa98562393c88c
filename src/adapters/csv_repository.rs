use crate::core::{ReferenceRepository, Storage};
use crate::domain::model::{
    AircraftCategory, AirportCode, PriceBand, RouteRecord, ServiceCategoryRecord, ServiceTier,
    TableNames,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// 航線表的一列，多餘欄位 (`id`、`number`) 忽略，空白儲存格解為 `None`
#[derive(Debug, Deserialize)]
struct RouteRow {
    #[serde(default)]
    point_1: Option<String>,
    #[serde(default)]
    point_2: Option<String>,
    #[serde(default)]
    ceiling_price_full_service: Option<u64>,
    #[serde(default)]
    floor_price_full_service: Option<u64>,
    #[serde(default)]
    ceiling_price_medium_service: Option<u64>,
    #[serde(default)]
    floor_price_medium_service: Option<u64>,
    #[serde(default)]
    ceiling_price_no_frills: Option<u64>,
    #[serde(default)]
    floor_price_no_frills: Option<u64>,
}

impl RouteRow {
    fn into_record(self, category: AircraftCategory, line: usize) -> Option<RouteRecord> {
        let point_1 = AirportCode::new(self.point_1.as_deref().unwrap_or_default());
        let point_2 = AirportCode::new(self.point_2.as_deref().unwrap_or_default());
        if point_1.is_empty() || point_2.is_empty() {
            tracing::warn!(
                "Skipping {} row {}: missing endpoint",
                category,
                line
            );
            return None;
        }

        let mut record = RouteRecord::new(point_1, point_2);
        let bands = [
            (
                ServiceTier::FullService,
                self.floor_price_full_service,
                self.ceiling_price_full_service,
            ),
            (
                ServiceTier::MediumService,
                self.floor_price_medium_service,
                self.ceiling_price_medium_service,
            ),
            (
                ServiceTier::NoFrills,
                self.floor_price_no_frills,
                self.ceiling_price_no_frills,
            ),
        ];

        for (tier, floor, ceiling) in bands {
            // 上下限缺一即視為沒有此等級的價格區間
            if let (Some(floor), Some(ceiling)) = (floor, ceiling) {
                let band = PriceBand::new(floor, ceiling);
                if band.is_inverted() {
                    tracing::warn!(
                        "{} row {} ({}-{}): {} floor {} is above ceiling {}",
                        category,
                        line,
                        record.point_1,
                        record.point_2,
                        tier,
                        floor,
                        ceiling
                    );
                }
                record.bands.insert(tier, band);
            }
        }

        Some(record)
    }
}

#[derive(Debug, Deserialize)]
struct ServiceCategoryRow {
    #[serde(default, alias = "airline")]
    airlines: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// 從任一儲存後端讀取 CSV 格式的參考表
pub struct CsvReferenceRepository<S: Storage> {
    storage: S,
    tables: TableNames,
}

impl<S: Storage> CsvReferenceRepository<S> {
    pub fn new(storage: S, tables: TableNames) -> Self {
        Self { storage, tables }
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    async fn read_table<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        tracing::debug!("Reading reference table {}", file);
        let data = self.storage.read_file(file).await?;
        parse_rows(&data)
    }
}

fn parse_rows<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[async_trait]
impl<S: Storage> ReferenceRepository for CsvReferenceRepository<S> {
    async fn routes(&self, category: AircraftCategory) -> Result<Vec<RouteRecord>> {
        let rows: Vec<RouteRow> = self.read_table(self.tables.route_table(category)).await?;

        // 第 1 行為標題列
        Ok(rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| row.into_record(category, index + 2))
            .collect())
    }

    async fn service_categories(&self) -> Result<Vec<ServiceCategoryRecord>> {
        let rows: Vec<ServiceCategoryRow> =
            self.read_table(&self.tables.service_category).await?;

        // 等級空白的列仍保留，查詢時才回報為資料不完整
        Ok(rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match row.airlines {
                Some(airline) if !airline.trim().is_empty() => Some(ServiceCategoryRecord::new(
                    airline,
                    row.category.unwrap_or_default(),
                )),
                _ => {
                    tracing::warn!("Skipping service category row {}: missing airline", index + 2);
                    None
                }
            })
            .collect())
    }
}
