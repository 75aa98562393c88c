// Adapters layer: concrete implementations of the ports (storage backends,
// CSV decoding of the reference tables, caching).

pub mod cache;
pub mod csv_repository;
pub mod http;
pub mod memory;
pub mod storage;

use crate::core::{ConfigProvider, Storage};

pub use cache::CachedRepository;
pub use csv_repository::CsvReferenceRepository;
pub use http::HttpStorage;
pub use memory::InMemoryRepository;
pub use storage::LocalStorage;

#[cfg(feature = "lambda")]
pub use storage::S3Storage;

/// 從 `storage` 讀取 CSV 參考表，外層加上設定 TTL 的快取
pub fn reference_repository<S: Storage, C: ConfigProvider + ?Sized>(
    storage: S,
    config: &C,
) -> CachedRepository<CsvReferenceRepository<S>> {
    CachedRepository::new(
        CsvReferenceRepository::new(storage, config.table_names().clone()),
        config.cache_ttl(),
    )
}
