// HDB Resale Catalog - Core Library
// CSV loader + in-memory filtered lookups over resale transactions

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod search;

// Re-export commonly used types
pub use catalog::{print_search_results, write_search_results, Catalog, LoadReport};
pub use config::{CatalogConfig, DEFAULT_LOG_PATH};
pub use error::RecordError;
pub use record::{describe_row, parse_row, ResaleRecord, ResaleRow};
pub use search::{SearchQuery, Selection, SEARCH_LIMIT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
