pub mod series_cache;
pub mod stats;

// Re-export commonly used types
pub use series_cache::{SeriesCache, DEFAULT_MAX_AGGREGATIONS};
pub use stats::CacheStats;
