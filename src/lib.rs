// 模組定義
pub mod analytics;
pub mod cache;
pub mod config;
pub mod data_ingestion;
pub mod domain_types;
pub mod utils;

// 常用類型
pub use analytics::{calculate_delta, PeriodAggregator};
pub use domain_types::{resolve_quarter, AggregatedSeries, Delta, Granularity, PriceSeries};
