//! 價格分析模組
//!
//! 週期聚合、期間變化、篩選、統計摘要、顯示格式與指標卡片報表。
//! 所有函數皆為純函數，不持有任何狀態。

pub mod aggregator;
pub mod delta;
pub mod filter;
pub mod summary;
pub mod format;
pub mod report;

pub use aggregator::{aggregate, PeriodAggregator};
pub use delta::{calculate_delta, delta_between};
pub use filter::{filter_buckets, filter_date_range, select_aggregated, select_commodities, QueryError, QueryResult};
pub use summary::{describe_aggregated, describe_series, CommoditySummary};
pub use format::{format_delta, format_with_commas, incomplete_note};
pub use report::{build_report, DashboardReport, MetricCard, ReportRequest};
