pub mod quarter;
pub mod granularity;
pub mod period;
pub mod price_series;
pub mod bucket;

pub use quarter::{resolve_quarter, FiscalQuarter};
pub use granularity::{is_period_complete, Granularity, ParseGranularityError};
pub use period::Period;
pub use price_series::{PriceRecord, PriceSeries, SeriesError, SeriesResult};
pub use bucket::{AggregatedBucket, AggregatedSeries, Delta};
