//! 聚合週期

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::granularity::Granularity;
use super::quarter::resolve_quarter;

/// 半開區間 `[start, end)`，以 `start` 為錨點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// 日期是否落在本週期內
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// 供圖表座標軸使用的標籤
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Daily | Granularity::Weekly => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => self.start.format("%Y-%m").to_string(),
            Granularity::Quarterly => resolve_quarter(self.start).to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.granularity, self.start, self.end)
    }
}
