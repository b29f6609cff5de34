//! 聚合結果

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::granularity::Granularity;
use super::period::Period;

/// 單一週期的各商品平均價格，順序與 [`AggregatedSeries::commodities`] 一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBucket {
    pub period: Period,
    pub means: Vec<Option<f64>>,
    /// 參與計算的記錄數
    pub record_count: usize,
}

impl AggregatedBucket {
    /// 第 `idx` 個商品的平均；欄位不存在或為缺值時回傳 `None`
    pub fn mean(&self, idx: usize) -> Option<f64> {
        self.means.get(idx).copied().flatten()
    }
}

/// 依頻率聚合後的序列，週期依起始日遞增排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub commodities: Vec<String>,
    pub granularity: Granularity,
    pub buckets: Vec<AggregatedBucket>,
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 商品所在欄位索引
    pub fn commodity_index(&self, name: &str) -> Option<usize> {
        self.commodities.iter().position(|c| c == name)
    }

    /// 單一商品的平均價格欄位
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.commodity_index(name)?;
        Some(self.buckets.iter().map(|b| b.mean(idx)).collect())
    }

    /// 最後一個週期
    pub fn last_period(&self) -> Option<&Period> {
        self.buckets.last().map(|b| &b.period)
    }

    /// 最後一個週期在 `now` 時是否仍未結束；空序列回傳 `false`
    pub fn last_period_incomplete(&self, now: NaiveDateTime) -> bool {
        self.last_period()
            .is_some_and(|p| !self.granularity.is_complete(p, now))
    }
}

/// 最近兩個週期之間的變化
///
/// `(0, 0)` 代表歷史不足，而不是「沒有變化」。
/// 前一期為 0 時 `percent` 也定義為 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub absolute: f64,
    pub percent: f64,
}

impl Delta {
    /// 歷史不足時的哨兵值
    pub const INSUFFICIENT: Delta = Delta { absolute: 0.0, percent: 0.0 };

    pub fn new(absolute: f64, percent: f64) -> Self {
        Self { absolute, percent }
    }
}

impl From<Delta> for (f64, f64) {
    fn from(d: Delta) -> Self {
        (d.absolute, d.percent)
    }
}
