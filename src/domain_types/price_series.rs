//! 商品價格時間序列

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 價格序列建構錯誤
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("商品名稱重複: {0}")]
    DuplicateCommodity(String),

    #[error("記錄欄位數不符: 日期 {date} 有 {actual} 個價格，預期 {expected} 個")]
    WidthMismatch {
        date: NaiveDate,
        expected: usize,
        actual: usize,
    },

    #[error("時間戳未嚴格遞增: {previous} 之後出現 {current}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("時間戳重複: {0}")]
    DuplicateTimestamp(NaiveDate),

    #[error("價格為負值: {commodity} 於 {date} = {value}")]
    NegativePrice {
        commodity: String,
        date: NaiveDate,
        value: f64,
    },
}

/// 價格序列結果類型
pub type SeriesResult<T> = Result<T, SeriesError>;

/// 單一日期的所有商品價格，順序與 [`PriceSeries::commodities`] 一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub prices: Vec<Option<f64>>,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, prices: Vec<Option<f64>>) -> Self {
        Self { date, prices }
    }
}

/// 不可變的商品價格序列
///
/// 建構時保證：
/// - 時間戳嚴格遞增
/// - 每筆記錄的價格數與商品數相同
/// - 價格非負；NaN 視為缺值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    commodities: Vec<String>,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// 建立並驗證價格序列
    pub fn new(commodities: Vec<String>, mut records: Vec<PriceRecord>) -> SeriesResult<Self> {
        let mut seen = HashSet::with_capacity(commodities.len());
        for name in &commodities {
            if !seen.insert(name.as_str()) {
                return Err(SeriesError::DuplicateCommodity(name.clone()));
            }
        }

        for record in records.iter_mut() {
            if record.prices.len() != commodities.len() {
                return Err(SeriesError::WidthMismatch {
                    date: record.date,
                    expected: commodities.len(),
                    actual: record.prices.len(),
                });
            }

            for (name, price) in commodities.iter().zip(record.prices.iter_mut()) {
                match *price {
                    Some(value) if value.is_nan() => *price = None,
                    Some(value) if value < 0.0 => {
                        return Err(SeriesError::NegativePrice {
                            commodity: name.clone(),
                            date: record.date,
                            value,
                        });
                    }
                    _ => {}
                }
            }
        }

        for pair in records.windows(2) {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(SeriesError::DuplicateTimestamp(current));
            }
            if current < previous {
                return Err(SeriesError::OutOfOrder { previous, current });
            }
        }

        Ok(Self { commodities, records })
    }

    /// 從未排序的記錄建立序列，依日期排序後再驗證
    pub fn from_unordered(commodities: Vec<String>, mut records: Vec<PriceRecord>) -> SeriesResult<Self> {
        records.sort_by_key(|r| r.date);
        Self::new(commodities, records)
    }

    /// 空序列
    pub fn empty(commodities: Vec<String>) -> SeriesResult<Self> {
        Self::new(commodities, Vec::new())
    }

    /// 商品名稱
    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    /// 所有記錄
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// 獲取數據點數量
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 檢查是否為空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 商品所在欄位索引
    pub fn commodity_index(&self, name: &str) -> Option<usize> {
        self.commodities.iter().position(|c| c == name)
    }

    /// 單一商品的價格欄位
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.commodity_index(name)?;
        Some(self.records.iter().map(|r| r.prices[idx]).collect())
    }

    /// 獲取日期數組
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// 第一筆記錄日期
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    /// 最後一筆記錄日期
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names() -> Vec<String> {
        vec!["Beras".to_string(), "Gula".to_string()]
    }

    #[test]
    fn test_series_creation() {
        let series = PriceSeries::new(
            names(),
            vec![
                PriceRecord::new(ymd(2024, 1, 1), vec![Some(12000.0), Some(15000.0)]),
                PriceRecord::new(ymd(2024, 1, 2), vec![Some(12100.0), None]),
            ],
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.start_date(), Some(ymd(2024, 1, 1)));
        assert_eq!(series.end_date(), Some(ymd(2024, 1, 2)));
        assert_eq!(series.column("Gula"), Some(vec![Some(15000.0), None]));
        assert_eq!(series.column("Kopi"), None);
    }

    #[test]
    fn test_nan_is_normalized_to_missing() {
        let series = PriceSeries::new(
            names(),
            vec![PriceRecord::new(ymd(2024, 1, 1), vec![Some(f64::NAN), Some(1.0)])],
        )
        .unwrap();
        assert_eq!(series.records()[0].prices[0], None);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let duplicate = PriceSeries::new(vec!["A".into(), "A".into()], Vec::new());
        assert_eq!(duplicate, Err(SeriesError::DuplicateCommodity("A".into())));

        let width = PriceSeries::new(names(), vec![PriceRecord::new(ymd(2024, 1, 1), vec![Some(1.0)])]);
        assert!(matches!(width, Err(SeriesError::WidthMismatch { expected: 2, actual: 1, .. })));

        let negative = PriceSeries::new(
            names(),
            vec![PriceRecord::new(ymd(2024, 1, 1), vec![Some(-1.0), None])],
        );
        assert!(matches!(negative, Err(SeriesError::NegativePrice { .. })));

        let out_of_order = PriceSeries::new(
            names(),
            vec![
                PriceRecord::new(ymd(2024, 1, 2), vec![None, None]),
                PriceRecord::new(ymd(2024, 1, 1), vec![None, None]),
            ],
        );
        assert!(matches!(out_of_order, Err(SeriesError::OutOfOrder { .. })));
    }

    #[test]
    fn test_from_unordered_sorts_but_rejects_duplicates() {
        let series = PriceSeries::from_unordered(
            names(),
            vec![
                PriceRecord::new(ymd(2024, 1, 3), vec![Some(3.0), None]),
                PriceRecord::new(ymd(2024, 1, 1), vec![Some(1.0), None]),
            ],
        )
        .unwrap();
        assert_eq!(series.dates(), vec![ymd(2024, 1, 1), ymd(2024, 1, 3)]);

        let duplicate = PriceSeries::from_unordered(
            names(),
            vec![
                PriceRecord::new(ymd(2024, 1, 1), vec![None, None]),
                PriceRecord::new(ymd(2024, 1, 1), vec![None, None]),
            ],
        );
        assert_eq!(duplicate, Err(SeriesError::DuplicateTimestamp(ymd(2024, 1, 1))));
    }
}
