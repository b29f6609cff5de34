#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use commodity_dashboard::domain_types::{PriceRecord, PriceSeries};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    ymd(y, m, d).and_hms_opt(h, min, s).unwrap()
}

// 創建測試用價格序列：單一商品，由 `start` 起每天一筆
pub fn daily_series(name: &str, start: NaiveDate, prices: &[Option<f64>]) -> PriceSeries {
    let records = prices
        .iter()
        .enumerate()
        .map(|(i, p)| PriceRecord::new(start + chrono::Duration::days(i as i64), vec![*p]))
        .collect();
    PriceSeries::new(vec![name.to_string()], records).unwrap()
}

// 創建測試用價格序列：指定日期與價格
pub fn dated_series(name: &str, points: &[(NaiveDate, f64)]) -> PriceSeries {
    let records = points
        .iter()
        .map(|(date, price)| PriceRecord::new(*date, vec![Some(*price)]))
        .collect();
    PriceSeries::from_unordered(vec![name.to_string()], records).unwrap()
}

// 試算表匯出格式的寬表 CSV
pub const WIDE_TABLE: &str = "\
Komoditas (Rp),01/ 02/ 2024,02/ 02/ 2024,05/ 02/ 2024,01/ 03/ 2024
Beras Kualitas Medium I,\"12,500\",\"12,600\",-,\"13,000\"
Gula Pasir Lokal,\"17,000\",,\"17,250\",\"17,500\"
";
