//! 寬表價格資料解析器
//!
//! 原始表格每列為一個商品、每欄為一個日期：
//!
//! ```text
//! Komoditas (Rp),01/ 02/ 2024,02/ 02/ 2024
//! Beras,"12,500","12,600"
//! ```
//!
//! 解析時轉置為「每個日期一筆記錄」的 [`PriceSeries`]。

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, warn};

use super::error::{IngestionError, IngestionResult};
use super::reader::CsvReader;
use crate::domain_types::{PriceRecord, PriceSeries};

/// 寬表格式設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTableFormat {
    /// 商品名稱所在欄位
    pub label_column: String,
    /// 日期欄位標題格式（去除前後空白後解析）
    pub date_format: String,
    /// 千分位分隔字元，解析前移除
    pub thousands_separator: char,
    /// CSV 欄位分隔字元，必須為 ASCII
    pub delimiter: char,
}

impl PriceTableFormat {
    /// 依格式建立 CSV 讀取器
    pub fn reader(&self) -> IngestionResult<CsvReader> {
        let separator =
            u8::try_from(self.delimiter).map_err(|_| IngestionError::InvalidDelimiter(self.delimiter))?;
        if !separator.is_ascii() {
            return Err(IngestionError::InvalidDelimiter(self.delimiter));
        }
        Ok(CsvReader::default().with_separator(separator))
    }
}

impl Default for PriceTableFormat {
    fn default() -> Self {
        Self {
            label_column: "Komoditas (Rp)".to_string(),
            date_format: "%d/ %m/ %Y".to_string(),
            thousands_separator: ',',
            delimiter: ',',
        }
    }
}

/// 寬表解析器
pub struct PriceTableParser;

impl PriceTableParser {
    /// 將字串 DataFrame 轉為價格序列
    pub fn parse(df: &DataFrame, format: &PriceTableFormat) -> IngestionResult<PriceSeries> {
        let labels = string_column(df, &format.label_column)?;

        // 空白商品名稱的列（例如表尾空行）直接略過
        let rows: Vec<(usize, String)> = labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| match label.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Some((i, name.to_string())),
                _ => {
                    warn!("第 {} 列缺少商品名稱，已略過", i + 1);
                    None
                }
            })
            .collect();
        let commodities: Vec<String> = rows.iter().map(|(_, name)| name.clone()).collect();

        let mut records = Vec::new();
        for header in df.get_column_names() {
            let header = header.to_string();
            if header == format.label_column {
                continue;
            }

            let date = parse_date_header(&header, &format.date_format)?;
            let cells = string_column(df, &header)?;

            let prices = rows
                .iter()
                .map(|(i, name)| {
                    parse_price(cells[*i].as_deref(), format.thousands_separator).map_err(|value| {
                        IngestionError::NumberParseError {
                            commodity: name.clone(),
                            date: header.trim().to_string(),
                            value,
                        }
                    })
                })
                .collect::<IngestionResult<Vec<_>>>()?;

            records.push(PriceRecord::new(date, prices));
        }

        debug!("解析 {} 個商品、{} 個日期", commodities.len(), records.len());

        Ok(PriceSeries::from_unordered(commodities, records)?)
    }
}

/// 取出字串欄位
fn string_column(df: &DataFrame, name: &str) -> IngestionResult<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| IngestionError::MissingColumn(name.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// 解析日期欄位標題
pub fn parse_date_header(header: &str, format: &str) -> IngestionResult<NaiveDate> {
    NaiveDate::parse_from_str(header.trim(), format).map_err(|_| IngestionError::InvalidDateHeader {
        header: header.to_string(),
        format: format.to_string(),
    })
}

/// 解析帶千分位的價格字串；空白或 `-` 為缺值。失敗時回傳原始字串
pub fn parse_price(raw: Option<&str>, thousands_separator: char) -> Result<Option<f64>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != thousands_separator && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return Ok(None);
    }

    cleaned.parse::<f64>().map(Some).map_err(|_| raw.to_string())
}
