//! 資料載入錯誤定義

use thiserror::Error;

use crate::domain_types::SeriesError;

/// 資料載入錯誤類型
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("檔案讀取錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("無效的欄位分隔字元: {0:?}")]
    InvalidDelimiter(char),

    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("日期欄位解析錯誤: 欄位 {header}, 格式 {format}")]
    InvalidDateHeader { header: String, format: String },

    #[error("數值解析錯誤: 商品 {commodity}, 日期 {date}, 值 {value}")]
    NumberParseError {
        commodity: String,
        date: String,
        value: String,
    },

    #[error("價格序列無效: {0}")]
    Series(#[from] SeriesError),

    #[error("Polars 錯誤: {0}")]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("CSV 寫出錯誤: {0}")]
    CsvError(#[from] csv::Error),
}

/// 資料載入結果類型
pub type IngestionResult<T> = Result<T, IngestionError>;
