//! 資料載入模組
//!
//! 讀取商品價格寬表（試算表匯出的 CSV），轉為 [`PriceSeries`]。
//! 也負責把聚合結果寫回 CSV。

pub mod error;
pub mod reader;
pub mod parser;
pub mod writer;

pub use error::{IngestionError, IngestionResult};
pub use reader::{CsvReader, CsvReaderConfig};
pub use parser::{PriceTableFormat, PriceTableParser};
pub use writer::{write_aggregated_csv, write_aggregated_csv_file};

use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain_types::PriceSeries;

/// 從 CSV 檔案載入價格表
pub fn load_price_table<P: AsRef<Path>>(path: P, format: &PriceTableFormat) -> IngestionResult<PriceSeries> {
    let path = path.as_ref();
    let df = format.reader()?.read_file(path)?;
    let series = PriceTableParser::parse(&df, format)?;

    info!(
        "已載入 {}: {} 個商品, {} 筆記錄",
        path.display(),
        series.commodities().len(),
        series.len()
    );

    Ok(series)
}

/// 從 CSV 字串載入價格表
pub fn parse_price_table(data: &str, format: &PriceTableFormat) -> IngestionResult<PriceSeries> {
    let df = format.reader()?.read_string(data)?;
    PriceTableParser::parse(&df, format)
}

/// 價格資料來源，供 [`crate::cache::SeriesCache`] 重新載入
pub trait PriceSource {
    /// 載入完整價格序列
    fn load(&self) -> IngestionResult<PriceSeries>;

    /// 來源描述，用於日誌
    fn describe(&self) -> String;
}

/// 以 CSV 檔案為來源
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    pub path: PathBuf,
    pub format: PriceTableFormat,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, format: PriceTableFormat) -> Self {
        Self { path: path.into(), format }
    }
}

impl PriceSource for CsvFileSource {
    fn load(&self) -> IngestionResult<PriceSeries> {
        load_price_table(&self.path, &self.format)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// 已在記憶體中的序列，主要用於測試與嵌入
#[derive(Debug, Clone)]
pub struct InMemorySource(pub PriceSeries);

impl PriceSource for InMemorySource {
    fn load(&self) -> IngestionResult<PriceSeries> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.0.len())
    }
}
