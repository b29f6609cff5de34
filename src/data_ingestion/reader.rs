//! CSV 檔案讀取器
//!
//! 讀出的 DataFrame 所有欄位皆為字串，型別轉換交給 [`super::parser`]。

use super::error::{IngestionError, IngestionResult};
use polars::prelude::*;
use std::path::Path;

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 是否有標題行
    pub has_header: bool,
    /// 分隔符
    pub separator: u8,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            separator: b',',
        }
    }
}

/// CSV 檔案讀取器
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    /// 創建新的 CSV 讀取器
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 設定分隔符
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    fn options(&self) -> CsvReadOptions {
        CsvReadOptions::default()
            .with_has_header(self.config.has_header)
            .with_parse_options(CsvParseOptions::default().with_separator(self.config.separator))
            // 0 表示不推斷型別，全部讀為字串
            .with_infer_schema_length(Some(0))
    }

    /// 從檔案路徑讀取 CSV
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> IngestionResult<DataFrame> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IngestionError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("檔案不存在: {}", path.display()),
            )));
        }

        let df = self
            .options()
            .try_into_reader_with_file_path(Some(path.into()))?
            .finish()?;

        Ok(df)
    }

    /// 從字節數組讀取 CSV
    pub fn read_bytes(&self, data: &[u8]) -> IngestionResult<DataFrame> {
        use std::io::Cursor;

        let cursor = Cursor::new(data.to_vec());
        let df = self.options().into_reader_with_file_handle(cursor).finish()?;

        Ok(df)
    }

    /// 從字串讀取 CSV
    pub fn read_string(&self, data: &str) -> IngestionResult<DataFrame> {
        self.read_bytes(data.as_bytes())
    }
}
