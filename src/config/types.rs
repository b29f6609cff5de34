use serde::{Deserialize, Serialize};

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::data_ingestion::PriceTableFormat;
use crate::domain_types::Granularity;

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.data.validate()?;
        self.dashboard.validate()?;
        self.cache.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 價格資料來源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: String,
    pub label_column: String,
    pub date_format: String,
    pub thousands_separator: char,
    pub delimiter: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        let format = PriceTableFormat::default();
        Self {
            path: "data/harga_komoditas.csv".to_string(),
            label_column: format.label_column,
            date_format: format.date_format,
            thousands_separator: format.thousands_separator,
            delimiter: format.delimiter,
        }
    }
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.path, "data.path")?;
        ValidationUtils::not_empty(&self.label_column, "data.label_column")?;
        ValidationUtils::not_empty(&self.date_format, "data.date_format")?;

        if self.thousands_separator.is_ascii_digit() {
            return Err(ValidationError::InvalidValue(format!(
                "data.thousands_separator 不可為數字: {}",
                self.thousands_separator
            )));
        }

        if !self.delimiter.is_ascii() {
            return Err(ValidationError::InvalidValue(format!(
                "data.delimiter 必須為 ASCII 字元: {:?}",
                self.delimiter
            )));
        }

        Ok(())
    }
}

impl DataConfig {
    /// 轉為寬表解析格式
    pub fn table_format(&self) -> PriceTableFormat {
        PriceTableFormat {
            label_column: self.label_column.clone(),
            date_format: self.date_format.clone(),
            thousands_separator: self.thousands_separator,
            delimiter: self.delimiter,
        }
    }
}

/// 報表預設值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_granularity: String,
    pub default_commodities: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_granularity: Granularity::Daily.to_string(),
            default_commodities: Vec::new(),
        }
    }
}

impl Validator for DashboardConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::parses_as::<Granularity>(
            &self.default_granularity,
            "dashboard.default_granularity",
        )
    }
}

impl DashboardConfig {
    /// 解析後的預設頻率，無法解析時為日線
    pub fn granularity(&self) -> Granularity {
        self.default_granularity.parse().unwrap_or_default()
    }
}

/// 快取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_aggregations: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_aggregations: crate::cache::DEFAULT_MAX_AGGREGATIONS,
        }
    }
}

impl Validator for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.max_aggregations, 1, 64, "cache.max_aggregations")
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level,
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}
