//! 由呼叫端持有的價格序列快取
//!
//! 取代全域的記憶化載入：資料只在第一次存取或明確 `refresh` 時讀取，
//! 各頻率的聚合結果以 moka 快取保存，重新載入時一併清空。

use moka::sync::Cache;
use std::sync::Arc;
use tracing::{debug, info};

use super::stats::CacheStats;
use crate::analytics::PeriodAggregator;
use crate::data_ingestion::{IngestionResult, PriceSource};
use crate::domain_types::{AggregatedSeries, Granularity, PriceSeries};

/// 預設可保存的聚合結果數（每個頻率一份）
pub const DEFAULT_MAX_AGGREGATIONS: u64 = 4;

/// 價格序列與聚合結果快取
pub struct SeriesCache<S: PriceSource> {
    source: S,
    series: Option<Arc<PriceSeries>>,
    aggregations: Cache<Granularity, Arc<AggregatedSeries>>,
    max_aggregations: u64,
}

impl<S: PriceSource> SeriesCache<S> {
    /// 創建快取，尚未載入任何資料
    pub fn new(source: S, max_aggregations: u64) -> Self {
        Self {
            source,
            series: None,
            aggregations: Cache::builder().max_capacity(max_aggregations).build(),
            max_aggregations,
        }
    }

    /// 使用預設容量創建快取
    pub fn with_source(source: S) -> Self {
        Self::new(source, DEFAULT_MAX_AGGREGATIONS)
    }

    /// 資料來源
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 取得價格序列，尚未載入時從來源讀取
    pub fn series(&mut self) -> IngestionResult<Arc<PriceSeries>> {
        match &self.series {
            Some(series) => Ok(Arc::clone(series)),
            None => self.refresh(),
        }
    }

    /// 取得指定頻率的聚合結果，相同頻率只計算一次
    pub fn aggregated(&mut self, granularity: Granularity) -> IngestionResult<Arc<AggregatedSeries>> {
        let series = self.series()?;
        Ok(self.aggregations.get_with(granularity, || {
            debug!("快取未命中，計算 {} 聚合", granularity);
            Arc::new(PeriodAggregator::aggregate(&series, granularity))
        }))
    }

    /// 從來源重新載入並清空聚合快取
    pub fn refresh(&mut self) -> IngestionResult<Arc<PriceSeries>> {
        let series = Arc::new(self.source.load()?);
        self.aggregations.invalidate_all();
        self.series = Some(Arc::clone(&series));

        info!("已從 {} 重新載入價格序列", self.source.describe());
        Ok(series)
    }

    /// 丟棄所有快取內容，下次存取時重新載入
    pub fn invalidate(&mut self) {
        self.series = None;
        self.aggregations.invalidate_all();
        debug!("價格序列快取已失效");
    }

    /// 快取統計
    pub fn stats(&self) -> CacheStats {
        self.aggregations.run_pending_tasks();
        CacheStats {
            series_loaded: self.series.is_some(),
            size: self.aggregations.entry_count() as usize,
            capacity: self.max_aggregations as usize,
        }
    }
}
