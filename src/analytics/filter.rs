//! 商品選擇與日期範圍篩選

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain_types::{resolve_quarter, AggregatedBucket, AggregatedSeries, Granularity, PriceRecord, PriceSeries, SeriesError};

/// 查詢錯誤
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("找不到商品: {0}")]
    UnknownCommodity(String),

    #[error("無效的日期範圍: {start} 晚於 {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("序列中沒有任何商品")]
    NoCommodities,

    #[error("序列中沒有任何價格記錄")]
    EmptySeries,

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// 查詢結果類型
pub type QueryResult<T> = Result<T, QueryError>;

/// 商品名稱轉為欄位索引；未指定時取第一個
fn resolve_indices<S: AsRef<str>>(available: &[String], names: &[S]) -> QueryResult<Vec<usize>> {
    if names.is_empty() {
        return if available.is_empty() {
            Err(QueryError::NoCommodities)
        } else {
            Ok(vec![0])
        };
    }

    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            available
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| QueryError::UnknownCommodity(name.to_string()))
        })
        .collect()
}

/// 只保留指定的商品欄位
///
/// 未指定任何商品時預設取第一個商品。
pub fn select_commodities<S: AsRef<str>>(series: &PriceSeries, names: &[S]) -> QueryResult<PriceSeries> {
    let indices = resolve_indices(series.commodities(), names)?;

    let commodities = indices
        .iter()
        .map(|&i| series.commodities()[i].clone())
        .collect();
    let records = series
        .records()
        .iter()
        .map(|r| PriceRecord::new(r.date, indices.iter().map(|&i| r.prices[i]).collect()))
        .collect();

    Ok(PriceSeries::new(commodities, records)?)
}

/// 只保留聚合序列中指定的商品欄位，規則同 [`select_commodities`]
pub fn select_aggregated<S: AsRef<str>>(aggregated: &AggregatedSeries, names: &[S]) -> QueryResult<AggregatedSeries> {
    let indices = resolve_indices(&aggregated.commodities, names)?;

    let buckets = aggregated
        .buckets
        .iter()
        .map(|b| AggregatedBucket {
            period: b.period,
            means: indices.iter().map(|&i| b.mean(i)).collect(),
            record_count: b.record_count,
        })
        .collect();

    Ok(AggregatedSeries {
        commodities: indices.iter().map(|&i| aggregated.commodities[i].clone()).collect(),
        granularity: aggregated.granularity,
        buckets,
    })
}

/// 保留 `start <= date <= end` 的記錄（兩端皆包含）
pub fn filter_date_range(series: &PriceSeries, start: NaiveDate, end: NaiveDate) -> QueryResult<PriceSeries> {
    if start > end {
        return Err(QueryError::InvalidRange { start, end });
    }

    let records: Vec<PriceRecord> = series
        .records()
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    debug!("日期範圍 {} ~ {} 保留 {} / {} 筆記錄", start, end, records.len(), series.len());

    Ok(PriceSeries::new(series.commodities().to_vec(), records)?)
}

/// 篩選已聚合的週期
///
/// 季度頻率以 `start`、`end` 所屬季度比較（兩端皆包含），
/// 其他頻率以週期起始日落在 `[start, end]` 內為準。
pub fn filter_buckets(aggregated: &AggregatedSeries, start: NaiveDate, end: NaiveDate) -> QueryResult<AggregatedSeries> {
    if start > end {
        return Err(QueryError::InvalidRange { start, end });
    }

    let buckets = match aggregated.granularity {
        Granularity::Quarterly => {
            let (first, last) = (resolve_quarter(start), resolve_quarter(end));
            aggregated
                .buckets
                .iter()
                .filter(|b| {
                    let q = resolve_quarter(b.period.start);
                    first <= q && q <= last
                })
                .cloned()
                .collect()
        }
        _ => aggregated
            .buckets
            .iter()
            .filter(|b| start <= b.period.start && b.period.start <= end)
            .cloned()
            .collect(),
    };

    Ok(AggregatedSeries {
        commodities: aggregated.commodities.clone(),
        granularity: aggregated.granularity,
        buckets,
    })
}
