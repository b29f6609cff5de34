//! 週期聚合

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain_types::{
    AggregatedBucket, AggregatedSeries, Granularity, Period, PriceRecord, PriceSeries,
};

/// 提供週期聚合核心功能的結構
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// 將價格序列依頻率聚合為各週期平均值
    pub fn aggregate(series: &PriceSeries, granularity: Granularity) -> AggregatedSeries {
        Self::aggregate_records(series.commodities(), series.records(), granularity)
    }

    /// 對任意順序的記錄做聚合
    ///
    /// 每個週期內依日期排序後再加總，因此結果與輸入順序無關。
    /// 沒有任何記錄的週期不會輸出；某商品在週期內全為缺值時平均為 `None`。
    pub fn aggregate_records<'a, I>(
        commodities: &[String],
        records: I,
        granularity: Granularity,
    ) -> AggregatedSeries
    where
        I: IntoIterator<Item = &'a PriceRecord>,
    {
        let mut groups: BTreeMap<NaiveDate, (Period, Vec<&'a PriceRecord>)> = BTreeMap::new();
        let mut total = 0usize;

        for record in records {
            let period = granularity.bucket_of(record.date);
            groups
                .entry(period.start)
                .or_insert_with(|| (period, Vec::new()))
                .1
                .push(record);
            total += 1;
        }

        let buckets: Vec<AggregatedBucket> = groups
            .into_values()
            .map(|(period, mut members)| {
                members.sort_by_key(|r| r.date);
                AggregatedBucket {
                    period,
                    means: column_means(commodities.len(), &members),
                    record_count: members.len(),
                }
            })
            .collect();

        debug!(
            "聚合 {} 筆記錄為 {} 個 {} 週期",
            total,
            buckets.len(),
            granularity
        );

        AggregatedSeries {
            commodities: commodities.to_vec(),
            granularity,
            buckets,
        }
    }
}

/// 各欄位略過缺值後的平均
fn column_means(width: usize, members: &[&PriceRecord]) -> Vec<Option<f64>> {
    (0..width)
        .map(|idx| {
            let (sum, count) = members
                .iter()
                .filter_map(|r| r.prices.get(idx).copied().flatten())
                .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// 依頻率聚合價格序列
pub fn aggregate(series: &PriceSeries, granularity: Granularity) -> AggregatedSeries {
    PeriodAggregator::aggregate(series, granularity)
}
