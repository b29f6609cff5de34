//! 統計摘要

use serde::{Deserialize, Serialize};

use crate::domain_types::{AggregatedSeries, PriceSeries};

/// 單一商品的描述統計，皆忽略缺值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommoditySummary {
    pub commodity: String,
    pub count: usize,
    pub sum: f64,
    pub mean: Option<f64>,
    /// 樣本標準差 (n - 1)，少於兩筆時為 `None`
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl CommoditySummary {
    /// 由一欄數值計算統計
    pub fn from_values(commodity: impl Into<String>, values: &[Option<f64>]) -> Self {
        let mut present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
        present.sort_by(|a, b| a.total_cmp(b));

        let count = present.len();
        let sum: f64 = present.iter().sum();
        let mean = (count > 0).then(|| sum / count as f64);
        let std = mean.filter(|_| count > 1).map(|m| {
            let var = present.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        });

        Self {
            commodity: commodity.into(),
            count,
            sum,
            mean,
            std,
            min: present.first().copied(),
            p25: quantile(&present, 0.25),
            median: quantile(&present, 0.5),
            p75: quantile(&present, 0.75),
            max: present.last().copied(),
        }
    }
}

/// 已排序數據的線性插值分位數
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// 原始序列每個商品的統計
pub fn describe_series(series: &PriceSeries) -> Vec<CommoditySummary> {
    series
        .commodities()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column: Vec<Option<f64>> = series.records().iter().map(|r| r.prices[idx]).collect();
            CommoditySummary::from_values(name.clone(), &column)
        })
        .collect()
}

/// 聚合序列每個商品的統計
pub fn describe_aggregated(aggregated: &AggregatedSeries) -> Vec<CommoditySummary> {
    aggregated
        .commodities
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column: Vec<Option<f64>> = aggregated.buckets.iter().map(|b| b.mean(idx)).collect();
            CommoditySummary::from_values(name.clone(), &column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_matches_pandas() {
        let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)];
        let s = CommoditySummary::from_values("Beras", &values);

        assert_eq!(s.count, 4);
        assert_eq!(s.sum, 10.0);
        assert_eq!(s.mean, Some(2.5));
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.p25, Some(1.75));
        assert_eq!(s.median, Some(2.5));
        assert_eq!(s.p75, Some(3.25));
        assert_eq!(s.max, Some(4.0));
        let std = s.std.unwrap();
        assert!((std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_describe_degenerate_columns() {
        let empty = CommoditySummary::from_values("Gula", &[None, None]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.sum, 0.0);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.median, None);

        let single = CommoditySummary::from_values("Gula", &[Some(7.0)]);
        assert_eq!(single.std, None);
        assert_eq!(single.p25, Some(7.0));
        assert_eq!(single.p75, Some(7.0));
    }

    #[test]
    fn test_describe_aggregated_with_short_means_row() {
        use crate::domain_types::{AggregatedBucket, Granularity};
        use chrono::NaiveDate;

        let bucket = |d: u32, means: Vec<Option<f64>>| AggregatedBucket {
            period: Granularity::Daily.bucket_of(NaiveDate::from_ymd_opt(2024, 2, d).unwrap()),
            means,
            record_count: 1,
        };
        let agg = AggregatedSeries {
            commodities: vec!["Beras".into(), "Gula".into()],
            granularity: Granularity::Daily,
            buckets: vec![bucket(1, vec![Some(1.0), Some(2.0)]), bucket(2, vec![Some(3.0)])],
        };

        let summary = describe_aggregated(&agg);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[1].count, 1);
        assert_eq!(summary[1].sum, 2.0);
    }
}
