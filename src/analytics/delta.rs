//! 期間變化計算

use tracing::warn;

use crate::domain_types::{AggregatedSeries, Delta};

/// 計算商品最後兩個週期之間的絕對與百分比變化
///
/// 以下情況回傳 [`Delta::INSUFFICIENT`]，呼叫端應視為「歷史不足」：
/// - 週期少於兩個
/// - 找不到該商品
/// - 最後兩期任一期平均為缺值
///
/// 前一期為 0 時百分比定義為 0。
pub fn calculate_delta(aggregated: &AggregatedSeries, commodity: &str) -> Delta {
    let Some(idx) = aggregated.commodity_index(commodity) else {
        warn!("計算變化時找不到商品: {}", commodity);
        return Delta::INSUFFICIENT;
    };

    let n = aggregated.buckets.len();
    if n < 2 {
        return Delta::INSUFFICIENT;
    }

    let previous = aggregated.buckets[n - 2].mean(idx);
    let current = aggregated.buckets[n - 1].mean(idx);

    match (previous, current) {
        (Some(previous), Some(current)) => delta_between(previous, current),
        _ => {
            warn!("商品 {} 最後兩期含缺值，無法計算變化", commodity);
            Delta::INSUFFICIENT
        }
    }
}

/// 兩個數值之間的變化
pub fn delta_between(previous: f64, current: f64) -> Delta {
    let absolute = current - previous;
    let percent = if previous != 0.0 {
        absolute / previous * 100.0
    } else {
        0.0
    };
    Delta::new(absolute, percent)
}
