//! 指標卡片報表
//!
//! 全期間卡片：總和取自原始日資料，變化取自完整聚合表。
//! 選定期間卡片：先聚合再以 [`filter_buckets`] 保留整個週期，
//! 因此季度範圍從季中開始時仍使用整季平均。

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::delta::calculate_delta;
use super::filter::{filter_buckets, select_aggregated, QueryError, QueryResult};
use super::format::{format_delta, incomplete_note};
use super::summary::{describe_aggregated, CommoditySummary};
use crate::domain_types::{AggregatedSeries, Delta, Granularity, PriceSeries};

/// 報表查詢條件
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    /// 未指定時取第一個商品
    pub commodities: Vec<String>,
    /// 未指定時取資料第一天
    pub start: Option<NaiveDate>,
    /// 未指定時取資料最後一天
    pub end: Option<NaiveDate>,
}

/// 單一商品的指標卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub commodity: String,
    pub sum: f64,
    pub delta: Delta,
    pub delta_text: String,
    pub note: Option<String>,
}

impl MetricCard {
    fn new(commodity: &str, sum: f64, aggregated: &AggregatedSeries, now: NaiveDateTime) -> Self {
        let delta = calculate_delta(aggregated, commodity);
        Self {
            commodity: commodity.to_string(),
            sum,
            delta,
            delta_text: format_delta(&delta),
            note: aggregated
                .last_period_incomplete(now)
                .then(|| incomplete_note(aggregated.granularity)),
        }
    }
}

/// 完整報表
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub all_time: Vec<MetricCard>,
    pub selected: Vec<MetricCard>,
    pub summary: Vec<CommoditySummary>,
    /// 選定期間的聚合表
    pub table: AggregatedSeries,
}

/// 由原始序列與其聚合結果產生報表
///
/// `aggregated` 必須是 `series` 的聚合，頻率取自 `aggregated`。
pub fn build_report(
    series: &PriceSeries,
    aggregated: &AggregatedSeries,
    request: &ReportRequest,
    now: NaiveDateTime,
) -> QueryResult<DashboardReport> {
    let (Some(data_start), Some(data_end)) = (series.start_date(), series.end_date()) else {
        return Err(QueryError::EmptySeries);
    };
    let start = request.start.unwrap_or(data_start);
    let end = request.end.unwrap_or(data_end);

    let full = select_aggregated(aggregated, &request.commodities)?;
    let selected_table = filter_buckets(&full, start, end)?;

    let all_time = full
        .commodities
        .iter()
        .map(|name| {
            let sum: f64 = series.column(name).unwrap_or_default().iter().flatten().sum();
            MetricCard::new(name, sum, &full, now)
        })
        .collect();

    let selected = selected_table
        .commodities
        .iter()
        .map(|name| {
            let sum: f64 = selected_table.column(name).unwrap_or_default().iter().flatten().sum();
            MetricCard::new(name, sum, &selected_table, now)
        })
        .collect();

    debug!(
        "報表 {} ~ {}: 全期間 {} 期, 選定期間 {} 期",
        start,
        end,
        full.len(),
        selected_table.len()
    );

    Ok(DashboardReport {
        granularity: aggregated.granularity,
        start,
        end,
        all_time,
        selected,
        summary: describe_aggregated(&selected_table),
        table: selected_table,
    })
}
