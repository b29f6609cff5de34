//! 聚合頻率定義模組
//!
//! 所有週期切分與完整性判斷都集中在 [`Granularity`] 上，
//! 以列舉分派取代字串比對。

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::period::Period;
use super::quarter::resolve_quarter;
use crate::utils::{
    first_day_of_month, first_day_of_next_month, saturating_add_days, start_of_day, start_of_week,
};

/// 聚合頻率
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

/// 無法辨識的頻率名稱
#[derive(Debug, Error, PartialEq, Eq)]
#[error("無效的聚合頻率: {0}（可用值: daily, weekly, monthly, quarterly）")]
pub struct ParseGranularityError(pub String);

impl Granularity {
    /// 獲取所有頻率列表
    pub fn all() -> [Granularity; 4] {
        [
            Granularity::Daily,
            Granularity::Weekly,
            Granularity::Monthly,
            Granularity::Quarterly,
        ]
    }

    /// 小寫名稱
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
        }
    }

    /// 單一週期的英文名詞，用於提示文字
    pub fn period_noun(&self) -> &'static str {
        match self {
            Granularity::Daily => "day",
            Granularity::Weekly => "week",
            Granularity::Monthly => "month",
            Granularity::Quarterly => "quarter",
        }
    }

    /// 取得日期所屬的週期
    pub fn bucket_of(&self, date: NaiveDate) -> Period {
        let (start, end) = match self {
            Granularity::Daily => (date, saturating_add_days(date, 1)),
            Granularity::Weekly => {
                let start = start_of_week(date);
                (start, saturating_add_days(start, 7))
            }
            Granularity::Monthly => (first_day_of_month(date), first_day_of_next_month(date)),
            Granularity::Quarterly => {
                let quarter = resolve_quarter(date);
                (quarter.start_date(), quarter.end_date())
            }
        };

        Period { granularity: *self, start, end }
    }

    /// 週期相對於 `now` 是否已結束
    pub fn is_complete(&self, period: &Period, now: NaiveDateTime) -> bool {
        self.is_complete_from(period.start, now)
    }

    /// 以週期起始日判斷完整性
    ///
    /// - 日：起始日早於今天
    /// - 週：起始日 + 6 天已早於 `now`
    /// - 月：下個月第一天不晚於 `now`
    /// - 季：起始日所屬季度早於 `now` 所屬季度
    pub(crate) fn is_complete_from(&self, start: NaiveDate, now: NaiveDateTime) -> bool {
        match self {
            Granularity::Daily => start < now.date(),
            Granularity::Weekly => start_of_day(saturating_add_days(start, 6)) < now,
            Granularity::Monthly => start_of_day(first_day_of_next_month(start)) <= now,
            Granularity::Quarterly => resolve_quarter(start) < resolve_quarter(now.date()),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" | "harian" => Ok(Granularity::Daily),
            "weekly" | "w" | "mingguan" => Ok(Granularity::Weekly),
            "monthly" | "m" | "bulanan" => Ok(Granularity::Monthly),
            "quarterly" | "q" | "kuartalan" => Ok(Granularity::Quarterly),
            _ => Err(ParseGranularityError(s.to_string())),
        }
    }
}

/// 判斷以 `bucket_start` 開始的週期在 `reference_now` 時是否已完整
pub fn is_period_complete(
    bucket_start: NaiveDate,
    granularity: Granularity,
    reference_now: NaiveDateTime,
) -> bool {
    granularity.is_complete_from(bucket_start, reference_now)
}
