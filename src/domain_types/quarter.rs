//! 自訂財務季度
//!
//! 季度不依日曆季度劃分，而是從二月開始：
//!
//! | 月份        | 季度 |
//! |-------------|------|
//! | 2, 3, 4     | Q1   |
//! | 5, 6, 7     | Q2   |
//! | 8, 9, 10    | Q3   |
//! | 11, 12, 1   | Q4   |
//!
//! 一月屬於 *前一年* 的 Q4。

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::saturating_add_months;

/// 每季的月數
const MONTHS_PER_QUARTER: u32 = 3;

/// Q1 的起始月份
const FIRST_QUARTER_START_MONTH: u32 = 2;

/// 自訂季度，依 (年, 季) 排序
///
/// 反序列化時同樣檢查 `quarter` 在 1..=4。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFiscalQuarter")]
pub struct FiscalQuarter {
    year: i32,
    quarter: u8,
}

/// 未驗證的反序列化形式
#[derive(Deserialize)]
struct RawFiscalQuarter {
    year: i32,
    quarter: u8,
}

impl TryFrom<RawFiscalQuarter> for FiscalQuarter {
    type Error = String;

    fn try_from(raw: RawFiscalQuarter) -> Result<Self, Self::Error> {
        FiscalQuarter::new(raw.year, raw.quarter)
            .ok_or_else(|| format!("季度必須在 1..=4: {}", raw.quarter))
    }
}

impl FiscalQuarter {
    /// 建立季度，`quarter` 必須在 1..=4
    pub fn new(year: i32, quarter: u8) -> Option<Self> {
        (1..=4).contains(&quarter).then_some(Self { year, quarter })
    }

    /// 季度所屬年份
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 季度編號 (1..=4)
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// 季度第一天
    pub fn start_date(&self) -> NaiveDate {
        let month = FIRST_QUARTER_START_MONTH + MONTHS_PER_QUARTER * u32::from(self.quarter.saturating_sub(1));
        // 超出 chrono 可表示範圍時夾到邊界
        NaiveDate::from_ymd_opt(self.year, month, 1).unwrap_or(if self.year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
    }

    /// 季度結束日（不含），即下一季第一天
    pub fn end_date(&self) -> NaiveDate {
        saturating_add_months(self.start_date(), MONTHS_PER_QUARTER)
    }

    /// 日期是否落在本季內
    pub fn contains(&self, date: NaiveDate) -> bool {
        resolve_quarter(date) == *self
    }

    /// 下一季
    pub fn next(&self) -> Self {
        if self.quarter == 4 {
            Self { year: self.year + 1, quarter: 1 }
        } else {
            Self { year: self.year, quarter: self.quarter + 1 }
        }
    }

    /// 上一季
    pub fn previous(&self) -> Self {
        if self.quarter == 1 {
            Self { year: self.year - 1, quarter: 4 }
        } else {
            Self { year: self.year, quarter: self.quarter - 1 }
        }
    }
}

impl From<FiscalQuarter> for (i32, u8) {
    fn from(q: FiscalQuarter) -> Self {
        (q.year, q.quarter)
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter)
    }
}

/// 將任意日期映射到其自訂季度
pub fn resolve_quarter(date: NaiveDate) -> FiscalQuarter {
    let month = date.month();
    match month {
        1 => FiscalQuarter { year: date.year() - 1, quarter: 4 },
        _ => FiscalQuarter {
            year: date.year(),
            quarter: ((month - FIRST_QUARTER_START_MONTH) / MONTHS_PER_QUARTER + 1) as u8,
        },
    }
}
