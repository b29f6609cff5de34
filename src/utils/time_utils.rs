// time_utils.rs
//
// 提供日曆運算相關的工具函數，供週期切分與完整性判斷共用。
// 主要功能：
// 1. 月份、週起點的對齊
// 2. 不會 panic 的日期加減（超出 chrono 可表示範圍時夾到邊界）
// 3. 日期與日期時間之間的轉換

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

//
// 基礎日期運算
//

/// 日期加上指定天數，溢位時回傳 `NaiveDate::MAX`
pub fn saturating_add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// 日期減去指定天數，溢位時回傳 `NaiveDate::MIN`
pub fn saturating_sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// 日期加上指定月數，溢位時回傳 `NaiveDate::MAX`
pub fn saturating_add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

//
// 週期對齊
//

/// 該日期所在月份的第一天
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 下一個日曆月份的第一天
pub fn first_day_of_next_month(date: NaiveDate) -> NaiveDate {
    saturating_add_months(first_day_of_month(date), 1)
}

/// 該日期所在週的週一
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    saturating_sub_days(date, u64::from(offset))
}

//
// 日期 <-> 日期時間
//

/// 取得日期當天 00:00:00
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 取得本地時區的目前時間（不含時區資訊）
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
