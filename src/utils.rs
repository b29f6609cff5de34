// utils.rs - 公共工具模組
//
// 提供各種通用的工具函數和輔助方法，用於簡化系統其他部分的代碼。

pub mod time_utils;

// 重新導出時間工具函數，使其可以通過 utils::function_name 直接訪問
pub use time_utils::{
    // 週期對齊
    first_day_of_month,
    first_day_of_next_month,
    start_of_week,

    // 日期 <-> 日期時間
    local_now,
    start_of_day,

    // 基礎日期運算
    saturating_add_days,
    saturating_add_months,
    saturating_sub_days,
};
