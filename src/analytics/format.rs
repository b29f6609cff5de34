//! 指標卡片的顯示格式

use crate::domain_types::{Delta, Granularity};

/// 四捨五入為整數並加上千分位逗號
pub fn format_with_commas(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 帶正負號的變化字串，例如 `+1,234 (+2.50%)`
pub fn format_delta(delta: &Delta) -> String {
    // 符號取自原值，-0.4 顯示為 -0
    let sign = if delta.absolute.is_sign_negative() { "-" } else { "+" };
    format!(
        "{}{} ({:+.2}%)",
        sign,
        format_with_commas(delta.absolute.abs()),
        delta.percent
    )
}

/// 最後一個週期未結束時的提示
pub fn incomplete_note(granularity: Granularity) -> String {
    format!("Note: The last {} is incomplete.", granularity.period_noun())
}
