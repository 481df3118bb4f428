/// Rounds half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Signed one-decimal percentage, e.g. `+32.4%`, `-8.0%`, `0.0%`.
pub fn format_percent(value: f64) -> String {
    let normalized = if value.is_finite() { value } else { 0.0 };
    let rounded = round_to_tenth(normalized);
    // -0.04 rounds to -0.0, which must print unsigned
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let sign = if rounded > 0.0 { "+" } else { "" };
    format!("{sign}{rounded:.1}%")
}

/// Whole-pound GBP amount with thousands separators, e.g. `£68,000` or `-£1,250`.
pub fn format_currency(amount: f64) -> String {
    let normalized = if amount.is_finite() { amount } else { 0.0 };
    let pounds = normalized.round();
    let sign = if pounds < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", pounds.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}£{grouped}")
}
