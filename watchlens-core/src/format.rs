//! Formatting helpers shared across UIs.

use chrono::{DateTime, FixedOffset};

/// Format a count with thousands separators (e.g., "12,345").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a timestamp for display (e.g., "Jan 01, 2024").
pub fn format_date(ts: DateTime<FixedOffset>) -> String {
    ts.format("%b %d, %Y").to_string()
}

/// Hour bucket label (e.g., "10am–11am").
pub fn hour_display(hour: u8) -> String {
    let h = hour % 12;
    let h = if h == 0 { 12 } else { h };
    let period = if hour < 12 { "am" } else { "pm" };
    let next_h = (hour + 1) % 12;
    let next_h = if next_h == 0 { 12 } else { next_h };
    let next_period = if (hour + 1) % 24 < 12 { "am" } else { "pm" };
    format!("{}{}–{}{}", h, period, next_h, next_period)
}
