//! Cell formatting helpers shared by the sector schemas

use chrono::{NaiveDateTime, NaiveTime};

/// Formats `value` with `decimals` fraction digits and a comma every
/// three integer digits
#[must_use]
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::with_capacity(formatted.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    if value.is_sign_negative() && out.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{out}")
    } else {
        out
    }
}

#[must_use]
pub fn money(value: f64) -> String {
    let amount = grouped(value, 2);
    amount
        .strip_prefix('-')
        .map_or_else(|| format!("${amount}"), |abs| format!("-${abs}"))
}

/// Day precision for midnight values, minutes otherwise
#[must_use]
pub fn date(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%d %b %Y").to_string()
    } else {
        value.format("%d %b %Y %H:%M").to_string()
    }
}
