//! Monetary rounding and formatting helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("114.8292").unwrap()), Decimal::from_str("114.83").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.005").unwrap()), Decimal::from_str("0.01").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage (e.g. `2.0` for 2%) to an amount, rounded to cents.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round_money(amount * percent / Decimal::ONE_HUNDRED)
}

/// Formats an amount as Brazilian reais: `R$ 1.234,56`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::format_brl;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_brl(Decimal::from_str("1234.5").unwrap()), "R$ 1.234,50");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_money(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (integral, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (i, ch) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("R$ {}{},{}", sign, grouped, fraction)
}
