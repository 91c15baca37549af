//! Whole-number rounding shared by every statistic.
//!
//! All derived figures round half away from zero, so 88.5 becomes 89 and
//! -0.5 becomes -1.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal to the nearest whole number, halves away from zero.
///
/// Values outside the `i64` range saturate.
///
/// # Examples
///
/// ```
/// use report_engine::statistics::round_whole;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_whole(Decimal::new(885, 1)), 89);
/// assert_eq!(round_whole(Decimal::new(884, 1)), 88);
/// ```
pub fn round_whole(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .to_i64()
        .unwrap_or_else(|| saturated(rounded.is_sign_negative()))
}

/// The `i64` bound a figure saturates to when it cannot be represented.
pub(crate) fn saturated(negative: bool) -> i64 {
    if negative { i64::MIN } else { i64::MAX }
}

/// Expresses `part` as a whole-number percentage of `whole`.
///
/// Returns 0 when `whole` is zero. Ratios too large for `Decimal` saturate.
///
/// # Examples
///
/// ```
/// use report_engine::statistics::percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentage(Decimal::from(1), Decimal::from(3)), 33);
/// assert_eq!(percentage(Decimal::from(2), Decimal::from(3)), 67);
/// assert_eq!(percentage(Decimal::from(5), Decimal::ZERO), 0);
/// ```
pub fn percentage(part: Decimal, whole: Decimal) -> i64 {
    if whole.is_zero() {
        return 0;
    }
    let ratio = part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        });

    match ratio {
        Some(ratio) => round_whole(ratio),
        None => saturated(part.is_sign_negative() != whole.is_sign_negative()),
    }
}
