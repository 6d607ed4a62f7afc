//! Numeric conversion helpers centralizing money and ratio casts.

use num_traits::cast::{FromPrimitive, ToPrimitive, cast};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Convert a Fibonacci multiplier to a decimal, saturating past the decimal range.
#[must_use]
pub fn multiplier_to_decimal(value: u128) -> Decimal {
    Decimal::from_u128(value).unwrap_or(Decimal::MAX)
}

/// Share of `part` in `whole` as a percentage, returning 0 when `whole` is 0.
#[must_use]
pub fn count_pct(part: u64, whole: u64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * HUNDRED / Decimal::from(whole)
}

/// Percentage change from `base` to `value`, returning 0 for a zero base.
///
/// Saturates at `Decimal::MAX` when the ratio leaves the decimal range.
#[must_use]
pub fn change_pct(value: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(base)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|change| change.checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Downcast a decimal to f64 for descriptive statistics, 0.0 when unrepresentable.
#[must_use]
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert u32 exponents to the i32 `powi` wants, clamping at `i32::MAX`.
#[must_use]
pub fn exponent_from_u32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
