//! Rounding helpers shared by generation and reporting.
//!
//! Two rounding families are in use and they are not interchangeable:
//! [`round_half_up`] rounds ties toward positive infinity (so `-2.5` becomes
//! `-2`), while [`to_fixed`] rounds the exact binary value to a number of
//! decimal places with exact ties going away from zero.

/// Rounds to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to one decimal place with [`round_half_up`] semantics.
pub fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Rounds the exact binary value of `value` to `digits` decimal places.
/// A value exactly halfway between two candidates rounds away from zero
/// (`0.25` to one place is `0.3`), not to even.
pub fn to_fixed(value: f64, digits: usize) -> f64 {
    let nearest: f64 = format!("{:.*}", digits, value).parse().unwrap_or(value);
    if !is_decimal_tie(value, digits) || nearest.abs() > value.abs() {
        return nearest;
    }
    let unit = 10f64.powi(-(digits as i32));
    format!("{:.*}", digits, nearest + unit.copysign(value))
        .parse()
        .unwrap_or(nearest)
}

/// Whether the exact binary value sits halfway between two `digits`-place
/// decimals. A dyadic `m / 2^k` has exactly `k` fractional decimal digits,
/// so only values that are whole multiples of `2^-(digits + 1)` can tie.
fn is_decimal_tie(value: f64, digits: usize) -> bool {
    let places = i32::try_from(digits + 1).unwrap_or(i32::MAX);
    if (value * 2f64.powi(places)).fract() != 0.0 {
        return false;
    }
    format!("{:.*}", digits + 1, value).ends_with('5')
}

/// Clamps into `[min, max]`, applying the lower bound first.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
