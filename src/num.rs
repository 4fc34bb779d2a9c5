//! Float helpers that work without `std`.

use crate::{ConvertResult, TimeSpanError};

/// Rounds to the nearest integer, ties away from zero.
pub(crate) fn round_to_i64(value: f64) -> ConvertResult<i64> {
    let rounded = if value >= 0. { value + 0.5 } else { value - 0.5 };
    if !rounded.is_finite() || rounded >= i64::MAX as f64 || rounded <= i64::MIN as f64 {
        return Err(TimeSpanError::Overflow);
    }
    Ok(rounded as i64)
}

/// Rounds to `digits` decimal places.
pub(crate) fn round_to_digits(value: f64, digits: usize) -> ConvertResult<f64> {
    let scale = (0..digits).fold(1., |scale, _| scale * 10.);
    Ok(round_to_i64(value * scale)? as f64 / scale)
}

/// Integer part of `value`, truncated towards zero.
#[inline]
pub(crate) fn trunc(value: f64) -> f64 {
    (value as i64) as f64
}

/// Largest integer not greater than `value`.
#[inline]
pub(crate) fn floor(value: f64) -> f64 {
    let truncated = trunc(value);
    if truncated > value { truncated - 1. } else { truncated }
}

#[inline]
pub(crate) fn abs(value: f64) -> f64 {
    if value < 0. { -value } else { value }
}

/// `a + b`, or [`TimeSpanError::Overflow`]
#[inline]
pub(crate) fn add(a: i64, b: i64) -> ConvertResult<i64> {
    a.checked_add(b).ok_or(TimeSpanError::Overflow)
}

/// `a - b`, or [`TimeSpanError::Overflow`]
#[inline]
pub(crate) fn sub(a: i64, b: i64) -> ConvertResult<i64> {
    a.checked_sub(b).ok_or(TimeSpanError::Overflow)
}

/// `a * b`, or [`TimeSpanError::Overflow`]
#[inline]
pub(crate) fn mul(a: i64, b: i64) -> ConvertResult<i64> {
    a.checked_mul(b).ok_or(TimeSpanError::Overflow)
}

#[test]
fn rounds_half_away_from_zero() {
    use pretty_assertions::assert_eq;
    assert_eq!(round_to_i64(2.5), Ok(3));
    assert_eq!(round_to_i64(-2.5), Ok(-3));
    assert_eq!(round_to_i64(2.49), Ok(2));
    assert_eq!(round_to_i64(f64::MAX), Err(TimeSpanError::Overflow));
    assert_eq!(trunc(-1.75), -1.);
    assert_eq!(floor(-1.75), -2.);
    assert_eq!(floor(-2.), -2.);
    assert_eq!(floor(1.75), 1.);
    assert_eq!(round_to_digits(0.19791, 2), Ok(0.2));
    assert_eq!(round_to_digits(1.5, 0), Ok(2.));
    assert_eq!(abs(-0.25), 0.25);
    assert_eq!(add(i64::MAX, 1), Err(TimeSpanError::Overflow));
    assert_eq!(mul(4, 5), Ok(20));
}
