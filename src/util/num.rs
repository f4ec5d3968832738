/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Number of bits in an `int`; shift amounts must be below this.
pub const INT_BITS: i64 = 64;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use yapl::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` to `i64`, truncating toward zero.
///
/// ## Errors
/// Returns `Err(error)` for NaN, infinities and values whose integer part does
/// not fit in an `i64`.
///
/// ## Example
/// ```
/// use yapl::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(-2.75, ()), Ok(-2));
/// assert!(f64_to_i64_truncated(f64::NAN, ()).is_err());
/// assert!(f64_to_i64_truncated(1e20, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() {
        return Err(error);
    }
    let truncated = value.trunc();
    // i64::MAX rounds up to 2^63 as an f64, so the upper bound is exclusive.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(truncated as i64)
}

/// Converts an `i64` code point into a `char`.
///
/// ## Errors
/// Returns `Err(error)` for negative values, values above `char::MAX` and
/// surrogate code points.
pub fn i64_to_char_checked<E>(value: i64, error: E) -> Result<char, E> {
    u32::try_from(value).ok().and_then(char::from_u32).ok_or(error)
}

/// Validates a shift amount for a 64-bit integer.
///
/// ## Errors
/// Returns `Err(error)` unless `0 <= value < 64`.
pub fn shift_amount_checked<E>(value: i64, error: E) -> Result<u32, E> {
    if !(0..INT_BITS).contains(&value) {
        return Err(error);
    }
    u32::try_from(value).map_err(|_| error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_conversion_rejects_surrogates_and_negatives() {
        assert_eq!(i64_to_char_checked(97, ()), Ok('a'));
        assert!(i64_to_char_checked(0xD800, ()).is_err());
        assert!(i64_to_char_checked(-1, ()).is_err());
    }

    #[test]
    fn shift_amount_bounds() {
        assert_eq!(shift_amount_checked(0, ()), Ok(0));
        assert_eq!(shift_amount_checked(63, ()), Ok(63));
        assert!(shift_amount_checked(64, ()).is_err());
        assert!(shift_amount_checked(-1, ()).is_err());
    }

    #[test]
    fn truncation_toward_zero() {
        assert_eq!(f64_to_i64_truncated(3.9, ()), Ok(3));
        assert_eq!(f64_to_i64_truncated(-3.9, ()), Ok(-3));
    }
}
