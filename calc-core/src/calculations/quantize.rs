//! Fixed-resolution rounding shared by every register write.
//!
//! The calculator emulates a physical device whose registers hold a fixed
//! number of decimal digits: 8 for internal storage (entry value, chain
//! results, worksheet results) and 4 for the final display numeral. Every
//! value entering a register passes through [`quantize8`]; the display
//! formatter applies [`quantize4`] last.

/// Rounds a value to 8 decimal digits, the internal register resolution.
///
/// NaN and infinities pass through unchanged: a NaN produced by division by
/// zero is a sentinel that must survive storage until it is displayed or
/// cleared, never silently coerced to a number.
///
/// Ties round away from zero per [`f64::round`]. A negative value landing
/// exactly on a half-ulp at the 8th digit therefore rounds down where a
/// ties-toward-positive rule would round up.
///
/// # Examples
///
/// ```
/// use calc_core::quantize8;
///
/// assert_eq!(quantize8(1.0 / 3.0), 0.33333333);
/// assert_eq!(quantize8(quantize8(1.0 / 3.0)), 0.33333333); // idempotent
/// assert!(quantize8(f64::NAN).is_nan());
/// ```
pub fn quantize8(x: f64) -> f64 {
    (x * 1e8).round() / 1e8
}

/// Rounds a value to 4 decimal digits, the display resolution.
///
/// # Examples
///
/// ```
/// use calc_core::quantize4;
///
/// assert_eq!(quantize4(2.71828), 2.7183);
/// assert_eq!(quantize4(-2.71828), -2.7183);
/// ```
pub fn quantize4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // quantize8 tests
    // =========================================================================

    #[test]
    fn quantize8_truncates_excess_digits() {
        let result = quantize8(1.0 / 3.0);

        assert_eq!(result, 0.33333333);
    }

    #[test]
    fn quantize8_is_idempotent() {
        let once = quantize8(std::f64::consts::PI);
        let twice = quantize8(once);

        assert_eq!(once, twice);
    }

    #[test]
    fn quantize8_preserves_exact_values() {
        let result = quantize8(123.5);

        assert_eq!(result, 123.5);
    }

    #[test]
    fn quantize8_handles_negative_values() {
        let result = quantize8(-1.0 / 3.0);

        assert_eq!(result, -0.33333333);
    }

    #[test]
    fn quantize8_handles_zero() {
        let result = quantize8(0.0);

        assert_eq!(result, 0.0);
    }

    #[test]
    fn quantize8_propagates_nan() {
        let result = quantize8(f64::NAN);

        assert!(result.is_nan());
    }

    #[test]
    fn quantize8_does_not_introduce_nan_for_finite_input() {
        for x in [0.0, 1e-9, -1e-9, 1234.5678, -99999.99999, 1e15] {
            assert!(quantize8(x).is_finite(), "quantize8({x}) was not finite");
        }
    }

    // =========================================================================
    // quantize4 tests
    // =========================================================================

    #[test]
    fn quantize4_rounds_to_display_resolution() {
        let result = quantize4(2.71828);

        assert_eq!(result, 2.7183);
    }

    #[test]
    fn quantize4_is_idempotent() {
        let once = quantize4(std::f64::consts::E);
        let twice = quantize4(once);

        assert_eq!(once, twice);
    }

    #[test]
    fn quantize4_handles_negative_values() {
        let result = quantize4(-2.71828);

        assert_eq!(result, -2.7183);
    }

    #[test]
    fn quantize4_propagates_nan() {
        assert!(quantize4(f64::NAN).is_nan());
    }
}
