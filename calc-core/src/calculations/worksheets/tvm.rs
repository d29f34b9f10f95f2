//! Time-value-of-money worksheet solver.
//!
//! Given four of the five registers {N, I/Y, PV, PMT, FV} plus the payment
//! and compounding frequencies and the annuity timing, solves the fifth via
//! the closed-form annuity formulas:
//!
//! | Target | Formula |
//! |--------|---------|
//! | FV     | `PV·(1+r)^n + PMT·af(r, n)` |
//! | PV     | `(FV − PMT·af(r, n)) / (1+r)^n` |
//! | PMT    | `(FV − PV·(1+r)^n) / af(r, n)` |
//!
//! where `r` is the periodic rate, `n` the total number of compounding
//! periods, and `af` the annuity factor (multiplied by `1+r` for an annuity
//! due). Every intermediate and final value is quantized to the internal
//! register resolution.
//!
//! The solver never chooses its own target: the worksheet cursor does.
//! Solving for N or I/Y is not offered by the device, so those targets are
//! a loud precondition error rather than a silent fallback.

use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::quantize::quantize8;
use crate::models::{Timing, TvmField, TvmState};

/// Errors raised by the TVM solver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TvmSolveError {
    /// The requested register has no closed-form solver on this device.
    #[error("cannot solve for {0}")]
    UnsupportedTarget(TvmField),
}

/// The interest rate per compounding period: `(I/Y ÷ 100) ÷ C/Y`.
pub fn periodic_rate(state: &TvmState) -> f64 {
    quantize8((state.interest_per_year / 100.0) / state.compounding_per_year as f64)
}

/// The total number of compounding periods: `N · (P/Y ÷ C/Y)`.
pub fn total_periods(state: &TvmState) -> f64 {
    quantize8(state.periods * (state.payments_per_year as f64 / state.compounding_per_year as f64))
}

/// The present-value multiplier for a level payment stream.
///
/// `(1 − (1+r)^(−n)) / r`, multiplied by `(1+r)` for an annuity due. A zero
/// rate makes the quotient 0/0 and the factor NaN; the sentinel propagates
/// through the solve result per the quantizer's NaN contract.
pub fn annuity_factor(
    r: f64,
    n: f64,
    timing: Timing,
) -> f64 {
    if r == 0.0 {
        warn!("annuity factor undefined at zero periodic rate; result is NaN");
    }
    let mut factor = quantize8((1.0 - (1.0 + r).powf(-n)) / r);
    if timing == Timing::Begin {
        factor = quantize8(factor * (1.0 + r));
    }
    factor
}

/// Solves the target register from the other four.
///
/// Returns the quantized result; the caller writes it into the state and
/// pushes it into the entry buffer as the displayed value.
///
/// # Errors
///
/// [`TvmSolveError::UnsupportedTarget`] for N and I/Y.
///
/// # Examples
///
/// ```
/// use calc_core::calculations::worksheets::tvm::solve;
/// use calc_core::{TvmField, TvmState};
///
/// // $1,000 paid out today at 6% nominal, monthly, for 12 months.
/// let state = TvmState {
///     periods: 12.0,
///     interest_per_year: 6.0,
///     present_value: -1000.0,
///     payments_per_year: 12,
///     compounding_per_year: 12,
///     ..TvmState::default()
/// };
///
/// let fv = solve(&state, TvmField::FutureValue).unwrap();
/// assert!((fv + 1061.67781186).abs() < 1e-6);
/// ```
pub fn solve(
    state: &TvmState,
    target: TvmField,
) -> Result<f64, TvmSolveError> {
    let r = periodic_rate(state);
    let n = total_periods(state);
    debug!(register = %target, r, n, "solving TVM register");

    let result = match target {
        TvmField::FutureValue => quantize8(
            state.present_value * (1.0 + r).powf(n)
                + state.payment * annuity_factor(r, n, state.timing),
        ),
        TvmField::PresentValue => quantize8(
            (state.future_value - state.payment * annuity_factor(r, n, state.timing))
                / (1.0 + r).powf(n),
        ),
        TvmField::Payment => quantize8(
            (state.future_value - state.present_value * (1.0 + r).powf(n))
                / annuity_factor(r, n, state.timing),
        ),
        TvmField::Periods | TvmField::InterestPerYear => {
            return Err(TvmSolveError::UnsupportedTarget(target));
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn monthly_loan() -> TvmState {
        TvmState {
            periods: 12.0,
            interest_per_year: 6.0,
            present_value: -1000.0,
            payments_per_year: 12,
            compounding_per_year: 12,
            ..TvmState::default()
        }
    }

    // =========================================================================
    // helper tests
    // =========================================================================

    #[test]
    fn periodic_rate_divides_by_compounding_frequency() {
        let state = monthly_loan();

        assert_eq!(periodic_rate(&state), 0.005);
    }

    #[test]
    fn total_periods_scales_by_frequency_ratio() {
        let mut state = monthly_loan();
        state.payments_per_year = 12;
        state.compounding_per_year = 4;

        assert_eq!(total_periods(&state), 36.0);
    }

    #[test]
    fn annuity_factor_due_is_ordinary_times_one_plus_rate() {
        let ordinary = annuity_factor(0.005, 12.0, Timing::End);
        let due = annuity_factor(0.005, 12.0, Timing::Begin);

        assert!((due - quantize8(ordinary * 1.005)).abs() < 1e-12);
    }

    #[test]
    fn annuity_factor_at_zero_rate_is_nan() {
        assert!(annuity_factor(0.0, 12.0, Timing::End).is_nan());
    }

    // =========================================================================
    // solve tests
    // =========================================================================

    #[test]
    fn solve_future_value_of_lump_sum() {
        let state = monthly_loan();

        let fv = solve(&state, TvmField::FutureValue).unwrap();

        // -1000 grows to -1000 · 1.005^12.
        assert!((fv + 1061.67781186).abs() < 1e-6);
    }

    #[test]
    fn present_value_round_trips_through_future_value() {
        let mut state = monthly_loan();

        let fv = solve(&state, TvmField::FutureValue).unwrap();
        state.future_value = fv;
        state.present_value = 0.0;
        let pv = solve(&state, TvmField::PresentValue).unwrap();

        assert!((pv - (-1000.0)).abs() < 1e-6);
    }

    #[test]
    fn solved_payment_satisfies_the_future_value_identity() {
        let mut state = monthly_loan();
        state.future_value = 0.0;

        let pmt = solve(&state, TvmField::Payment).unwrap();
        state.payment = pmt;
        let fv = solve(&state, TvmField::FutureValue).unwrap();

        // PMT was solved so that PV·(1+r)^n + PMT·af lands on FV = 0.
        assert!(pmt > 0.0);
        assert!(fv.abs() < 1e-6);
    }

    #[test]
    fn begin_timing_scales_the_annuity_leg() {
        let mut state = monthly_loan();
        state.present_value = 0.0;
        state.payment = 100.0;

        let fv_end = solve(&state, TvmField::FutureValue).unwrap();
        state.timing = Timing::Begin;
        let fv_begin = solve(&state, TvmField::FutureValue).unwrap();

        let r = periodic_rate(&state);
        assert!((fv_begin - fv_end * (1.0 + r)).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_with_payment_propagates_nan() {
        let state = TvmState {
            periods: 12.0,
            payment: 100.0,
            ..TvmState::default()
        };

        let fv = solve(&state, TvmField::FutureValue).unwrap();

        assert!(fv.is_nan());
    }

    #[test]
    fn solving_periods_or_rate_is_a_loud_error() {
        let state = monthly_loan();

        assert_eq!(
            solve(&state, TvmField::Periods),
            Err(TvmSolveError::UnsupportedTarget(TvmField::Periods))
        );
        assert_eq!(
            solve(&state, TvmField::InterestPerYear),
            Err(TvmSolveError::UnsupportedTarget(TvmField::InterestPerYear))
        );
    }
}
