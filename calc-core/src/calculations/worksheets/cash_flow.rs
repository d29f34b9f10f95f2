//! Cash-flow worksheet: net present value and internal rate of return.
//!
//! NPV accumulates the discounted flows with a quantize step after every
//! addition: per-step rounding, not a single final rounding. The register
//! only ever holds 8 decimal digits between key presses, so the rounding
//! point is observable in the last significant digit and is reproduced here
//! exactly.
//!
//! IRR is a bisection over the rate bracket `[-0.9999, 10]` with a fixed
//! iteration budget. The bracket assumes a single sign change; exhausting
//! the budget returns the last midpoint as a best-effort estimate rather
//! than failing, with the convergence flag carried alongside for callers
//! that care.

use tracing::warn;

use crate::calculations::quantize::quantize8;
use crate::models::CashFlowSchedule;

const IRR_RATE_LOW: f64 = -0.9999;
const IRR_RATE_HIGH: f64 = 10.0;
const IRR_MAX_ITERATIONS: u32 = 200;
const IRR_NPV_TOLERANCE: f64 = 1e-8;

/// Result of an IRR computation.
///
/// `rate_percent` is the device's answer either way; `converged` reports
/// whether the NPV tolerance was met before the iteration budget ran out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrOutcome {
    /// The rate as a percentage, quantized to the register resolution.
    pub rate_percent: f64,
    /// False when the iteration budget was exhausted first.
    pub converged: bool,
}

/// Net present value of the schedule at a discount rate given in percent.
///
/// # Examples
///
/// ```
/// use calc_core::CashFlowSchedule;
/// use calc_core::calculations::worksheets::cash_flow::net_present_value;
///
/// let schedule = CashFlowSchedule::new([-1000.0, 600.0, 600.0]);
///
/// // At rate zero, NPV is the plain sum of the flows.
/// assert_eq!(net_present_value(&schedule, 0.0), 200.0);
/// ```
pub fn net_present_value(
    schedule: &CashFlowSchedule,
    rate_percent: f64,
) -> f64 {
    let rate = quantize8(rate_percent / 100.0);
    npv_at_rate(schedule, rate)
}

/// Internal rate of return of the schedule, in percent.
///
/// Bisection over `[-0.9999, 10]`: the midpoint is quantized each
/// iteration, NPV is evaluated with the same per-step rounding as
/// [`net_present_value`], and the bracket narrows toward the root until
/// `|NPV| < 1e-8` or the budget of 200 iterations runs out. Exhaustion is
/// not an error: the last midpoint is returned with `converged = false`.
pub fn internal_rate_of_return(schedule: &CashFlowSchedule) -> IrrOutcome {
    let mut low = IRR_RATE_LOW;
    let mut high = IRR_RATE_HIGH;
    let mut mid = 0.0;

    for _ in 0..IRR_MAX_ITERATIONS {
        mid = quantize8((low + high) / 2.0);
        let npv = npv_at_rate(schedule, mid);
        if npv.abs() < IRR_NPV_TOLERANCE {
            return IrrOutcome {
                rate_percent: quantize8(mid * 100.0),
                converged: true,
            };
        }
        if npv > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    warn!(
        rate_percent = quantize8(mid * 100.0),
        "IRR bisection exhausted its iteration budget; returning best effort"
    );
    IrrOutcome {
        rate_percent: quantize8(mid * 100.0),
        converged: false,
    }
}

/// Discounted sum at a fractional rate, quantized after each addition.
fn npv_at_rate(
    schedule: &CashFlowSchedule,
    rate: f64,
) -> f64 {
    let mut npv = 0.0;
    for (t, flow) in schedule.flows().iter().enumerate() {
        npv = quantize8(npv + flow / (1.0 + rate).powf(t as f64));
    }
    npv
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // net_present_value tests
    // =========================================================================

    #[test]
    fn npv_at_rate_zero_is_the_plain_sum() {
        let schedule = CashFlowSchedule::new([-1000.0, 500.0, 500.0, 500.0]);

        assert_eq!(net_present_value(&schedule, 0.0), 500.0);
    }

    #[test]
    fn npv_discounts_later_flows_more() {
        let schedule = CashFlowSchedule::new([-1000.0, 600.0, 600.0]);

        let npv = net_present_value(&schedule, 10.0);

        // -1000 + 600/1.1 + 600/1.21, register-rounded at each step.
        assert_eq!(npv, 41.32231405);
    }

    #[test]
    fn npv_of_outlay_only_is_the_outlay() {
        let schedule = CashFlowSchedule::new([-250.0]);

        assert_eq!(net_present_value(&schedule, 12.0), -250.0);
    }

    #[test]
    fn npv_of_empty_schedule_is_zero() {
        let schedule = CashFlowSchedule::default();

        assert_eq!(net_present_value(&schedule, 5.0), 0.0);
    }

    // =========================================================================
    // internal_rate_of_return tests
    // =========================================================================

    #[test]
    fn irr_root_zeroes_the_npv() {
        let schedule = CashFlowSchedule::new([-1000.0, 500.0, 500.0, 500.0]);

        let outcome = internal_rate_of_return(&schedule);

        assert!(outcome.rate_percent > 23.3751 && outcome.rate_percent < 23.3753);
        let residual = net_present_value(&schedule, outcome.rate_percent);
        assert!(
            residual.abs() < 1e-5,
            "NPV at IRR was {residual}, rate {}",
            outcome.rate_percent
        );
    }

    #[test]
    fn irr_reports_exhaustion_when_no_grid_rate_zeroes_the_register() {
        // Per-step rounding keeps NPV on a 1e-8 grid, so the tolerance is
        // only met when a bracketed rate lands the register exactly on
        // zero; this series has no such rate and runs the full budget.
        let schedule = CashFlowSchedule::new([-1000.0, 500.0, 500.0, 500.0]);

        let outcome = internal_rate_of_return(&schedule);

        assert!(!outcome.converged);
    }

    #[test]
    fn irr_of_breakeven_series_is_near_zero_percent() {
        let schedule = CashFlowSchedule::new([-1000.0, 1000.0]);

        let outcome = internal_rate_of_return(&schedule);

        assert!(outcome.rate_percent.abs() < 1e-4);
    }

    #[test]
    fn irr_stays_inside_the_bracket() {
        let schedule = CashFlowSchedule::new([-100.0, 500.0]);

        let outcome = internal_rate_of_return(&schedule);

        // 400% return, well inside the [-99.99%, 1000%] bracket.
        assert!(outcome.rate_percent > 399.0 && outcome.rate_percent < 401.0);
    }
}
