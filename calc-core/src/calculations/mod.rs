//! Pure numeric routines of the calculator core.
//!
//! This module holds the quantizer shared by every register write and the
//! worksheet calculations (time-value-of-money and cash-flow analysis),
//! organized by the worksheets a user navigates on the device.

pub mod quantize;
pub mod worksheets;

pub use worksheets::cash_flow::{IrrOutcome, internal_rate_of_return, net_present_value};
pub use worksheets::tvm::{TvmSolveError, annuity_factor, periodic_rate, solve, total_periods};
