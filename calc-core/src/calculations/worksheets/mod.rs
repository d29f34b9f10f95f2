//! Worksheet calculations: the financial routines behind the CPT, NPV and
//! IRR keys, organized by the worksheet a user navigates on the device.

pub mod cash_flow;
pub mod tvm;

pub use cash_flow::{IrrOutcome, internal_rate_of_return, net_present_value};
pub use tvm::{TvmSolveError, annuity_factor, periodic_rate, solve, total_periods};
