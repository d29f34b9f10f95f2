mod cash_flow;
mod cursor;
mod operator;
mod tvm;

pub use cash_flow::CashFlowSchedule;
pub use cursor::WorksheetCursor;
pub use operator::Operator;
pub use tvm::{Timing, TvmField, TvmState};
