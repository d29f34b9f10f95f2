//! Numeric core of a pocket financial calculator.
//!
//! This crate implements the state machine behind the keys: digit entry into
//! a raw text buffer with a derived quantized value, a pending-operator
//! arithmetic chain with left-to-right evaluation, a time-value-of-money
//! worksheet solver, a cash-flow NPV/IRR engine, and display formatting
//! (compact magnitude-suffixed numerals and an English words reading).
//!
//! All register values are quantized to 8 decimal digits for storage and 4
//! for display, emulating a physical calculator's finite register width.
//! Division by zero and a zero periodic rate produce a NaN sentinel that is
//! preserved through quantization and storage and rendered as an error
//! indicator, never a numeric string.
//!
//! The button layer is an external caller: it translates key presses into
//! [`Key`] values and feeds them to a [`CalculatorSession`], which invokes a
//! render observer after every state-mutating operation.

pub mod calculations;
pub mod chain;
pub mod display;
pub mod entry;
pub mod models;
pub mod session;

pub use calculations::quantize::{quantize4, quantize8};
pub use calculations::worksheets::cash_flow::IrrOutcome;
pub use calculations::worksheets::tvm::TvmSolveError;
pub use chain::ChainState;
pub use entry::{EntryBuffer, EntryError};
pub use models::*;
pub use session::{CalculatorSession, DisplayFrame, Key, RenderTarget, SessionError};
