//! The calculator session: one device, one owner of all register state.
//!
//! A session owns the entry buffer, the arithmetic chain, the TVM worksheet
//! state and cursor, the cash-flow schedule, and the memory register. The
//! button layer translates each key press into a [`Key`] and hands it to
//! [`CalculatorSession::press`]; dispatch is an exhaustive match over the
//! closed key enumeration. Processing is strictly one event at a time, so
//! the session needs no locking and must not be re-entered.
//!
//! After every state-mutating operation the session invokes its render
//! observer with a [`DisplayFrame`]: the compact numeral, the words line,
//! and whether the annuity-due indicator is lit.

use thiserror::Error;
use tracing::debug;

use crate::calculations::worksheets::cash_flow::{
    IrrOutcome, internal_rate_of_return, net_present_value,
};
use crate::calculations::worksheets::tvm::{self, TvmSolveError};
use crate::chain::ChainState;
use crate::display::{format_compact, words};
use crate::entry::{EntryBuffer, EntryError};
use crate::models::{CashFlowSchedule, Operator, Timing, TvmField, TvmState, WorksheetCursor};

/// Errors a key press can raise.
///
/// These are caller bugs, not numeric conditions: numeric trouble travels
/// as the NaN sentinel and renders as the error indicator instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Solve(#[from] TvmSolveError),
}

/// One discrete input event, as translated by the button layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    Digit(char),
    Decimal,
    Backspace,
    ToggleSign,
    ClearEntry,
    ClearAll,
    Operator(Operator),
    Equals,
    Store,
    Recall,
    /// Move the worksheet cursor to the field and assign the displayed
    /// value to it, as the field keys on the device face do.
    Field(TvmField),
    /// Assign the displayed value to the cursor's field without moving.
    Enter,
    /// Solve the cursor's field from the other four.
    Compute,
    Up,
    Down,
    ToggleTiming,
    Irr,
    /// Compute NPV at the displayed value taken as a rate in percent.
    Npv,
}

/// What the observer receives after each operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Compact magnitude-suffixed numeral, or the error indicator.
    pub numeral: String,
    /// Long-form English reading of the same value.
    pub words: String,
    /// True when payments are timed at the start of each period (BGN).
    pub annuity_due: bool,
}

/// Render observer invoked after every state-mutating operation.
pub trait RenderTarget {
    fn render(
        &mut self,
        frame: &DisplayFrame,
    );
}

impl<F> RenderTarget for F
where
    F: FnMut(&DisplayFrame),
{
    fn render(
        &mut self,
        frame: &DisplayFrame,
    ) {
        self(frame)
    }
}

/// A single calculator instance.
///
/// Sessions are independent: all state lives on the instance, so tests and
/// embedders can run as many side by side as they like.
///
/// # Examples
///
/// ```
/// use calc_core::{CalculatorSession, Key, Operator};
///
/// let mut session = CalculatorSession::new();
/// for key in [
///     Key::Digit('5'),
///     Key::Operator(Operator::Add),
///     Key::Digit('3'),
///     Key::Operator(Operator::Subtract),
///     Key::Digit('2'),
///     Key::Equals,
/// ] {
///     session.press(key).unwrap();
/// }
///
/// assert_eq!(session.value(), 6.0);
/// ```
pub struct CalculatorSession {
    entry: EntryBuffer,
    chain: ChainState,
    tvm: TvmState,
    cursor: WorksheetCursor,
    cash_flows: CashFlowSchedule,
    memory: f64,
    /// Set after operators, equals, stores, and computed or recalled
    /// results: the next digit starts a fresh operand instead of appending.
    fresh_entry: bool,
    observer: Option<Box<dyn RenderTarget>>,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self {
            entry: EntryBuffer::new(),
            chain: ChainState::Idle,
            tvm: TvmState::default(),
            cursor: WorksheetCursor::default(),
            cash_flows: CashFlowSchedule::default(),
            memory: 0.0,
            fresh_entry: false,
            observer: None,
        }
    }

    /// Installs the render observer and immediately paints the current
    /// frame, like the initial render on power-up.
    pub fn set_observer(
        &mut self,
        observer: Box<dyn RenderTarget>,
    ) {
        self.observer = Some(observer);
        self.notify();
    }

    /// Dispatches one key press.
    pub fn press(
        &mut self,
        key: Key,
    ) -> Result<(), SessionError> {
        debug!(?key, "key press");
        match key {
            Key::Digit(d) => self.enter_digit(d)?,
            Key::Decimal => self.enter_decimal(),
            Key::Backspace => self.backspace(),
            Key::ToggleSign => self.toggle_sign(),
            Key::ClearEntry => self.clear_entry(),
            Key::ClearAll => self.clear_all(),
            Key::Operator(op) => self.press_operator(op),
            Key::Equals => self.press_equals(),
            Key::Store => self.store(),
            Key::Recall => self.recall(),
            Key::Field(field) => self.select_field(field),
            Key::Enter => self.assign_current(),
            Key::Compute => self.compute_field(self.cursor.field())?,
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::ToggleTiming => self.toggle_timing(),
            Key::Irr => {
                self.compute_irr();
            }
            Key::Npv => {
                let rate_percent = self.entry.value();
                self.compute_npv(rate_percent);
            }
        }
        Ok(())
    }

    // ---- entry keys ----

    pub fn enter_digit(
        &mut self,
        digit: char,
    ) -> Result<(), SessionError> {
        if self.fresh_entry {
            self.entry.begin_with(digit)?;
            self.fresh_entry = false;
        } else {
            self.entry.push_digit(digit)?;
        }
        self.chain.note_operand();
        self.notify();
        Ok(())
    }

    pub fn enter_decimal(&mut self) {
        if self.fresh_entry {
            self.entry.clear();
            self.fresh_entry = false;
        }
        self.entry.push_decimal();
        self.chain.note_operand();
        self.notify();
    }

    pub fn backspace(&mut self) {
        self.entry.backspace();
        self.fresh_entry = false;
        self.chain.note_operand();
        self.notify();
    }

    pub fn toggle_sign(&mut self) {
        self.entry.toggle_sign();
        self.notify();
    }

    /// Clears the current entry only; the chain keeps its accumulator and
    /// pending operator.
    pub fn clear_entry(&mut self) {
        self.entry.clear();
        self.fresh_entry = false;
        self.notify();
    }

    /// Clears the entry and the arithmetic chain back to power-up state.
    /// Worksheet registers, cash flows, and memory are untouched.
    pub fn clear_all(&mut self) {
        self.entry.clear();
        self.chain.reset();
        self.fresh_entry = false;
        self.notify();
    }

    // ---- arithmetic chain keys ----

    pub fn press_operator(
        &mut self,
        op: Operator,
    ) {
        if let Some(folded) = self.chain.press_operator(op, self.entry.value()) {
            self.entry.set_value(folded);
        }
        self.fresh_entry = true;
        self.notify();
    }

    pub fn press_equals(&mut self) {
        if let Some(result) = self.chain.press_equals(self.entry.value()) {
            self.entry.set_value(result);
        }
        self.fresh_entry = true;
        self.notify();
    }

    // ---- memory register ----

    pub fn store(&mut self) {
        self.memory = self.entry.value();
        self.fresh_entry = true;
        self.notify();
    }

    pub fn recall(&mut self) {
        let value = self.memory;
        self.show_result(value);
    }

    // ---- TVM worksheet ----

    /// Moves the cursor to `field` and assigns the displayed value to it.
    pub fn select_field(
        &mut self,
        field: TvmField,
    ) {
        self.cursor.move_to(field);
        self.set_tvm_field(field, self.entry.value());
    }

    /// Assigns the displayed value to the cursor's field.
    pub fn assign_current(&mut self) {
        self.set_tvm_field(self.cursor.field(), self.entry.value());
    }

    pub fn set_tvm_field(
        &mut self,
        field: TvmField,
        value: f64,
    ) {
        self.tvm.set(field, value);
        self.fresh_entry = true;
        self.notify();
    }

    /// Solves `field` from the other four registers and displays it.
    pub fn compute_field(
        &mut self,
        field: TvmField,
    ) -> Result<(), SessionError> {
        let solved = tvm::solve(&self.tvm, field)?;
        self.tvm.set(field, solved);
        self.show_result(solved);
        Ok(())
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up();
        self.notify();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down();
        self.notify();
    }

    pub fn toggle_timing(&mut self) {
        self.tvm.timing = self.tvm.timing.toggled();
        self.notify();
    }

    /// Sets the payment and compounding frequencies (P/Y and C/Y).
    ///
    /// A zero frequency is not rejected here: the resulting division by
    /// zero travels the numeric NaN/infinity path like any other
    /// out-of-range register value.
    pub fn set_frequencies(
        &mut self,
        payments_per_year: u32,
        compounding_per_year: u32,
    ) {
        self.tvm.payments_per_year = payments_per_year;
        self.tvm.compounding_per_year = compounding_per_year;
        self.notify();
    }

    // ---- cash-flow worksheet ----

    /// Replaces the cash-flow schedule wholesale; index 0 is the outlay.
    pub fn set_cash_flows<I>(
        &mut self,
        flows: I,
    ) where
        I: IntoIterator<Item = f64>,
    {
        self.cash_flows.replace(flows);
        self.notify();
    }

    /// NPV of the schedule at a rate in percent; the result becomes the
    /// displayed value.
    pub fn compute_npv(
        &mut self,
        rate_percent: f64,
    ) -> f64 {
        let npv = net_present_value(&self.cash_flows, rate_percent);
        self.show_result(npv);
        npv
    }

    /// IRR of the schedule; the best-effort rate becomes the displayed
    /// value whether or not the bisection converged.
    pub fn compute_irr(&mut self) -> IrrOutcome {
        let outcome = internal_rate_of_return(&self.cash_flows);
        self.show_result(outcome.rate_percent);
        outcome
    }

    // ---- read access ----

    /// The quantized value currently displayed.
    pub fn value(&self) -> f64 {
        self.entry.value()
    }

    /// The raw digit text currently being edited.
    pub fn raw(&self) -> &str {
        self.entry.raw()
    }

    pub fn tvm(&self) -> &TvmState {
        &self.tvm
    }

    pub fn cursor_field(&self) -> TvmField {
        self.cursor.field()
    }

    pub fn cash_flows(&self) -> &CashFlowSchedule {
        &self.cash_flows
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// The frame the observer would receive right now.
    pub fn frame(&self) -> DisplayFrame {
        let value = self.entry.value();
        DisplayFrame {
            numeral: format_compact(value),
            words: words(value),
            annuity_due: self.tvm.timing == Timing::Begin,
        }
    }

    /// Makes a computed value the displayed, editable number.
    fn show_result(
        &mut self,
        value: f64,
    ) {
        self.entry.set_value(value);
        self.fresh_entry = true;
        self.notify();
    }

    fn notify(&mut self) {
        let frame = self.frame();
        if let Some(observer) = self.observer.as_mut() {
            observer.render(&frame);
        }
    }
}
