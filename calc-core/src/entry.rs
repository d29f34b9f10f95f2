//! Keystroke accumulation into the displayed number.
//!
//! The entry buffer owns the raw digit string being typed. The numeric
//! value is always a derived projection, `quantize8` of the parsed text
//! with unparseable text mapping to 0, recomputed on every mutation. The
//! text drives editing; the value drives every computation.

use thiserror::Error;

use crate::calculations::quantize::quantize8;

/// Errors raised by the entry buffer.
///
/// Numeric trouble never lands here: unparseable text silently becomes 0
/// and NaN propagates as a value. Feeding a non-digit character into a
/// digit transition is a caller bug and fails loudly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// The character handed to a digit transition was not `'0'..='9'`.
    #[error("not a digit key: {0:?}")]
    InvalidDigit(char),
}

/// The number currently being typed or displayed.
///
/// # Examples
///
/// ```
/// use calc_core::EntryBuffer;
///
/// let mut entry = EntryBuffer::new();
/// entry.push_digit('1').unwrap();
/// entry.push_digit('2').unwrap();
/// entry.push_decimal();
/// entry.push_digit('5').unwrap();
///
/// assert_eq!(entry.raw(), "12.5");
/// assert_eq!(entry.value(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EntryBuffer {
    raw: String,
    value: f64,
}

impl Default for EntryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self {
            raw: "0".to_string(),
            value: 0.0,
        }
    }

    /// The raw digit string being edited.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The quantized numeric projection of the raw text.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Appends a digit, replacing a bare leading zero.
    pub fn push_digit(
        &mut self,
        digit: char,
    ) -> Result<(), EntryError> {
        if !digit.is_ascii_digit() {
            return Err(EntryError::InvalidDigit(digit));
        }
        if self.raw == "0" {
            self.raw.clear();
        }
        self.raw.push(digit);
        self.sync();
        Ok(())
    }

    /// Starts a fresh operand with `digit`, discarding the previous text.
    ///
    /// Used by the session when the displayed number came from an operator
    /// press or a computed result, so the next digit must not append to it.
    pub fn begin_with(
        &mut self,
        digit: char,
    ) -> Result<(), EntryError> {
        if !digit.is_ascii_digit() {
            return Err(EntryError::InvalidDigit(digit));
        }
        self.raw.clear();
        self.raw.push(digit);
        self.sync();
        Ok(())
    }

    /// Appends the decimal point; a second press is a no-op.
    pub fn push_decimal(&mut self) {
        if !self.raw.contains('.') {
            self.raw.push('.');
            self.sync();
        }
    }

    /// Drops the last typed character, resetting to `"0"` when emptied.
    pub fn backspace(&mut self) {
        self.raw.pop();
        if self.raw.is_empty() {
            self.raw.push('0');
        }
        self.sync();
    }

    /// Negates the value and re-derives the canonical text.
    ///
    /// Going through [`set_value`](Self::set_value) also normalizes any
    /// malformed intermediate text such as a trailing decimal point.
    pub fn toggle_sign(&mut self) {
        self.set_value(-self.value);
    }

    /// Forces the buffer to a computed value and its canonical string.
    ///
    /// Every result (chain fold, TVM solve, NPV/IRR, memory recall)
    /// becomes the displayed, editable number through this path. A NaN
    /// sentinel is stored as-is; its canonical text re-parses to NaN, so
    /// the derived-value invariant still holds.
    pub fn set_value(
        &mut self,
        value: f64,
    ) {
        self.value = quantize8(value);
        self.raw = self.value.to_string();
    }

    /// Resets the current entry to `"0"` without touching anything else.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.raw.push('0');
        self.sync();
    }

    /// Recomputes the value projection from the raw text.
    fn sync(&mut self) {
        let parsed = self.raw.parse::<f64>().unwrap_or(0.0);
        self.value = quantize8(parsed);
    }
}
