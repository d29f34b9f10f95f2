use serde::{Deserialize, Serialize};

use crate::calculations::quantize::quantize8;

/// The four binary operators of the arithmetic chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to `(a, b)` and quantizes the result to the
    /// internal register resolution.
    ///
    /// Division by zero yields NaN rather than panicking; the sentinel
    /// propagates through storage until displayed or cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_core::Operator;
    ///
    /// assert_eq!(Operator::Add.apply(5.0, 3.0), 8.0);
    /// assert!(Operator::Divide.apply(8.0, 0.0).is_nan());
    /// ```
    pub fn apply(
        &self,
        a: f64,
        b: f64,
    ) -> f64 {
        let raw = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    f64::NAN
                } else {
                    a / b
                }
            }
        };
        quantize8(raw)
    }
}
