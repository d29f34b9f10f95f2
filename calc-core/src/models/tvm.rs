use serde::{Deserialize, Serialize};

/// Payment timing for the annuity stream.
///
/// `End` is an ordinary annuity (payments at the end of each period);
/// `Begin` is an annuity due (payments at the start, the BGN indicator on
/// the device).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timing {
    #[default]
    End,
    Begin,
}

impl Timing {
    pub fn toggled(self) -> Self {
        match self {
            Self::End => Self::Begin,
            Self::Begin => Self::End,
        }
    }
}

/// The five registers of the TVM worksheet, in worksheet row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvmField {
    Periods,
    InterestPerYear,
    PresentValue,
    Payment,
    FutureValue,
}

impl TvmField {
    /// Worksheet row order, top to bottom.
    pub const ALL: [TvmField; 5] = [
        Self::Periods,
        Self::InterestPerYear,
        Self::PresentValue,
        Self::Payment,
        Self::FutureValue,
    ];

    /// The key label on the device face.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Periods => "N",
            Self::InterestPerYear => "I/Y",
            Self::PresentValue => "PV",
            Self::Payment => "PMT",
            Self::FutureValue => "FV",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "N" => Some(Self::Periods),
            "I/Y" => Some(Self::InterestPerYear),
            "PV" => Some(Self::PresentValue),
            "PMT" => Some(Self::Payment),
            "FV" => Some(Self::FutureValue),
            _ => None,
        }
    }
}

impl std::fmt::Display for TvmField {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One consistent time-value-of-money scenario.
///
/// Exactly one of the five monetary/period fields is the unknown at any
/// compute action; the other four must hold user-entered or previously
/// computed values. Payment and compounding frequencies default to annual
/// and timing to an ordinary annuity, matching the device's reset state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvmState {
    /// Number of payments (N).
    pub periods: f64,
    /// Nominal annual interest rate in percent (I/Y).
    pub interest_per_year: f64,
    /// Present value (PV).
    pub present_value: f64,
    /// Periodic payment (PMT).
    pub payment: f64,
    /// Future value (FV).
    pub future_value: f64,
    /// Payments per year (P/Y).
    pub payments_per_year: u32,
    /// Compounding periods per year (C/Y).
    pub compounding_per_year: u32,
    /// Ordinary annuity or annuity due.
    pub timing: Timing,
}

impl Default for TvmState {
    fn default() -> Self {
        Self {
            periods: 0.0,
            interest_per_year: 0.0,
            present_value: 0.0,
            payment: 0.0,
            future_value: 0.0,
            payments_per_year: 1,
            compounding_per_year: 1,
            timing: Timing::End,
        }
    }
}

impl TvmState {
    pub fn get(
        &self,
        field: TvmField,
    ) -> f64 {
        match field {
            TvmField::Periods => self.periods,
            TvmField::InterestPerYear => self.interest_per_year,
            TvmField::PresentValue => self.present_value,
            TvmField::Payment => self.payment,
            TvmField::FutureValue => self.future_value,
        }
    }

    pub fn set(
        &mut self,
        field: TvmField,
        value: f64,
    ) {
        match field {
            TvmField::Periods => self.periods = value,
            TvmField::InterestPerYear => self.interest_per_year = value,
            TvmField::PresentValue => self.present_value = value,
            TvmField::Payment => self.payment = value,
            TvmField::FutureValue => self.future_value = value,
        }
    }
}
