use serde::{Deserialize, Serialize};

use crate::calculations::quantize::quantize8;

/// An ordered series of period cash flows.
///
/// Index 0 is the initial outlay (typically negative) and index `t >= 1`
/// the flow at the end of period `t`. Every flow is quantized to the
/// internal register resolution on admission, and the series is only ever
/// replaced wholesale, never edited in place.
///
/// # Examples
///
/// ```
/// use calc_core::CashFlowSchedule;
///
/// let schedule = CashFlowSchedule::new([-1000.0, 500.0, 500.0, 500.0]);
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.flows()[0], -1000.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    flows: Vec<f64>,
}

impl CashFlowSchedule {
    pub fn new<I>(flows: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            flows: flows.into_iter().map(quantize8).collect(),
        }
    }

    /// Replaces the whole series.
    pub fn replace<I>(
        &mut self,
        flows: I,
    ) where
        I: IntoIterator<Item = f64>,
    {
        self.flows = flows.into_iter().map(quantize8).collect();
    }

    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
