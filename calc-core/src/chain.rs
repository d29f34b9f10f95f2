//! The pending-operator arithmetic chain.
//!
//! A chain like `5 + 3 - 2 =` resolves strictly left to right: each
//! operator press folds the *previous* pending operator against the operand
//! just typed before taking over as the new pending operator. Skipping that
//! fold is the classic chained-evaluation bug (it mis-evaluates
//! `5 + 3 - 2 =`), so the state is a tagged variant that makes the decision
//! explicit rather than a scatter of booleans.

use crate::models::Operator;

/// State of the arithmetic chain.
///
/// `Idle` is both the initial and the terminal state: no accumulator, no
/// pending operator. `Pending` holds the running accumulator, the operator
/// waiting for its right-hand operand, and whether the user has typed a
/// fresh operand since the operator was pressed (`operand_seen`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ChainState {
    #[default]
    Idle,
    Pending {
        accumulator: f64,
        op: Operator,
        operand_seen: bool,
    },
}

impl ChainState {
    /// Records that a digit or decimal edit produced a fresh operand.
    pub fn note_operand(&mut self) {
        if let Self::Pending { operand_seen, .. } = self {
            *operand_seen = true;
        }
    }

    /// True immediately after an operator press, until a fresh operand is
    /// typed. The session uses this to start a new entry on the next digit.
    pub fn awaiting_operand(&self) -> bool {
        matches!(
            self,
            Self::Pending {
                operand_seen: false,
                ..
            }
        )
    }

    /// Handles an operator key against the currently displayed value.
    ///
    /// Returns the folded value when the press resolved the previous
    /// pending operator, so the caller can display it; `None` when the
    /// press only captured the first operand or replaced the pending
    /// operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_core::{ChainState, Operator};
    ///
    /// let mut chain = ChainState::default();
    /// assert_eq!(chain.press_operator(Operator::Add, 5.0), None);
    /// chain.note_operand();
    /// // Pressing '-' resolves the pending '+' against (5, 3).
    /// assert_eq!(chain.press_operator(Operator::Subtract, 3.0), Some(8.0));
    /// ```
    pub fn press_operator(
        &mut self,
        op: Operator,
        current: f64,
    ) -> Option<f64> {
        match *self {
            Self::Idle => {
                *self = Self::Pending {
                    accumulator: current,
                    op,
                    operand_seen: false,
                };
                None
            }
            Self::Pending {
                accumulator,
                op: pending,
                operand_seen: true,
            } => {
                let folded = pending.apply(accumulator, current);
                *self = Self::Pending {
                    accumulator: folded,
                    op,
                    operand_seen: false,
                };
                Some(folded)
            }
            Self::Pending {
                accumulator,
                operand_seen: false,
                ..
            } => {
                // No operand typed since the last operator: the user is
                // changing their mind about which operator to apply.
                *self = Self::Pending {
                    accumulator,
                    op,
                    operand_seen: false,
                };
                None
            }
        }
    }

    /// Handles the equals key against the currently displayed value.
    ///
    /// Applies the pending operator unconditionally and terminates the
    /// chain; with nothing pending it is a no-op. Returns the result to
    /// display, if any.
    pub fn press_equals(
        &mut self,
        current: f64,
    ) -> Option<f64> {
        match *self {
            Self::Idle => None,
            Self::Pending {
                accumulator, op, ..
            } => {
                let folded = op.apply(accumulator, current);
                *self = Self::Idle;
                Some(folded)
            }
        }
    }

    /// Returns to the initial empty-chain state.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn first_operator_captures_accumulator_without_folding() {
        let mut chain = ChainState::default();

        let shown = chain.press_operator(Operator::Add, 5.0);

        assert_eq!(shown, None);
        assert!(chain.awaiting_operand());
    }

    #[test]
    fn chained_operator_folds_the_previous_one() {
        // 5 + 3 - ... : pressing '-' must resolve '+' first.
        let mut chain = ChainState::default();

        chain.press_operator(Operator::Add, 5.0);
        chain.note_operand();
        let shown = chain.press_operator(Operator::Subtract, 3.0);

        assert_eq!(shown, Some(8.0));
        assert_eq!(
            chain,
            ChainState::Pending {
                accumulator: 8.0,
                op: Operator::Subtract,
                operand_seen: false,
            }
        );
    }

    #[test]
    fn chained_regression_five_plus_three_minus_two() {
        // The broken variant applies '-' before resolving '+' and gets
        // this wrong; left-to-right evaluation gives (5 + 3) - 2 = 6.
        let mut chain = ChainState::default();

        chain.press_operator(Operator::Add, 5.0);
        chain.note_operand();
        chain.press_operator(Operator::Subtract, 3.0);
        chain.note_operand();
        let result = chain.press_equals(2.0);

        assert_eq!(result, Some(6.0));
        assert_eq!(chain, ChainState::Idle);
    }

    #[test]
    fn operator_without_fresh_operand_only_replaces_the_pending_op() {
        let mut chain = ChainState::default();

        chain.press_operator(Operator::Add, 5.0);
        let shown = chain.press_operator(Operator::Multiply, 5.0);

        assert_eq!(shown, None);
        assert_eq!(
            chain,
            ChainState::Pending {
                accumulator: 5.0,
                op: Operator::Multiply,
                operand_seen: false,
            }
        );
    }

    #[test]
    fn equals_with_nothing_pending_is_a_no_op() {
        let mut chain = ChainState::default();

        assert_eq!(chain.press_equals(42.0), None);
        assert_eq!(chain, ChainState::Idle);
    }

    #[test]
    fn equals_applies_unconditionally_even_without_fresh_operand() {
        // 5 + = doubles the displayed value, as on the device.
        let mut chain = ChainState::default();

        chain.press_operator(Operator::Add, 5.0);
        let result = chain.press_equals(5.0);

        assert_eq!(result, Some(10.0));
    }

    #[test]
    fn division_by_zero_folds_to_nan() {
        let mut chain = ChainState::default();

        chain.press_operator(Operator::Divide, 8.0);
        chain.note_operand();
        let result = chain.press_equals(0.0).unwrap();

        assert!(result.is_nan());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut chain = ChainState::default();
        chain.press_operator(Operator::Add, 1.0);

        chain.reset();

        assert_eq!(chain, ChainState::Idle);
    }
}
