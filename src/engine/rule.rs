//! Transition rules of the table-driven automaton.

use crate::tape::Move;
use serde::{Deserialize, Serialize};

/// Right-hand side of a transition rule.
///
/// The left-hand side, the (state, symbol) pair the rule fires on, is
/// the key the [`Automaton`](crate::engine::Automaton) stores the rule
/// under, which is what makes the machine deterministic by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// State entered after applying the rule.
    pub next_state: String,
    /// Symbol written over the cell that was read.
    pub write: char,
    /// Head movement applied after writing.
    pub motion: Move,
}

impl Rule {
    /// Render the rule in transition-function notation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitmill::engine::Rule;
    /// use bitmill::tape::Move;
    ///
    /// let rule = Rule {
    ///     next_state: "q1".into(),
    ///     write: 'b',
    ///     motion: Move::Right,
    /// };
    /// assert_eq!(rule.describe("q0", 'a'), "δ(q0, a) = (q1, b, R)");
    /// ```
    pub fn describe(&self, from: &str, read: char) -> String {
        format!(
            "δ({from}, {read}) = ({}, {}, {})",
            self.next_state, self.write, self.motion
        )
    }
}
