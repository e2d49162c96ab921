//! Error and validation-issue types for the automaton engine.

use thiserror::Error;

/// Errors from operating an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A restore referenced a snapshot index the trace does not hold.
    #[error("no snapshot at index {index} (trace holds {available})")]
    SnapshotOutOfRange { index: usize, available: usize },
}

/// Structural issue in a machine definition, reported by
/// [`Automaton::validate`](crate::engine::Automaton::validate).
///
/// Issues are reported as a list rather than a single boolean so a
/// caller can surface every problem at once. Only some of them make a
/// machine unable to accept; an overwritten rule, for instance, is a
/// warning about likely author error, not a defect in the table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionIssue {
    /// The machine has no accepting state, so it can never accept.
    #[error("no accepting state is declared")]
    NoAcceptingState,

    /// An accepting label no transition mentions and no explicit
    /// declaration introduced.
    #[error("accepting state {state:?} is not declared by any transition")]
    UndeclaredAccepting { state: String },

    /// A rejecting label no transition mentions and no explicit
    /// declaration introduced.
    #[error("rejecting state {state:?} is not declared by any transition")]
    UndeclaredRejecting { state: String },

    /// The initial state has no outgoing rule; the machine halts on its
    /// first step whatever the input.
    #[error("initial state {state:?} has no outgoing transition")]
    InitialStateDeadEnd { state: String },

    /// A later `add_transition` replaced the rule for this key
    /// (last-write-wins).
    #[error("transition for ({state:?}, {symbol:?}) was redefined; the last definition wins")]
    RuleOverwritten { state: String, symbol: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_readable_messages() {
        let error = EngineError::SnapshotOutOfRange {
            index: 9,
            available: 3,
        };
        assert_eq!(error.to_string(), "no snapshot at index 9 (trace holds 3)");
    }

    #[test]
    fn issues_name_the_offending_state() {
        let issue = DefinitionIssue::UndeclaredAccepting {
            state: "done".into(),
        };
        assert!(issue.to_string().contains("\"done\""));

        let issue = DefinitionIssue::RuleOverwritten {
            state: "scan".into(),
            symbol: '1',
        };
        assert!(issue.to_string().contains("last definition wins"));
    }
}
