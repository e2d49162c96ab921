//! Error types for expression evaluation.

use crate::ops::{OperationError, Operator};
use thiserror::Error;

/// Why an expression could not be evaluated.
///
/// The structural variants come out of tokenizing and validation, in
/// scan order: the first problem found is the one reported.
/// [`Operation`](EvalError::Operation) wraps a machine failure raised
/// mid-evaluation, such as division by zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression had no tokens at all.
    #[error("expression is empty")]
    EmptyExpression,

    /// A character outside the expression language.
    #[error("character {character:?} is not part of the expression language")]
    InvalidCharacter { character: char },

    /// A number literal with digits other than 0 and 1.
    #[error("number {literal:?} is not a binary string")]
    InvalidNumber { literal: String },

    /// Parentheses that do not pair up.
    #[error("parentheses are unbalanced")]
    UnbalancedParentheses,

    /// An opening parenthesis immediately closed again.
    #[error("parentheses enclose nothing")]
    EmptyParentheses,

    /// The expression starts with an operator.
    #[error("expression starts with operator {operator}")]
    LeadingOperator { operator: Operator },

    /// The expression ends with an operator.
    #[error("expression ends with operator {operator}")]
    TrailingOperator { operator: Operator },

    /// Two operators with nothing between them.
    #[error("operators {first} and {second} are adjacent")]
    ConsecutiveOperators { first: Operator, second: Operator },

    /// An operator directly after an opening parenthesis.
    #[error("operator {operator} directly follows an opening parenthesis")]
    OperatorAfterOpen { operator: Operator },

    /// An operator directly before a closing parenthesis.
    #[error("operator {operator} directly precedes a closing parenthesis")]
    OperatorBeforeClose { operator: Operator },

    /// Two numbers with no operator between them.
    #[error("numbers {first} and {second} have no operator between them")]
    ConsecutiveNumbers { first: String, second: String },

    /// A number and a parenthesized group with no operator between
    /// them; implicit multiplication is not part of the language.
    #[error("an operator is missing between a number and a parenthesized group")]
    MissingOperatorBetween,

    /// No operator anywhere: a bare number or group is not an
    /// expression.
    #[error("expression contains no operator")]
    MissingOperator,

    /// Postfix evaluation ran out of operands or finished with
    /// leftovers.
    #[error("expression structure is malformed")]
    MalformedExpression,

    /// An operation machine failed while evaluating.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// An evaluation failure, echoing the input it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to evaluate {input:?}: {reason}")]
pub struct EvaluationFailure {
    /// The expression as the caller gave it.
    pub input: String,
    /// What went wrong.
    pub reason: EvalError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_pieces() {
        let err = EvalError::InvalidCharacter { character: '@' };
        assert_eq!(
            err.to_string(),
            "character '@' is not part of the expression language"
        );

        let err = EvalError::ConsecutiveOperators {
            first: Operator::Add,
            second: Operator::Multiply,
        };
        assert_eq!(err.to_string(), "operators + and * are adjacent");
    }

    #[test]
    fn operation_errors_pass_through_transparently() {
        let err = EvalError::from(OperationError::DivisionByZero);
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn failure_echoes_the_input() {
        let failure = EvaluationFailure {
            input: "1100 / 0".to_string(),
            reason: OperationError::DivisionByZero.into(),
        };
        assert_eq!(
            failure.to_string(),
            "failed to evaluate \"1100 / 0\": division by zero"
        );
    }
}
