//! Expression evaluation over the operation machines.
//!
//! Four stages, each its own module: [`tokenizer`] scans characters
//! into tokens, [`validate`] rejects structural problems with the
//! first one found, [`postfix`] reorders by precedence, and
//! [`evaluator`] drives one operation machine per operator. Every
//! arithmetic step in an expression is a full tape-machine run.
//!
//! # Example
//!
//! ```rust
//! use bitmill::eval::evaluate;
//!
//! let outcome = evaluate("(101 + 110) * 10").unwrap();
//! assert_eq!(outcome.binary(), "10110");
//! assert_eq!(outcome.decimal(), 22);
//!
//! let failure = evaluate("1100 / 0").unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "failed to evaluate \"1100 / 0\": division by zero"
//! );
//! ```

pub mod error;
pub mod evaluator;
pub mod postfix;
pub mod token;
pub mod tokenizer;
pub mod validate;

pub use error::{EvalError, EvaluationFailure};
pub use evaluator::evaluate_postfix;
pub use postfix::to_postfix;
pub use token::{Paren, Token};
pub use tokenizer::tokenize;
pub use validate::validate;

use crate::ops::Outcome;

/// Evaluate a binary arithmetic expression.
///
/// Runs the full pipeline (scan, validate, reorder, evaluate) and
/// wraps any failure with the input that caused it. Numbers are
/// non-negative binary literals; negative values arise only as
/// intermediate results and are carried through by sign-aware
/// dispatch.
pub fn evaluate(input: &str) -> Result<Outcome, EvaluationFailure> {
    let fail = |reason: EvalError| {
        tracing::debug!(input, %reason, "evaluation failed");
        EvaluationFailure {
            input: input.to_string(),
            reason,
        }
    };

    tracing::debug!(input, "evaluating expression");
    let tokens = tokenize(input).map_err(fail)?;
    validate(&tokens).map_err(fail)?;
    let postfix = to_postfix(&tokens).map_err(fail)?;
    let outcome = evaluate_postfix(&postfix).map_err(fail)?;
    tracing::debug!(input, result = %outcome, "expression evaluated");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_reports_the_failing_stage() {
        // Scanner failure.
        let failure = evaluate("101 ? 1").unwrap_err();
        assert_eq!(
            failure.reason,
            EvalError::InvalidCharacter { character: '?' }
        );
        assert_eq!(failure.input, "101 ? 1");

        // Validator failure.
        let failure = evaluate("101 ++ 110").unwrap_err();
        assert!(matches!(
            failure.reason,
            EvalError::ConsecutiveOperators { .. }
        ));

        // Machine failure.
        let failure = evaluate("1 / 0").unwrap_err();
        assert_eq!(
            failure.reason,
            EvalError::Operation(crate::ops::OperationError::DivisionByZero)
        );
    }

    #[test]
    fn evaluates_mixed_precedence_expressions() {
        assert_eq!(evaluate("101 + 110 * 10").unwrap().decimal(), 17);
        assert_eq!(evaluate("(101 + 110) * 10").unwrap().decimal(), 22);
    }

    #[test]
    fn outcome_keeps_both_representations() {
        let outcome = evaluate("1111 + 1").unwrap();
        assert_eq!(outcome.binary(), "10000");
        assert_eq!(outcome.decimal(), 16);
    }
}
