//! Structural validation of token streams.

use crate::eval::error::EvalError;
use crate::eval::token::{Paren, Token};

/// Check a token stream for structural problems before conversion.
///
/// Runs a fixed sequence of scans (literal shape, parenthesis pairing,
/// edge tokens, adjacent-token pairs, operator presence) and reports
/// the first problem found. A stream that passes here always
/// converts to postfix and evaluates without structural errors, so the
/// later stages only ever surface machine failures.
pub fn validate(tokens: &[Token]) -> Result<(), EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    for token in tokens {
        if let Token::Number(literal) = token {
            if !literal.chars().all(|c| c == '0' || c == '1') {
                return Err(EvalError::InvalidNumber {
                    literal: literal.clone(),
                });
            }
        }
    }

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Paren(Paren::Open) => {
                depth += 1;
                if matches!(tokens.get(i + 1), Some(Token::Paren(Paren::Close))) {
                    return Err(EvalError::EmptyParentheses);
                }
            }
            Token::Paren(Paren::Close) => {
                if depth == 0 {
                    return Err(EvalError::UnbalancedParentheses);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(EvalError::UnbalancedParentheses);
    }

    if let Some(Token::Operator(operator)) = tokens.first() {
        return Err(EvalError::LeadingOperator {
            operator: *operator,
        });
    }
    if let Some(Token::Operator(operator)) = tokens.last() {
        return Err(EvalError::TrailingOperator {
            operator: *operator,
        });
    }

    for pair in tokens.windows(2) {
        match (&pair[0], &pair[1]) {
            (Token::Operator(first), Token::Operator(second)) => {
                return Err(EvalError::ConsecutiveOperators {
                    first: *first,
                    second: *second,
                });
            }
            (Token::Paren(Paren::Open), Token::Operator(operator)) => {
                return Err(EvalError::OperatorAfterOpen {
                    operator: *operator,
                });
            }
            (Token::Operator(operator), Token::Paren(Paren::Close)) => {
                return Err(EvalError::OperatorBeforeClose {
                    operator: *operator,
                });
            }
            (Token::Number(first), Token::Number(second)) => {
                return Err(EvalError::ConsecutiveNumbers {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
            (Token::Number(_), Token::Paren(Paren::Open))
            | (Token::Paren(Paren::Close), Token::Number(_))
            | (Token::Paren(Paren::Close), Token::Paren(Paren::Open)) => {
                return Err(EvalError::MissingOperatorBetween);
            }
            _ => {}
        }
    }

    if !tokens.iter().any(|t| matches!(t, Token::Operator(_))) {
        return Err(EvalError::MissingOperator);
    }

    Ok(())
}
