//! Postfix evaluation over the operation machines.

use crate::eval::error::EvalError;
use crate::eval::token::Token;
use crate::ops::{apply, Operator, Outcome};

/// Evaluate a postfix token stream.
///
/// Numbers push; each operator pops its two operands (right first) and
/// pushes the combined outcome. The machines only know magnitudes, so
/// signs are handled here: subtraction is addition with the right
/// operand's sign flipped, mixed-sign addition runs the subtraction
/// machine and re-signs its result, and multiplication and division
/// sign by exclusive-or. Exactly one value must remain at the end.
pub fn evaluate_postfix(tokens: &[Token]) -> Result<Outcome, EvalError> {
    let mut stack: Vec<Outcome> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(literal) => {
                stack.push(Outcome::from_magnitude(literal.clone(), false));
            }
            Token::Operator(operator) => {
                let Some(b) = stack.pop() else {
                    return Err(EvalError::MalformedExpression);
                };
                let Some(a) = stack.pop() else {
                    return Err(EvalError::MalformedExpression);
                };
                tracing::debug!(%operator, left = %a, right = %b, "dispatching operation");
                stack.push(combine(*operator, &a, &b)?);
            }
            Token::Paren(_) => return Err(EvalError::MalformedExpression),
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(outcome), true) => Ok(outcome),
        _ => Err(EvalError::MalformedExpression),
    }
}

/// Combine two signed outcomes with one operator, dispatching to the
/// matching machine.
fn combine(operator: Operator, a: &Outcome, b: &Outcome) -> Result<Outcome, EvalError> {
    match operator {
        Operator::Add => add_signed(a, b),
        Operator::Subtract => {
            // a − b is a + (−b); the sign normalization at zero keeps
            // −0 from ever existing.
            let negated = Outcome::from_magnitude(b.binary().to_string(), !b.negative());
            add_signed(a, &negated)
        }
        Operator::Multiply | Operator::Divide => {
            let outcome = apply(operator, a.binary(), b.binary())?;
            Ok(Outcome::from_magnitude(
                outcome.binary().to_string(),
                a.negative() != b.negative(),
            ))
        }
    }
}

/// Signed addition over the magnitude machines.
///
/// Matching signs run the sum machine and keep the sign; differing
/// signs run the subtraction machine, whose own sign flag says which
/// magnitude won, and the winner's original sign carries over.
fn add_signed(a: &Outcome, b: &Outcome) -> Result<Outcome, EvalError> {
    if a.negative() == b.negative() {
        let sum = apply(Operator::Add, a.binary(), b.binary())?;
        Ok(Outcome::from_magnitude(
            sum.binary().to_string(),
            a.negative(),
        ))
    } else {
        let difference = apply(Operator::Subtract, a.binary(), b.binary())?;
        Ok(Outcome::from_magnitude(
            difference.binary().to_string(),
            difference.negative() != a.negative(),
        ))
    }
}
