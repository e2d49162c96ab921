//! Infix-to-postfix conversion.

use crate::eval::error::EvalError;
use crate::eval::token::{Paren, Token};
use crate::ops::Operator;

/// What sits on the conversion stack: a held-back operator or an open
/// parenthesis fencing the operators behind it.
enum Slot {
    Op(Operator),
    Open,
}

/// Reorder tokens into postfix (reverse Polish) form.
///
/// Straight shunting yard. Numbers pass through; an operator first
/// flushes every stacked operator of equal or higher precedence (all
/// four operators are left-associative), then stacks itself; a closing
/// parenthesis flushes down to its opening partner. Parentheses do
/// their grouping here and never reach the output.
///
/// Validated input cannot fail, but a stray parenthesis in an
/// unvalidated stream still comes back as
/// [`EvalError::UnbalancedParentheses`] rather than panicking.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Slot> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::Operator(operator) => {
                while let Some(Slot::Op(top)) = stack.last() {
                    if top.precedence() < operator.precedence() {
                        break;
                    }
                    let top = *top;
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(Slot::Op(*operator));
            }
            Token::Paren(Paren::Open) => stack.push(Slot::Open),
            Token::Paren(Paren::Close) => loop {
                match stack.pop() {
                    Some(Slot::Op(operator)) => output.push(Token::Operator(operator)),
                    Some(Slot::Open) => break,
                    None => return Err(EvalError::UnbalancedParentheses),
                }
            },
        }
    }

    while let Some(slot) = stack.pop() {
        match slot {
            Slot::Op(operator) => output.push(Token::Operator(operator)),
            Slot::Open => return Err(EvalError::UnbalancedParentheses),
        }
    }

    Ok(output)
}
