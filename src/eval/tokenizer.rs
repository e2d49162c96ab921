//! Character-level scanning of expression input.

use crate::eval::error::EvalError;
use crate::eval::token::{Paren, Token};
use crate::ops::Operator;

/// Scan an expression into tokens.
///
/// Whitespace separates tokens and is otherwise ignored. Digit runs
/// become [`Token::Number`] literals exactly as written; whether the
/// digits are binary is the validator's concern, not the scanner's.
/// Operator spellings are normalized here, so `x`, `X` and `×` scan as
/// multiplication and `÷` as division. Any other character fails the
/// whole scan.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() {
            let mut literal = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                literal.push(d);
                chars.next();
            }
            tokens.push(Token::Number(literal));
        } else if c == '(' {
            tokens.push(Token::Paren(Paren::Open));
            chars.next();
        } else if c == ')' {
            tokens.push(Token::Paren(Paren::Close));
            chars.next();
        } else if let Some(operator) = Operator::from_symbol(c) {
            tokens.push(Token::Operator(operator));
            chars.next();
        } else {
            return Err(EvalError::InvalidCharacter { character: c });
        }
    }

    Ok(tokens)
}
