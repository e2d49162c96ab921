//! Lexical tokens of the expression language.

use crate::ops::Operator;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One lexical unit of an expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A number literal, digits exactly as written.
    Number(String),
    /// A binary operator.
    Operator(Operator),
    /// A grouping parenthesis.
    Paren(Paren),
}

/// Which side of a parenthesis pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paren {
    Open,
    Close,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(literal) => write!(f, "{literal}"),
            Token::Operator(operator) => write!(f, "{operator}"),
            Token::Paren(Paren::Open) => write!(f, "("),
            Token::Paren(Paren::Close) => write!(f, ")"),
        }
    }
}
