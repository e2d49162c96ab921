//! The arithmetic operation machines.
//!
//! Each operator is a small tape program: operands are laid out as
//! `# operand1 OP operand2 #`, digits are consumed under `X`/`Y` marks,
//! and the result accumulates in an `=`-delimited area before cleanup
//! compacts the tape down to the answer. The shared driver lives in
//! [`run`]; the per-operator programs supply only their control phases
//! and digit rules. [`apply`] is the one-call entry point the
//! expression evaluator uses.
//!
//! # Example
//!
//! ```rust
//! use bitmill::ops::{apply, Operator};
//!
//! let product = apply(Operator::Multiply, "101", "11").unwrap();
//! assert_eq!(product.binary(), "1111");
//! assert_eq!(product.decimal(), 15);
//! ```

mod bits;
pub mod context;
pub mod divide;
pub mod error;
pub mod macros;
pub mod multiply;
pub mod outcome;
pub mod reverse;
pub mod run;
pub mod subtract;
pub mod sum;

pub use context::OpContext;
pub use divide::DivideMachine;
pub use error::OperationError;
pub use multiply::MultiplyMachine;
pub use outcome::Outcome;
pub use reverse::ReverseMachine;
pub use run::{
    BinaryProgram, Machine, OperationRun, Phase, Program, StepStatus, MAX_OPERAND_LEN,
    STEP_BUDGET_FLOOR, STEP_BUDGET_PER_CELL,
};
pub use subtract::SubtractMachine;
pub use sum::SumMachine;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The four binary operators the machines implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition, via [`SumMachine`].
    Add,
    /// Subtraction, via [`SubtractMachine`].
    Subtract,
    /// Multiplication, via [`MultiplyMachine`].
    Multiply,
    /// Division, via [`DivideMachine`].
    Divide,
}

impl Operator {
    /// Map an expression character to its operator, accepting the
    /// spelling aliases `x`/`X`/`×` for multiplication and `÷` for
    /// division.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// The canonical expression spelling.
    pub fn glyph(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Binding strength: multiplicative operators bind tighter than
    /// additive ones.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Run one operation start to finish on fresh tape.
///
/// Constructs the operator's machine, steps it to completion, and
/// returns the outcome. Construction errors (bad operands, zero
/// divisor) and budget truncation both surface as
/// [`OperationError`].
pub fn apply(operator: Operator, operand1: &str, operand2: &str) -> Result<Outcome, OperationError> {
    match operator {
        Operator::Add => SumMachine::new(operand1, operand2)?.run(),
        Operator::Subtract => SubtractMachine::new(operand1, operand2)?.run(),
        Operator::Multiply => MultiplyMachine::new(operand1, operand2)?.run(),
        Operator::Divide => DivideMachine::new(operand1, operand2)?.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_dispatches_to_the_right_machine() {
        let cases = [
            (Operator::Add, "101", "110", "1011"),
            (Operator::Subtract, "1010", "101", "101"),
            (Operator::Multiply, "11", "10", "110"),
            (Operator::Divide, "1100", "10", "110"),
        ];
        for (operator, a, b, binary) in cases {
            let outcome = apply(operator, a, b).unwrap();
            assert_eq!(outcome.binary(), binary, "{a} {operator} {b}");
        }
    }

    #[test]
    fn apply_propagates_machine_errors() {
        assert_eq!(
            apply(Operator::Divide, "1", "0"),
            Err(OperationError::DivisionByZero)
        );
        assert!(apply(Operator::Add, "", "1").is_err());
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(Operator::from_symbol(op.glyph()), Some(op));
        }
    }

    #[test]
    fn multiplication_aliases_normalize() {
        assert_eq!(Operator::from_symbol('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol('X'), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol('×'), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol('÷'), Some(Operator::Divide));
        assert_eq!(Operator::from_symbol('?'), None);
    }

    #[test]
    fn precedence_orders_multiplicative_above_additive() {
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Add.precedence(), Operator::Subtract.precedence());
        assert_eq!(Operator::Multiply.precedence(), Operator::Divide.precedence());
    }
}
