//! Error types for the operation machines.

use thiserror::Error;

/// Failure modes of constructing or running an operation machine.
///
/// Operand problems and division by zero are caught at construction,
/// before any tape exists; the machine never starts. Budget exhaustion
/// is the one runtime failure, and it is soft: the machine keeps its
/// (truncated) state for inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// An operand was the empty string.
    #[error("operand is empty")]
    EmptyOperand,

    /// An operand contained characters other than binary digits.
    #[error("operand {operand:?} is not a binary string")]
    InvalidOperand { operand: String },

    /// An operand exceeded the supported digit count.
    #[error("operand is {len} digits long; the limit is {max}")]
    OperandTooLong { len: usize, max: usize },

    /// The divisor was zero. Rejected for every dividend, including
    /// zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The machine did not reach its terminal phase within the step
    /// budget and the run was truncated.
    #[error("step budget of {budget} exhausted before the machine halted")]
    StepBudgetExhausted { budget: usize },
}
