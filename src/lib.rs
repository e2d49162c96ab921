//! Bitmill: binary arithmetic on simulated tape machines
//!
//! Bitmill computes with the slowest tool imaginable, on purpose. Every
//! arithmetic operation is a little tape machine: operands are written
//! onto an auto-extending symbol tape, digits are consumed under marks,
//! carries and borrows travel one cell at a time, and the answer is
//! read back off the tape when the machine halts. A general
//! table-driven automaton engine sits alongside for machines defined at
//! runtime, and an expression evaluator turns `(101 + 110) * 10` into
//! one machine run per operator.
//!
//! # Core Concepts
//!
//! - **Tape**: an unbounded cell row with a head, growable at both ends
//!   via the [`TapeSymbol`] blank
//! - **Engine**: a string-labeled transition-table automaton with
//!   single-stepping, traces, restore, and table validation
//! - **Operations**: mark-and-consume arithmetic machines for addition,
//!   subtraction, multiplication, division, and digit reversal
//! - **Evaluation**: tokenize, validate, reorder to postfix, then drive
//!   one operation machine per operator with sign-aware dispatch
//!
//! # Example
//!
//! ```rust
//! use bitmill::eval::evaluate;
//! use bitmill::ops::SumMachine;
//!
//! // The one-call form: a full expression.
//! let outcome = evaluate("101 + 110").unwrap();
//! assert_eq!(outcome.binary(), "1011");
//! assert_eq!(outcome.decimal(), 11);
//!
//! // The stepwise form: watch a single machine work.
//! let mut machine = SumMachine::new("101", "110").unwrap();
//! machine.run().unwrap();
//! assert_eq!(machine.tape_text(), "#1011#");
//! ```

pub mod engine;
pub mod eval;
pub mod ops;
pub mod tape;
pub mod trace;

// Re-export commonly used types
pub use engine::{Automaton, RunOutcome, StepOutcome};
pub use eval::evaluate;
pub use ops::{
    apply, DivideMachine, MultiplyMachine, Operator, Outcome, ReverseMachine, SubtractMachine,
    SumMachine,
};
pub use tape::{Cell, Move, Tape, TapeSymbol};
pub use trace::{RunTrace, Snapshot};
