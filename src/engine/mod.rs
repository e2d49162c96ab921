//! Table-driven deterministic automaton engine.
//!
//! The engine knows nothing about arithmetic: it executes whatever rule
//! table it is given, one (state, symbol) lookup at a time, over a
//! `char` tape. It exists as a general substrate; the arithmetic
//! machines in [`ops`](crate::ops) use the same tape and trace types
//! but carry their own hard-coded control logic.

pub mod error;
pub mod machine;
pub mod rule;

pub use error::{DefinitionIssue, EngineError};
pub use machine::{Automaton, RunOutcome, StepOutcome, DEFAULT_STEP_LIMIT};
pub use rule::Rule;
