//! Shared step driver for the operation machines.
//!
//! Each operator supplies a [`Program`]: a control-phase enum plus a
//! transition function. The generic [`Machine`] owns everything else
//! (tape, phase, scratch context, step counter, budget, trace) and
//! drives the program one control transition per [`step`](Machine::step).
//! The per-operator files stay focused on their digit logic.

use crate::ops::context::OpContext;
use crate::ops::error::OperationError;
use crate::ops::outcome::Outcome;
use crate::tape::{Cell, Move, Tape};
use crate::trace::{RunTrace, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Longest operand the machines accept, in binary digits.
///
/// The bound keeps every reachable result magnitude, including a full
/// product of two maximal operands, exactly representable in the
/// outcome's 64-bit decimal field.
pub const MAX_OPERAND_LEN: usize = 32;

/// Minimum step budget of any operation run.
pub const STEP_BUDGET_FLOOR: usize = 1_000;

/// Budget granted per squared tape cell, on top of the floor.
///
/// Cell-granular scanning makes a run's cost roughly quadratic in the
/// tape length; scaling the budget the same way means a legitimate run
/// on bounded operands is never truncated, while the ceiling still
/// guarantees termination.
pub const STEP_BUDGET_PER_CELL: usize = 64;

fn step_budget(tape_len: usize) -> usize {
    STEP_BUDGET_FLOOR.max(STEP_BUDGET_PER_CELL * tape_len * tape_len)
}

/// Control phase of an operation machine.
///
/// The operation counterpart of an engine state label: a closed enum
/// per operator, generated by [`phase_enum!`](crate::phase_enum), with
/// exactly one way to be terminal.
pub trait Phase:
    Copy + PartialEq + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The phase's name for traces and logging.
    fn name(&self) -> &'static str;

    /// Whether the machine has halted in this phase.
    fn is_terminal(&self) -> bool;
}

/// Whether an operation machine can keep stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The machine can take another step.
    Running,
    /// The machine has reached its terminal phase.
    Halted,
}

/// One operator's control logic.
///
/// A program is stateless; all run state lives in the
/// [`OperationRun`] the driver passes in. `advance` performs exactly
/// one control transition per call: inspect the phase and the symbol
/// under the head, mutate the tape, move at most one meaningful
/// action's worth, and pick the next phase. Symbol/phase combinations a
/// program does not anticipate fall through to a move-and-retry arm
/// rather than erroring, so every program always progresses to its
/// terminal phase.
pub trait Program {
    /// The phase enum driving this program.
    type P: Phase;

    /// Operation name for logging.
    fn name() -> &'static str;

    /// The terminal phase, also used when a truncated run is forced to
    /// halt.
    fn terminal() -> Self::P;

    /// Apply exactly one control transition.
    fn advance(run: &mut OperationRun<Self::P>);

    /// Build the outcome of a run that reached the terminal phase on
    /// its own.
    fn conclude(run: &OperationRun<Self::P>) -> Outcome;
}

/// A program constructed from two binary operands laid out around an
/// operator glyph.
pub trait BinaryProgram: Program {
    /// The operator glyph placed between the operands.
    fn operator() -> Cell;

    /// The starting phase.
    fn start() -> Self::P;

    /// Validate the operands and prepare the starting context.
    ///
    /// Returns the operands in tape order (subtraction swaps them here
    /// when the minuend is smaller) plus the context the run starts
    /// with. Division by zero is rejected here, before any tape exists.
    fn prepare(operand1: &str, operand2: &str)
        -> Result<(String, String, OpContext), OperationError>;
}

/// Reject operands that are empty, non-binary, or over the length
/// bound.
pub(crate) fn validate_operand(operand: &str) -> Result<(), OperationError> {
    if operand.is_empty() {
        return Err(OperationError::EmptyOperand);
    }
    if !operand.chars().all(|c| c == '0' || c == '1') {
        return Err(OperationError::InvalidOperand {
            operand: operand.to_string(),
        });
    }
    if operand.len() > MAX_OPERAND_LEN {
        return Err(OperationError::OperandTooLong {
            len: operand.len(),
            max: MAX_OPERAND_LEN,
        });
    }
    Ok(())
}

/// Lay out `# left OP right #` on a fresh tape, head at the leading
/// blank.
pub(crate) fn layout_tape(left: &str, operator: Cell, right: &str) -> Tape<Cell> {
    let mut cells = Vec::with_capacity(left.len() + right.len() + 3);
    cells.push(Cell::Blank);
    cells.extend(left.chars().map(|c| Cell::from_digit(u8::from(c == '1'))));
    cells.push(operator);
    cells.extend(right.chars().map(|c| Cell::from_digit(u8::from(c == '1'))));
    cells.push(Cell::Blank);
    Tape::from_symbols(cells)
}

/// Live state of one operation run: tape, phase, scratch context, step
/// accounting, and trace.
///
/// Programs mutate the run through the crate-internal helpers; external
/// callers only observe it.
#[derive(Clone, Debug)]
pub struct OperationRun<P: Phase> {
    tape: Tape<Cell>,
    phase: P,
    ctx: OpContext,
    steps: usize,
    budget: usize,
    trace: RunTrace<Cell>,
    exhausted: bool,
    note: Option<String>,
}

impl<P: Phase> OperationRun<P> {
    pub(crate) fn new(tape: Tape<Cell>, phase: P, ctx: OpContext) -> Self {
        let budget = step_budget(tape.len());
        let mut trace = RunTrace::new();
        trace.record(Snapshot::capture(0, &tape, phase.name(), "initial configuration"));
        Self {
            tape,
            phase,
            ctx,
            steps: 0,
            budget,
            trace,
            exhausted: false,
            note: None,
        }
    }

    /// The tape in its current configuration.
    pub fn tape(&self) -> &Tape<Cell> {
        &self.tape
    }

    /// Current control phase.
    pub fn phase(&self) -> P {
        self.phase
    }

    /// The scratch context.
    pub fn ctx(&self) -> &OpContext {
        &self.ctx
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// This run's step budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Whether the run was truncated by budget exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The trace recorded so far.
    pub fn trace(&self) -> &RunTrace<Cell> {
        &self.trace
    }

    // -- helpers for programs -------------------------------------------

    pub(crate) fn ctx_mut(&mut self) -> &mut OpContext {
        &mut self.ctx
    }

    pub(crate) fn read(&self) -> Cell {
        self.tape.read()
    }

    pub(crate) fn write(&mut self, cell: Cell) {
        self.tape.write(cell);
    }

    pub(crate) fn move_head(&mut self, direction: Move) {
        self.tape.move_head(direction);
    }

    pub(crate) fn head(&self) -> usize {
        self.tape.head()
    }

    pub(crate) fn at_left_edge(&self) -> bool {
        self.tape.head() == 0
    }

    /// Enter the next phase.
    pub(crate) fn goto(&mut self, phase: P) {
        self.phase = phase;
    }

    /// Enter the next phase with a trace note for this step.
    pub(crate) fn goto_with(&mut self, phase: P, note: impl Into<String>) {
        self.phase = phase;
        self.note = Some(note.into());
    }

    /// Attach a trace note to this step without changing phase.
    pub(crate) fn note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Find the result delimiter, inserting `=` before the terminal
    /// blank on first use.
    fn ensure_result_area(&mut self) -> usize {
        if let Some(i) = self.tape.symbols().iter().position(|c| *c == Cell::Equals) {
            return i;
        }
        let at = self.tape.len() - 1;
        self.tape.insert(at, Cell::Equals);
        at
    }

    /// Splice a digit into the rightmost unoccupied slot of the result
    /// area, leaving the head on it.
    ///
    /// First use creates the area. Digits accumulate left to right in
    /// emission order, which for the digit-serial operators means
    /// least-significant first.
    pub(crate) fn splice_result_digit(&mut self, bit: u8) {
        self.ensure_result_area();
        let at = self.tape.len() - 1;
        self.tape.insert(at, Cell::from_digit(bit));
        self.tape.seek(self.tape.len() - 2);
    }

    /// Add `addend + carry` into the result-area slot at `slot`,
    /// extending the area with zeros as needed. Returns the outgoing
    /// carry; the head is left on the slot cell.
    pub(crate) fn add_into_slot(&mut self, slot: usize, addend: u8, carry: u8) -> u8 {
        let eq = self.ensure_result_area();
        while self.tape.len() - 1 - (eq + 1) < slot + 1 {
            let at = self.tape.len() - 1;
            self.tape.insert(at, Cell::Zero);
        }
        let pos = eq + 1 + slot;
        let current = self.tape.get(pos).digit().unwrap_or(0);
        let sum = current + addend + carry;
        self.tape.seek(pos);
        self.tape.write(Cell::from_digit(sum % 2));
        sum / 2
    }

    /// The result-area digits in tape order; empty when no area exists.
    pub(crate) fn result_digits(&self) -> Vec<u8> {
        let cells = self.tape.symbols();
        let Some(eq) = cells.iter().position(|c| *c == Cell::Equals) else {
            return Vec::new();
        };
        cells[eq + 1..].iter().map_while(|c| c.digit()).collect()
    }

    /// Replace the whole tape with `# digits #`, head at the origin.
    pub(crate) fn rebuild_with_digits(&mut self, digits: &[u8]) {
        let mut cells = Vec::with_capacity(digits.len() + 2);
        cells.push(Cell::Blank);
        cells.extend(digits.iter().map(|d| Cell::from_digit(*d)));
        cells.push(Cell::Blank);
        self.tape = Tape::from_symbols(cells);
    }

    /// The digit run following the leading blank of a compacted tape.
    pub(crate) fn digits_text(&self) -> String {
        let text: String = self
            .tape
            .symbols()
            .iter()
            .skip(1)
            .map_while(|c| c.digit().map(|d| if d == 0 { '0' } else { '1' }))
            .collect();
        if text.is_empty() {
            "0".to_string()
        } else {
            text
        }
    }

    // -- driver bookkeeping ---------------------------------------------

    /// Account for the transition `advance` just applied and record the
    /// snapshot.
    fn complete_step(&mut self) {
        self.steps += 1;
        let description = self
            .note
            .take()
            .unwrap_or_else(|| format!("phase {}", self.phase.name()));
        self.trace.record(Snapshot::capture(
            self.steps,
            &self.tape,
            self.phase.name(),
            description,
        ));
    }

    /// Force the terminal phase after budget exhaustion, recording a
    /// truncation notice.
    fn exhaust(&mut self, terminal: P) {
        self.exhausted = true;
        self.phase = terminal;
        self.steps += 1;
        self.trace.record(Snapshot::capture(
            self.steps,
            &self.tape,
            self.phase.name(),
            "step budget exhausted; run truncated",
        ));
    }
}

/// An operation machine: the shared driver instantiated with one
/// operator's [`Program`].
///
/// The concrete machines (`SubtractMachine`, `MultiplyMachine`,
/// `DivideMachine`, `ReverseMachine`) are aliases of this type;
/// addition wraps it together with its chained reversal stage.
///
/// # Example
///
/// ```rust
/// use bitmill::ops::{MultiplyMachine, StepStatus};
///
/// let mut machine = MultiplyMachine::new("11", "10").unwrap();
/// while machine.step() == StepStatus::Running {}
///
/// let outcome = machine.outcome().unwrap();
/// assert_eq!(outcome.binary(), "110");
/// assert_eq!(outcome.decimal(), 6);
/// ```
pub struct Machine<Prog: Program> {
    run: OperationRun<Prog::P>,
    outcome: Option<Outcome>,
    _marker: PhantomData<Prog>,
}

impl<Prog: BinaryProgram> Machine<Prog> {
    /// Validate the operands and lay out the starting tape
    /// `# operand1 OP operand2 #`.
    pub fn new(operand1: &str, operand2: &str) -> Result<Self, OperationError> {
        let (left, right, ctx) = Prog::prepare(operand1, operand2)?;
        let tape = layout_tape(&left, Prog::operator(), &right);
        tracing::debug!(op = Prog::name(), %left, %right, "machine constructed");
        Ok(Self::from_parts(tape, Prog::start(), ctx))
    }
}

impl<Prog: Program> Machine<Prog> {
    pub(crate) fn from_parts(tape: Tape<Cell>, phase: Prog::P, ctx: OpContext) -> Self {
        Self {
            run: OperationRun::new(tape, phase, ctx),
            outcome: None,
            _marker: PhantomData,
        }
    }

    /// Apply at most one control transition.
    ///
    /// A halted machine stays halted. A step that lands on the budget
    /// boundary without reaching the terminal phase truncates the run:
    /// the terminal phase is forced, a truncation notice goes into the
    /// trace, and the machine reports halted with no outcome.
    pub fn step(&mut self) -> StepStatus {
        if self.run.phase().is_terminal() {
            return StepStatus::Halted;
        }

        Prog::advance(&mut self.run);
        self.run.complete_step();

        if !self.run.phase().is_terminal() && self.run.steps() >= self.run.budget() {
            tracing::warn!(
                op = Prog::name(),
                budget = self.run.budget(),
                "step budget exhausted; run truncated"
            );
            self.run.exhaust(Prog::terminal());
        }

        if self.run.phase().is_terminal() {
            if !self.run.is_exhausted() && self.outcome.is_none() {
                self.outcome = Some(Prog::conclude(&self.run));
                tracing::debug!(op = Prog::name(), steps = self.run.steps(), "halted");
            }
            StepStatus::Halted
        } else {
            StepStatus::Running
        }
    }

    /// Step the machine to completion.
    ///
    /// Returns the outcome, or [`OperationError::StepBudgetExhausted`]
    /// if the run was truncated; the machine itself stays inspectable
    /// either way.
    pub fn run(&mut self) -> Result<Outcome, OperationError> {
        while self.step() == StepStatus::Running {}
        match &self.outcome {
            Some(outcome) => Ok(outcome.clone()),
            None => Err(OperationError::StepBudgetExhausted {
                budget: self.run.budget(),
            }),
        }
    }

    /// Whether the machine has reached its terminal phase.
    pub fn is_halted(&self) -> bool {
        self.run.phase().is_terminal()
    }

    /// The outcome, once the machine has halted cleanly.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The tape in its current configuration.
    pub fn tape(&self) -> &Tape<Cell> {
        &self.run.tape
    }

    /// The tape contents as a display string.
    pub fn tape_text(&self) -> String {
        self.run.tape.render()
    }

    /// Name of the current control phase.
    pub fn phase_name(&self) -> &'static str {
        self.run.phase().name()
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.run.steps()
    }

    /// This run's step budget.
    pub fn budget(&self) -> usize {
        self.run.budget()
    }

    /// Whether the run was truncated by budget exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.run.is_exhausted()
    }

    /// The trace recorded since construction.
    pub fn trace(&self) -> &RunTrace<Cell> {
        self.run.trace()
    }

    pub(crate) fn run_ref(&self) -> &OperationRun<Prog::P> {
        &self.run
    }
}
