//! Binary addition.
//!
//! The digit stage repeatedly consumes the rightmost unmarked digit of
//! each operand, adds them with the running carry, and splices the sum
//! bit into the `=`-delimited result area, so the area accumulates
//! least-significant first. Once both operands are exhausted (and any
//! final carry flushed) the tape is compacted to `# digits #` and a
//! chained [`ReverseMachine`] flips the digits into conventional
//! most-significant-first order.

use crate::ops::context::OpContext;
use crate::ops::outcome::Outcome;
use crate::ops::reverse::ReverseMachine;
use crate::ops::run::{
    validate_operand, BinaryProgram, Machine, OperationRun, Program, StepStatus,
};
use crate::ops::OperationError;
use crate::phase_enum;
use crate::tape::{Cell, Move, Tape};
use crate::trace::RunTrace;

phase_enum! {
    /// Control phases of the addition digit stage.
    pub enum SumPhase {
        /// Step off the leading blank.
        Start,
        /// Scan right for the end of the operand region.
        SeekRightEnd,
        /// Scan left for the rightmost unmarked digit of operand 2.
        SeekDigit2,
        /// Scan left for the operator.
        SeekOperator,
        /// Scan left for the rightmost unmarked digit of operand 1.
        SeekDigit1,
        /// Add the consumed digits and the carry.
        Combine,
        /// Splice the sum bit into the result area.
        EmitDigit,
        /// Return to the origin for the next cycle.
        Rewind,
        /// Splice the final carry into the result area.
        FlushCarry,
        /// Compact the tape to the accumulated digits.
        Cleanup,
        /// Digit stage finished; digits are least-significant first.
        Reduced,
    }
    terminal: [Reduced]
}

/// Control logic of the addition digit stage.
pub struct SumDigitsProgram;

impl Program for SumDigitsProgram {
    type P = SumPhase;

    fn name() -> &'static str {
        "sum"
    }

    fn terminal() -> SumPhase {
        SumPhase::Reduced
    }

    fn advance(run: &mut OperationRun<SumPhase>) {
        match run.phase() {
            SumPhase::Start => {
                run.move_head(Move::Right);
                run.goto(SumPhase::SeekRightEnd);
            }
            SumPhase::SeekRightEnd => match run.read() {
                Cell::Blank | Cell::Equals => {
                    run.move_head(Move::Left);
                    run.goto(SumPhase::SeekDigit2);
                }
                _ => run.move_head(Move::Right),
            },
            SumPhase::SeekDigit2 => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit2 = cell.digit();
                    run.write(Cell::MarkX);
                    run.move_head(Move::Left);
                    run.goto_with(SumPhase::SeekOperator, format!("consumed digit {cell} of operand 2"));
                }
                _ => {
                    // Operator reached: operand 2 is exhausted.
                    run.ctx_mut().digit2 = None;
                    run.move_head(Move::Left);
                    run.goto(SumPhase::SeekDigit1);
                }
            },
            SumPhase::SeekOperator => {
                if run.read() == Cell::Plus {
                    run.move_head(Move::Left);
                    run.goto(SumPhase::SeekDigit1);
                } else {
                    run.move_head(Move::Left);
                }
            }
            SumPhase::SeekDigit1 => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit1 = cell.digit();
                    run.write(Cell::MarkX);
                    run.goto_with(SumPhase::Combine, format!("consumed digit {cell} of operand 1"));
                }
                _ => {
                    // Left edge: operand 1 is exhausted.
                    run.ctx_mut().digit1 = None;
                    run.goto(SumPhase::Combine);
                }
            },
            SumPhase::Combine => {
                let ctx = run.ctx_mut();
                let digit1 = ctx.digit1.take();
                let digit2 = ctx.digit2.take();
                if digit1.is_none() && digit2.is_none() {
                    if run.ctx().carry > 0 {
                        run.goto_with(SumPhase::FlushCarry, "operands exhausted, carry pending");
                    } else {
                        run.goto_with(SumPhase::Cleanup, "operands exhausted");
                    }
                } else {
                    let sum = digit1.unwrap_or(0) + digit2.unwrap_or(0) + run.ctx().carry;
                    run.ctx_mut().bit = sum % 2;
                    run.ctx_mut().carry = sum / 2;
                    run.goto_with(
                        SumPhase::EmitDigit,
                        format!(
                            "{} + {} + carry = bit {}, carry {}",
                            digit1.unwrap_or(0),
                            digit2.unwrap_or(0),
                            sum % 2,
                            sum / 2
                        ),
                    );
                }
            }
            SumPhase::EmitDigit => {
                let bit = run.ctx().bit;
                run.splice_result_digit(bit);
                run.goto_with(SumPhase::Rewind, format!("spliced sum bit {bit}"));
            }
            SumPhase::Rewind => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(SumPhase::SeekRightEnd);
                } else {
                    run.move_head(Move::Left);
                }
            }
            SumPhase::FlushCarry => {
                let carry = run.ctx().carry;
                run.splice_result_digit(carry);
                run.ctx_mut().carry = 0;
                run.goto_with(SumPhase::Cleanup, format!("flushed final carry {carry}"));
            }
            SumPhase::Cleanup => {
                let digits = run.result_digits();
                run.rebuild_with_digits(&digits);
                run.goto_with(SumPhase::Reduced, "compacted least-significant-first digits");
            }
            SumPhase::Reduced => {}
        }
    }

    fn conclude(run: &OperationRun<SumPhase>) -> Outcome {
        // Digits are still least-significant first here; the chained
        // reversal stage produces the published outcome.
        Outcome::from_magnitude(run.digits_text(), run.ctx().negative)
    }
}

impl BinaryProgram for SumDigitsProgram {
    fn operator() -> Cell {
        Cell::Plus
    }

    fn start() -> SumPhase {
        SumPhase::Start
    }

    fn prepare(
        operand1: &str,
        operand2: &str,
    ) -> Result<(String, String, OpContext), OperationError> {
        validate_operand(operand1)?;
        validate_operand(operand2)?;
        Ok((
            operand1.to_string(),
            operand2.to_string(),
            OpContext::default(),
        ))
    }
}

/// Machine that adds two binary numbers.
///
/// Runs in two chained stages: the digit stage reduces
/// `# operand1 + operand2 #` to the sum's digits in
/// least-significant-first order, then a [`ReverseMachine`] picks up
/// the compacted tape and flips the digits into place. The wrapper
/// mirrors the single-stage machine API; accessors report the stage
/// currently driving the tape.
///
/// # Example
///
/// ```rust
/// use bitmill::ops::SumMachine;
///
/// let mut machine = SumMachine::new("101", "110").unwrap();
/// let outcome = machine.run().unwrap();
///
/// assert_eq!(outcome.binary(), "1011");
/// assert_eq!(outcome.decimal(), 11);
/// ```
pub struct SumMachine {
    digits: Machine<SumDigitsProgram>,
    reversal: Option<ReverseMachine>,
    outcome: Option<Outcome>,
}

impl SumMachine {
    /// Validate the operands and lay out `# operand1 + operand2 #`.
    pub fn new(operand1: &str, operand2: &str) -> Result<Self, OperationError> {
        Ok(Self {
            digits: Machine::new(operand1, operand2)?,
            reversal: None,
            outcome: None,
        })
    }

    /// Apply at most one control transition of whichever stage is
    /// active.
    ///
    /// The step on which the digit stage halts cleanly hands its tape
    /// to the reversal stage and reports [`StepStatus::Running`]; a
    /// truncated digit stage halts the whole machine with no outcome.
    pub fn step(&mut self) -> StepStatus {
        if let Some(reversal) = &mut self.reversal {
            let status = reversal.step();
            if status == StepStatus::Halted && self.outcome.is_none() {
                self.outcome = reversal.outcome().cloned();
            }
            return status;
        }
        match self.digits.step() {
            StepStatus::Running => StepStatus::Running,
            StepStatus::Halted => {
                if self.digits.is_exhausted() {
                    StepStatus::Halted
                } else {
                    self.reversal = Some(ReverseMachine::from_tape(self.digits.tape().clone()));
                    StepStatus::Running
                }
            }
        }
    }

    /// Step both stages to completion.
    pub fn run(&mut self) -> Result<Outcome, OperationError> {
        while self.step() == StepStatus::Running {}
        match &self.outcome {
            Some(outcome) => Ok(outcome.clone()),
            None => Err(OperationError::StepBudgetExhausted {
                budget: self.budget(),
            }),
        }
    }

    /// Whether the active stage has reached its terminal phase.
    pub fn is_halted(&self) -> bool {
        match &self.reversal {
            Some(reversal) => reversal.is_halted(),
            None => self.digits.is_halted(),
        }
    }

    /// The outcome, once both stages have halted cleanly.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The active stage's tape.
    pub fn tape(&self) -> &Tape<Cell> {
        match &self.reversal {
            Some(reversal) => reversal.tape(),
            None => self.digits.tape(),
        }
    }

    /// The active stage's tape as a display string.
    pub fn tape_text(&self) -> String {
        self.tape().render()
    }

    /// Name of the active stage's control phase.
    pub fn phase_name(&self) -> &'static str {
        match &self.reversal {
            Some(reversal) => reversal.phase_name(),
            None => self.digits.phase_name(),
        }
    }

    /// Steps taken across both stages.
    pub fn steps(&self) -> usize {
        self.digits.steps() + self.reversal.as_ref().map_or(0, |r| r.steps())
    }

    /// The active stage's step budget.
    pub fn budget(&self) -> usize {
        match &self.reversal {
            Some(reversal) => reversal.budget(),
            None => self.digits.budget(),
        }
    }

    /// Whether either stage was truncated by budget exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.digits.is_exhausted() || self.reversal.as_ref().is_some_and(|r| r.is_exhausted())
    }

    /// The active stage's trace.
    pub fn trace(&self) -> &RunTrace<Cell> {
        match &self.reversal {
            Some(reversal) => reversal.trace(),
            None => self.digits.trace(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(a: &str, b: &str) -> Outcome {
        SumMachine::new(a, b).unwrap().run().unwrap()
    }

    #[test]
    fn adds_binary_numbers() {
        let cases = [
            ("101", "110", "1011", 11),
            ("1", "1", "10", 2),
            ("0", "0", "0", 0),
            ("1111", "1", "10000", 16),
            ("11111111", "1", "100000000", 256),
            ("1010", "101", "1111", 15),
        ];
        for (a, b, binary, decimal) in cases {
            let outcome = sum(a, b);
            assert_eq!(outcome.binary(), binary, "{a} + {b}");
            assert_eq!(outcome.decimal(), decimal, "{a} + {b}");
            assert!(!outcome.negative());
        }
    }

    #[test]
    fn addition_is_commutative() {
        assert_eq!(sum("1101", "110").binary(), sum("110", "1101").binary());
    }

    #[test]
    fn digit_stage_marks_consumed_digits() {
        let mut machine = SumMachine::new("11", "1").unwrap();
        while machine.phase_name() != "Combine" {
            machine.step();
        }
        // One digit of each operand is consumed before the first combine.
        assert_eq!(machine.tape_text(), "#1X+X#");
    }

    #[test]
    fn hands_off_to_the_reversal_stage() {
        let mut machine = SumMachine::new("1", "1").unwrap();
        while machine.phase_name() != "Reduced" {
            machine.step();
        }
        // The digit stage left least-significant-first digits.
        assert_eq!(machine.tape_text(), "#01#");

        machine.run().unwrap();
        assert_eq!(machine.tape_text(), "#10#");
        assert_eq!(machine.phase_name(), "Done");
        assert!(machine.is_halted());
    }

    #[test]
    fn steps_accumulate_across_stages() {
        let mut machine = SumMachine::new("101", "110").unwrap();
        machine.run().unwrap();
        assert!(machine.steps() > machine.trace().len());
        assert!(!machine.is_exhausted());
    }

    #[test]
    fn rejects_invalid_operands() {
        assert!(matches!(
            SumMachine::new("", "1"),
            Err(OperationError::EmptyOperand)
        ));
        assert!(matches!(
            SumMachine::new("102", "1"),
            Err(OperationError::InvalidOperand { .. })
        ));
    }
}
