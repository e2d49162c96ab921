//! Binary multiplication.
//!
//! Shift-and-add over the tape: multiplier bits are consumed
//! least-significant first with `Y` marks; each `1` bit triggers a
//! pass that consumes the multiplicand's digits with `X` marks and
//! adds them, offset by the bit's position, into the `=`-delimited
//! result area, rippling carries through occupied slots. After each
//! pass the multiplicand is restored from the prepared digit list so
//! the next pass can consume it again. A `0` bit just rewinds. Cleanup
//! reverses the least-significant-first slots and trims leading zeros.

use crate::ops::bits;
use crate::ops::context::OpContext;
use crate::ops::outcome::Outcome;
use crate::ops::run::{validate_operand, BinaryProgram, Machine, OperationRun, Program};
use crate::ops::OperationError;
use crate::phase_enum;
use crate::tape::{Cell, Move};

phase_enum! {
    /// Control phases of the multiplication machine.
    pub enum MultiplyPhase {
        /// Step off the leading blank.
        Start,
        /// Scan right for the end of the operand region.
        SeekRightEnd,
        /// Scan left for the rightmost unmarked multiplier bit.
        SeekMultiplierBit,
        /// Scan left past the operator into the multiplicand.
        CrossToMultiplicand,
        /// Scan left for the rightmost unmarked multiplicand digit.
        SeekPassDigit,
        /// Add the consumed digit into the current result slot.
        AddIntoSlot,
        /// Scan left from the result area back into the multiplicand.
        ReturnToPass,
        /// Ripple the pass's final carry through the result slots.
        FlushPassCarry,
        /// Return to the origin before restoring the multiplicand.
        RewindForRestore,
        /// Scan right, restoring marked multiplicand digits.
        RestoreScan,
        /// Return to the origin for the next multiplier bit.
        Rewind,
        /// Reverse the accumulated slots and trim leading zeros.
        Cleanup,
        /// Halted.
        Done,
    }
    terminal: [Done]
}

/// Control logic of the multiplication machine.
pub struct MultiplyProgram;

impl Program for MultiplyProgram {
    type P = MultiplyPhase;

    fn name() -> &'static str {
        "multiply"
    }

    fn terminal() -> MultiplyPhase {
        MultiplyPhase::Done
    }

    fn advance(run: &mut OperationRun<MultiplyPhase>) {
        match run.phase() {
            MultiplyPhase::Start => {
                run.move_head(Move::Right);
                run.goto(MultiplyPhase::SeekRightEnd);
            }
            MultiplyPhase::SeekRightEnd => match run.read() {
                Cell::Blank | Cell::Equals => {
                    run.move_head(Move::Left);
                    run.goto(MultiplyPhase::SeekMultiplierBit);
                }
                _ => run.move_head(Move::Right),
            },
            MultiplyPhase::SeekMultiplierBit => match run.read() {
                Cell::MarkY => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    let bit = cell.digit().unwrap_or(0);
                    run.write(Cell::MarkY);
                    let shift = run.ctx().shift;
                    run.ctx_mut().slot = shift;
                    run.ctx_mut().shift = shift + 1;
                    run.move_head(Move::Left);
                    if bit == 1 {
                        run.ctx_mut().carry = 0;
                        run.goto_with(
                            MultiplyPhase::CrossToMultiplicand,
                            format!("multiplier bit 1 at shift {shift}, starting pass"),
                        );
                    } else {
                        run.goto_with(
                            MultiplyPhase::Rewind,
                            format!("multiplier bit 0 at shift {shift}, skipping pass"),
                        );
                    }
                }
                _ => {
                    // Operator reached: every multiplier bit is consumed.
                    run.goto_with(MultiplyPhase::Cleanup, "multiplier exhausted");
                }
            },
            MultiplyPhase::CrossToMultiplicand => {
                if run.read() == Cell::Times {
                    run.move_head(Move::Left);
                    run.goto(MultiplyPhase::SeekPassDigit);
                } else {
                    run.move_head(Move::Left);
                }
            }
            MultiplyPhase::SeekPassDigit => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit1 = cell.digit();
                    run.write(Cell::MarkX);
                    run.goto_with(
                        MultiplyPhase::AddIntoSlot,
                        format!("consumed multiplicand digit {cell}"),
                    );
                }
                _ => {
                    // Left edge: the multiplicand is exhausted this pass.
                    run.goto(MultiplyPhase::FlushPassCarry);
                }
            },
            MultiplyPhase::AddIntoSlot => {
                let digit = run.ctx_mut().digit1.take().unwrap_or(0);
                let (slot, carry) = (run.ctx().slot, run.ctx().carry);
                let next_carry = run.add_into_slot(slot, digit, carry);
                run.ctx_mut().carry = next_carry;
                run.ctx_mut().slot = slot + 1;
                run.goto_with(
                    MultiplyPhase::ReturnToPass,
                    format!("added {digit} into slot {slot}, carry {next_carry}"),
                );
            }
            MultiplyPhase::ReturnToPass => {
                if run.read() == Cell::Times {
                    run.move_head(Move::Left);
                    run.goto(MultiplyPhase::SeekPassDigit);
                } else {
                    run.move_head(Move::Left);
                }
            }
            MultiplyPhase::FlushPassCarry => {
                if run.ctx().carry > 0 {
                    let (slot, carry) = (run.ctx().slot, run.ctx().carry);
                    let next_carry = run.add_into_slot(slot, 0, carry);
                    run.ctx_mut().carry = next_carry;
                    run.ctx_mut().slot = slot + 1;
                    run.note(format!("rippled carry into slot {slot}"));
                } else {
                    run.goto(MultiplyPhase::RewindForRestore);
                }
            }
            MultiplyPhase::RewindForRestore => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(MultiplyPhase::RestoreScan);
                } else {
                    run.move_head(Move::Left);
                }
            }
            MultiplyPhase::RestoreScan => match run.read() {
                Cell::MarkX => {
                    let position = run.head() - 1;
                    let digit = run.ctx().multiplicand.get(position).copied().unwrap_or(0);
                    run.write(Cell::from_digit(digit));
                    run.move_head(Move::Right);
                }
                Cell::Times => {
                    run.move_head(Move::Left);
                    run.goto_with(MultiplyPhase::Rewind, "multiplicand restored");
                }
                _ => run.move_head(Move::Right),
            },
            MultiplyPhase::Rewind => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(MultiplyPhase::SeekRightEnd);
                } else {
                    run.move_head(Move::Left);
                }
            }
            MultiplyPhase::Cleanup => {
                let mut digits = run.result_digits();
                digits.reverse();
                let trimmed = bits::trim_leading_zeros(&digits);
                run.rebuild_with_digits(&trimmed);
                run.goto_with(MultiplyPhase::Done, "reversed and trimmed the product");
            }
            MultiplyPhase::Done => {}
        }
    }

    fn conclude(run: &OperationRun<MultiplyPhase>) -> Outcome {
        Outcome::from_magnitude(run.digits_text(), run.ctx().negative)
    }
}

impl BinaryProgram for MultiplyProgram {
    fn operator() -> Cell {
        Cell::Times
    }

    fn start() -> MultiplyPhase {
        MultiplyPhase::Start
    }

    /// Keeps the multiplicand's digits in context so each pass can
    /// restore the `X` marks it leaves behind.
    fn prepare(
        operand1: &str,
        operand2: &str,
    ) -> Result<(String, String, OpContext), OperationError> {
        validate_operand(operand1)?;
        validate_operand(operand2)?;
        let ctx = OpContext {
            multiplicand: bits::digits(operand1),
            ..OpContext::default()
        };
        Ok((operand1.to_string(), operand2.to_string(), ctx))
    }
}

/// Machine that multiplies two binary numbers.
pub type MultiplyMachine = Machine<MultiplyProgram>;
