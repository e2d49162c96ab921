//! Binary subtraction.
//!
//! Same mark-and-consume cycle as addition, with the carry replaced by
//! a borrow: each cycle consumes the rightmost unmarked digit of each
//! operand and splices the difference bit into the result area,
//! least-significant first. The machine only ever subtracts the
//! smaller magnitude from the larger: when the right operand is bigger
//! the operands are swapped during preparation and the outcome is
//! flagged negative. The final borrow is therefore always clear.
//! Cleanup reverses the accumulated digits and trims leading zeros.

use crate::ops::bits;
use crate::ops::context::OpContext;
use crate::ops::outcome::Outcome;
use crate::ops::run::{validate_operand, BinaryProgram, Machine, OperationRun, Program};
use crate::ops::OperationError;
use crate::phase_enum;
use crate::tape::{Cell, Move};
use std::cmp::Ordering;

phase_enum! {
    /// Control phases of the subtraction machine.
    pub enum SubtractPhase {
        /// Step off the leading blank.
        Start,
        /// Scan right for the end of the operand region.
        SeekRightEnd,
        /// Scan left for the rightmost unmarked digit of the subtrahend.
        SeekDigit2,
        /// Scan left for the operator.
        SeekOperator,
        /// Scan left for the rightmost unmarked digit of the minuend.
        SeekDigit1,
        /// Subtract the consumed digits with the borrow.
        Combine,
        /// Splice the difference bit into the result area.
        EmitDigit,
        /// Return to the origin for the next cycle.
        Rewind,
        /// Reverse the accumulated digits and trim leading zeros.
        Cleanup,
        /// Halted.
        Done,
    }
    terminal: [Done]
}

/// Control logic of the subtraction machine.
pub struct SubtractProgram;

impl Program for SubtractProgram {
    type P = SubtractPhase;

    fn name() -> &'static str {
        "subtract"
    }

    fn terminal() -> SubtractPhase {
        SubtractPhase::Done
    }

    fn advance(run: &mut OperationRun<SubtractPhase>) {
        match run.phase() {
            SubtractPhase::Start => {
                run.move_head(Move::Right);
                run.goto(SubtractPhase::SeekRightEnd);
            }
            SubtractPhase::SeekRightEnd => match run.read() {
                Cell::Blank | Cell::Equals => {
                    run.move_head(Move::Left);
                    run.goto(SubtractPhase::SeekDigit2);
                }
                _ => run.move_head(Move::Right),
            },
            SubtractPhase::SeekDigit2 => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit2 = cell.digit();
                    run.write(Cell::MarkX);
                    run.move_head(Move::Left);
                    run.goto_with(
                        SubtractPhase::SeekOperator,
                        format!("consumed digit {cell} of the subtrahend"),
                    );
                }
                _ => {
                    // Operator reached: the subtrahend is exhausted.
                    run.ctx_mut().digit2 = None;
                    run.move_head(Move::Left);
                    run.goto(SubtractPhase::SeekDigit1);
                }
            },
            SubtractPhase::SeekOperator => {
                if run.read() == Cell::Minus {
                    run.move_head(Move::Left);
                    run.goto(SubtractPhase::SeekDigit1);
                } else {
                    run.move_head(Move::Left);
                }
            }
            SubtractPhase::SeekDigit1 => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit1 = cell.digit();
                    run.write(Cell::MarkX);
                    run.goto_with(
                        SubtractPhase::Combine,
                        format!("consumed digit {cell} of the minuend"),
                    );
                }
                _ => {
                    // Left edge: the minuend is exhausted.
                    run.ctx_mut().digit1 = None;
                    run.goto(SubtractPhase::Combine);
                }
            },
            SubtractPhase::Combine => {
                let ctx = run.ctx_mut();
                let digit1 = ctx.digit1.take();
                let digit2 = ctx.digit2.take();
                if digit1.is_none() && digit2.is_none() {
                    // The minuend is at least as large, so no borrow
                    // can be outstanding here.
                    run.goto_with(SubtractPhase::Cleanup, "operands exhausted");
                } else {
                    let minuend = digit1.unwrap_or(0);
                    let subtrahend = digit2.unwrap_or(0);
                    let borrow = run.ctx().borrow;
                    let (bit, next_borrow) = if minuend >= subtrahend + borrow {
                        (minuend - subtrahend - borrow, 0)
                    } else {
                        (minuend + 2 - subtrahend - borrow, 1)
                    };
                    run.ctx_mut().bit = bit;
                    run.ctx_mut().borrow = next_borrow;
                    run.goto_with(
                        SubtractPhase::EmitDigit,
                        format!("{minuend} - {subtrahend} - borrow = bit {bit}, borrow {next_borrow}"),
                    );
                }
            }
            SubtractPhase::EmitDigit => {
                let bit = run.ctx().bit;
                run.splice_result_digit(bit);
                run.goto_with(SubtractPhase::Rewind, format!("spliced difference bit {bit}"));
            }
            SubtractPhase::Rewind => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(SubtractPhase::SeekRightEnd);
                } else {
                    run.move_head(Move::Left);
                }
            }
            SubtractPhase::Cleanup => {
                let mut digits = run.result_digits();
                digits.reverse();
                let trimmed = bits::trim_leading_zeros(&digits);
                run.rebuild_with_digits(&trimmed);
                run.goto_with(SubtractPhase::Done, "reversed and trimmed the difference");
            }
            SubtractPhase::Done => {}
        }
    }

    fn conclude(run: &OperationRun<SubtractPhase>) -> Outcome {
        Outcome::from_magnitude(run.digits_text(), run.ctx().negative)
    }
}

impl BinaryProgram for SubtractProgram {
    fn operator() -> Cell {
        Cell::Minus
    }

    fn start() -> SubtractPhase {
        SubtractPhase::Start
    }

    /// Orders the operands so the larger magnitude is the minuend,
    /// flagging the outcome negative when they had to be swapped.
    fn prepare(
        operand1: &str,
        operand2: &str,
    ) -> Result<(String, String, OpContext), OperationError> {
        validate_operand(operand1)?;
        validate_operand(operand2)?;
        let mut ctx = OpContext::default();
        let (left, right) = match bits::compare(&bits::digits(operand1), &bits::digits(operand2)) {
            Ordering::Less => {
                ctx.negative = true;
                (operand2.to_string(), operand1.to_string())
            }
            _ => (operand1.to_string(), operand2.to_string()),
        };
        Ok((left, right, ctx))
    }
}

/// Machine that subtracts two binary numbers, signing the outcome.
pub type SubtractMachine = Machine<SubtractProgram>;

#[cfg(test)]
mod tests {
    use super::*;

    fn subtract(a: &str, b: &str) -> Outcome {
        SubtractMachine::new(a, b).unwrap().run().unwrap()
    }

    #[test]
    fn subtracts_binary_numbers() {
        let cases = [
            ("1010", "101", "101", 5, false),
            ("11", "11", "0", 0, false),
            ("10000", "1", "1111", 15, false),
            ("1", "0", "1", 1, false),
            ("110", "1", "101", 5, false),
        ];
        for (a, b, binary, decimal, negative) in cases {
            let outcome = subtract(a, b);
            assert_eq!(outcome.binary(), binary, "{a} - {b}");
            assert_eq!(outcome.decimal(), decimal, "{a} - {b}");
            assert_eq!(outcome.negative(), negative, "{a} - {b}");
        }
    }

    #[test]
    fn smaller_minuend_swaps_and_signs() {
        let outcome = subtract("101", "1010");
        assert_eq!(outcome.binary(), "101");
        assert!(outcome.negative());
        assert_eq!(outcome.signed_decimal(), -5);
    }

    #[test]
    fn swapped_operands_lay_out_larger_first() {
        let machine = SubtractMachine::new("1", "111").unwrap();
        assert_eq!(machine.tape_text(), "#111−1#");
    }

    #[test]
    fn difference_is_trimmed_to_canonical_form() {
        // 12 - 9 = 3: the raw digit cycle emits a leading-zero result.
        let outcome = subtract("1100", "1001");
        assert_eq!(outcome.binary(), "11");
        assert_eq!(outcome.decimal(), 3);
    }

    #[test]
    fn equal_operands_leave_a_single_zero() {
        let mut machine = SubtractMachine::new("101", "101").unwrap();
        let outcome = machine.run().unwrap();
        assert_eq!(outcome.binary(), "0");
        assert!(!outcome.negative());
        assert_eq!(machine.tape_text(), "#0#");
    }

    #[test]
    fn rejects_invalid_operands() {
        assert!(SubtractMachine::new("", "1").is_err());
        assert!(SubtractMachine::new("1", "12").is_err());
    }
}
