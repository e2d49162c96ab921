//! Binary division.
//!
//! Long division over the tape: dividend digits are consumed
//! most-significant first with `X` marks. Each digit is appended to a
//! running remainder; when the remainder covers the divisor it is
//! reduced by one divisor and the quotient bit is `1`, otherwise `0`.
//! Because digits are consumed left to right, the quotient accumulates
//! in the result area most-significant first, so this is the one
//! machine whose area needs no reversal, only a leading-zero trim. The
//! remainder survives in context and is exposed on [`DivideMachine`].

use crate::ops::bits;
use crate::ops::context::OpContext;
use crate::ops::outcome::Outcome;
use crate::ops::run::{validate_operand, BinaryProgram, Machine, OperationRun, Program};
use crate::ops::OperationError;
use crate::phase_enum;
use crate::tape::{Cell, Move};
use std::cmp::Ordering;

phase_enum! {
    /// Control phases of the division machine.
    pub enum DividePhase {
        /// Step off the leading blank.
        Start,
        /// Scan right for the leftmost unmarked dividend digit.
        SeekDividendBit,
        /// Append the consumed digit to the running remainder.
        AccumulateRemainder,
        /// Reduce the remainder by one divisor.
        SubtractDivisor,
        /// Splice the quotient bit into the result area.
        EmitQuotientBit,
        /// Return to the origin for the next digit.
        Rewind,
        /// Trim leading zeros off the quotient.
        Cleanup,
        /// Halted.
        Done,
    }
    terminal: [Done]
}

/// Control logic of the division machine.
pub struct DivideProgram;

impl Program for DivideProgram {
    type P = DividePhase;

    fn name() -> &'static str {
        "divide"
    }

    fn terminal() -> DividePhase {
        DividePhase::Done
    }

    fn advance(run: &mut OperationRun<DividePhase>) {
        match run.phase() {
            DividePhase::Start => {
                run.move_head(Move::Right);
                run.goto(DividePhase::SeekDividendBit);
            }
            DividePhase::SeekDividendBit => match run.read() {
                Cell::MarkX => run.move_head(Move::Right),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit1 = cell.digit();
                    run.write(Cell::MarkX);
                    run.goto_with(
                        DividePhase::AccumulateRemainder,
                        format!("consumed dividend digit {cell}"),
                    );
                }
                _ => {
                    // Operator reached: every dividend digit is consumed.
                    run.goto_with(DividePhase::Cleanup, "dividend exhausted");
                }
            },
            DividePhase::AccumulateRemainder => {
                let digit = run.ctx_mut().digit1.take().unwrap_or(0);
                let mut remainder = std::mem::take(&mut run.ctx_mut().remainder);
                remainder.push(digit);
                let remainder = bits::trim_leading_zeros(&remainder);
                let covers = bits::compare(&remainder, &run.ctx().divisor) != Ordering::Less;
                run.ctx_mut().remainder = remainder;
                if covers {
                    run.goto_with(DividePhase::SubtractDivisor, "remainder covers the divisor");
                } else {
                    run.ctx_mut().bit = 0;
                    run.goto_with(
                        DividePhase::EmitQuotientBit,
                        "remainder below the divisor, quotient bit 0",
                    );
                }
            }
            DividePhase::SubtractDivisor => {
                let difference = bits::subtract(&run.ctx().remainder, &run.ctx().divisor);
                run.ctx_mut().remainder = difference;
                run.ctx_mut().bit = 1;
                run.goto_with(
                    DividePhase::EmitQuotientBit,
                    "subtracted the divisor, quotient bit 1",
                );
            }
            DividePhase::EmitQuotientBit => {
                let bit = run.ctx().bit;
                run.splice_result_digit(bit);
                run.goto_with(DividePhase::Rewind, format!("spliced quotient bit {bit}"));
            }
            DividePhase::Rewind => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(DividePhase::SeekDividendBit);
                } else {
                    run.move_head(Move::Left);
                }
            }
            DividePhase::Cleanup => {
                // Most-significant first already; only the trim is needed.
                let digits = run.result_digits();
                let trimmed = bits::trim_leading_zeros(&digits);
                run.rebuild_with_digits(&trimmed);
                run.goto_with(DividePhase::Done, "trimmed the quotient");
            }
            DividePhase::Done => {}
        }
    }

    fn conclude(run: &OperationRun<DividePhase>) -> Outcome {
        Outcome::from_magnitude(run.digits_text(), run.ctx().negative)
    }
}

impl BinaryProgram for DivideProgram {
    fn operator() -> Cell {
        Cell::Divide
    }

    fn start() -> DividePhase {
        DividePhase::Start
    }

    /// Rejects a zero divisor before any tape exists.
    fn prepare(
        operand1: &str,
        operand2: &str,
    ) -> Result<(String, String, OpContext), OperationError> {
        validate_operand(operand1)?;
        validate_operand(operand2)?;
        let divisor = bits::trim_leading_zeros(&bits::digits(operand2));
        if divisor == [0] {
            return Err(OperationError::DivisionByZero);
        }
        let ctx = OpContext {
            divisor,
            ..OpContext::default()
        };
        Ok((operand1.to_string(), operand2.to_string(), ctx))
    }
}

/// Machine that divides two binary numbers, truncating toward zero.
pub type DivideMachine = Machine<DivideProgram>;

impl Machine<DivideProgram> {
    /// The running remainder as a binary string; once the machine has
    /// halted, the remainder of the division.
    pub fn remainder(&self) -> String {
        bits::render(&self.run_ref().ctx().remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divide(a: &str, b: &str) -> (Outcome, String) {
        let mut machine = DivideMachine::new(a, b).unwrap();
        let outcome = machine.run().unwrap();
        (outcome, machine.remainder())
    }

    #[test]
    fn divides_binary_numbers() {
        let cases = [
            ("1100", "10", "110", 6, "0"),
            ("111", "10", "11", 3, "1"),
            ("101", "1", "101", 5, "0"),
            ("1", "10", "0", 0, "1"),
            ("100101", "11", "1100", 12, "1"),
        ];
        for (a, b, binary, decimal, remainder) in cases {
            let (outcome, rem) = divide(a, b);
            assert_eq!(outcome.binary(), binary, "{a} / {b}");
            assert_eq!(outcome.decimal(), decimal, "{a} / {b}");
            assert_eq!(rem, remainder, "{a} / {b} remainder");
        }
    }

    #[test]
    fn zero_dividend_divides_cleanly() {
        let (outcome, remainder) = divide("0", "101");
        assert_eq!(outcome.binary(), "0");
        assert_eq!(remainder, "0");
    }

    #[test]
    fn zero_divisor_is_rejected_before_the_run() {
        assert!(matches!(
            DivideMachine::new("10", "0"),
            Err(OperationError::DivisionByZero)
        ));
        assert!(matches!(
            DivideMachine::new("10", "000"),
            Err(OperationError::DivisionByZero)
        ));
    }

    #[test]
    fn quotient_accumulates_most_significant_first() {
        let mut machine = DivideMachine::new("1100", "10").unwrap();
        while machine.phase_name() != "Rewind" {
            machine.step();
        }
        // The first consumed digit cannot cover the two-digit divisor.
        assert_eq!(machine.tape_text(), "#X100÷10=0#");
    }

    #[test]
    fn rejects_invalid_operands() {
        assert!(DivideMachine::new("", "1").is_err());
        assert!(DivideMachine::new("21", "1").is_err());
    }
}
