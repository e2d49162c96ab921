//! Digit-reversal machine.
//!
//! Consumes the rightmost unmarked digit of the region after the
//! origin, relocates it past the terminal blank, and repeats; because
//! consumption runs right to left while relocation appends left to
//! right, the relocated region ends up reversed. A final compaction
//! step rebuilds the tape as `# reversed #`.
//!
//! Addition chains this machine onto its least-significant-first digit
//! output to produce a conventional most-significant-first result; it
//! also works standalone on any digit string.

use crate::ops::context::OpContext;
use crate::ops::outcome::Outcome;
use crate::ops::run::{validate_operand, Machine, OperationRun, Program};
use crate::ops::OperationError;
use crate::phase_enum;
use crate::tape::{Cell, Move, Tape};

phase_enum! {
    /// Control phases of the digit-reversal machine.
    pub enum ReversePhase {
        /// Step off the leading blank.
        Start,
        /// Scan right for the terminal blank of the digit region.
        SeekEnd,
        /// Scan left for the rightmost unmarked digit.
        SeekDigit,
        /// Carry the consumed digit right, up to the terminal blank.
        Relocate,
        /// Cross into the relocated region and append the digit.
        Append,
        /// Return to the origin for the next cycle.
        Rewind,
        /// Rebuild the tape from the relocated digits.
        Compact,
        /// Halted.
        Done,
    }
    terminal: [Done]
}

/// Control logic of the reversal machine.
pub struct ReverseProgram;

impl Program for ReverseProgram {
    type P = ReversePhase;

    fn name() -> &'static str {
        "reverse"
    }

    fn terminal() -> ReversePhase {
        ReversePhase::Done
    }

    fn advance(run: &mut OperationRun<ReversePhase>) {
        match run.phase() {
            ReversePhase::Start => {
                run.move_head(Move::Right);
                run.goto(ReversePhase::SeekEnd);
            }
            ReversePhase::SeekEnd => {
                if run.read() == Cell::Blank {
                    run.move_head(Move::Left);
                    run.goto(ReversePhase::SeekDigit);
                } else {
                    run.move_head(Move::Right);
                }
            }
            ReversePhase::SeekDigit => match run.read() {
                Cell::MarkX => run.move_head(Move::Left),
                cell if cell.is_digit() => {
                    run.ctx_mut().digit1 = cell.digit();
                    run.write(Cell::MarkX);
                    run.goto_with(
                        ReversePhase::Relocate,
                        format!("consumed digit {cell}, relocating"),
                    );
                }
                _ => {
                    // Left edge: every digit has been relocated.
                    run.goto_with(ReversePhase::Compact, "all digits relocated");
                }
            },
            ReversePhase::Relocate => {
                if run.read() == Cell::Blank {
                    // The terminal blank stays; the digit goes past it.
                    run.move_head(Move::Right);
                    run.goto(ReversePhase::Append);
                } else {
                    run.move_head(Move::Right);
                }
            }
            ReversePhase::Append => {
                if run.read() == Cell::Blank {
                    let digit = run.ctx_mut().digit1.take().unwrap_or(0);
                    run.write(Cell::from_digit(digit));
                    run.goto_with(
                        ReversePhase::Rewind,
                        format!("digit {digit} appended after the terminal blank"),
                    );
                } else {
                    run.move_head(Move::Right);
                }
            }
            ReversePhase::Rewind => {
                if run.at_left_edge() {
                    run.move_head(Move::Right);
                    run.goto(ReversePhase::SeekEnd);
                } else {
                    run.move_head(Move::Left);
                }
            }
            ReversePhase::Compact => {
                let reversed = relocated_digits(run);
                run.rebuild_with_digits(&reversed);
                run.goto_with(ReversePhase::Done, "compacted reversed digits");
            }
            ReversePhase::Done => {}
        }
    }

    fn conclude(run: &OperationRun<ReversePhase>) -> Outcome {
        Outcome::from_magnitude(run.digits_text(), run.ctx().negative)
    }
}

/// The digits relocated past the first interior blank, in tape order.
fn relocated_digits(run: &OperationRun<ReversePhase>) -> Vec<u8> {
    let cells = run.tape().symbols();
    let interior = cells
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, c)| **c == Cell::Blank)
        .map(|(i, _)| i);
    match interior {
        Some(i) => cells[i + 1..].iter().map_while(|c| c.digit()).collect(),
        None => Vec::new(),
    }
}

/// Machine that reverses a binary digit string on tape.
pub type ReverseMachine = Machine<ReverseProgram>;

impl Machine<ReverseProgram> {
    /// Lay out `# digits #` and prepare to reverse it.
    pub fn for_digits(digits: &str) -> Result<Self, OperationError> {
        validate_operand(digits)?;
        let mut cells = Vec::with_capacity(digits.len() + 2);
        cells.push(Cell::Blank);
        cells.extend(digits.chars().map(|c| Cell::from_digit(u8::from(c == '1'))));
        cells.push(Cell::Blank);
        tracing::debug!(op = "reverse", digits, "machine constructed");
        Ok(Self::from_parts(
            Tape::from_symbols(cells),
            ReversePhase::Start,
            OpContext::default(),
        ))
    }

    /// Chain onto a compacted `# digits #` tape left by another
    /// machine.
    pub(crate) fn from_tape(tape: Tape<Cell>) -> Self {
        Self::from_parts(tape, ReversePhase::Start, OpContext::default())
    }
}
