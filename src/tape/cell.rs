//! The closed alphabet used by the arithmetic machines.

use super::TapeSymbol;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One symbol of the arithmetic tape alphabet.
///
/// The alphabet is closed: binary digits, the four operator glyphs, the
/// result-area delimiter `=`, the two consumption markers `X` and `Y`,
/// and the blank (rendered `#`). Machines never place any other symbol
/// on their tapes.
///
/// # Example
///
/// ```rust
/// use bitmill::tape::Cell;
///
/// assert_eq!(Cell::One.to_string(), "1");
/// assert_eq!(Cell::Times.to_string(), "×");
/// assert_eq!(Cell::Blank.to_string(), "#");
/// assert_eq!(Cell::One.digit(), Some(1));
/// assert_eq!(Cell::MarkX.digit(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Cell {
    /// Binary digit `0`.
    Zero,
    /// Binary digit `1`.
    One,
    /// Addition operator `+`.
    Plus,
    /// Subtraction operator `−`.
    Minus,
    /// Multiplication operator `×`.
    Times,
    /// Division operator `÷`.
    Divide,
    /// Result-area delimiter `=`.
    Equals,
    /// Primary consumption marker `X` left where a digit was read.
    MarkX,
    /// Secondary consumption marker `Y` used for the multiplier role.
    MarkY,
    /// The blank cell, rendered `#`.
    Blank,
}

impl Cell {
    /// The digit value of this cell, if it is a binary digit.
    pub fn digit(self) -> Option<u8> {
        match self {
            Cell::Zero => Some(0),
            Cell::One => Some(1),
            _ => None,
        }
    }

    /// The digit cell for a bit value (`0` stays zero, anything else is one).
    pub fn from_digit(digit: u8) -> Self {
        if digit == 0 {
            Cell::Zero
        } else {
            Cell::One
        }
    }

    /// Whether this cell is a binary digit.
    pub fn is_digit(self) -> bool {
        matches!(self, Cell::Zero | Cell::One)
    }

    /// Whether this cell is a consumption marker.
    pub fn is_mark(self) -> bool {
        matches!(self, Cell::MarkX | Cell::MarkY)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Cell::Zero => '0',
            Cell::One => '1',
            Cell::Plus => '+',
            Cell::Minus => '−',
            Cell::Times => '×',
            Cell::Divide => '÷',
            Cell::Equals => '=',
            Cell::MarkX => 'X',
            Cell::MarkY => 'Y',
            Cell::Blank => '#',
        };
        write!(f, "{glyph}")
    }
}

impl TapeSymbol for Cell {
    fn blank() -> Self {
        Cell::Blank
    }
}
