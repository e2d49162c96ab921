//! Symbol tape with a movable head cursor.
//!
//! The tape is the only storage a machine has: an ordered sequence of
//! symbols that extends itself with blanks whenever the head moves past
//! either edge, so the head is always a valid index.

pub mod cell;

pub use cell::Cell;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Trait for symbols storable on a [`Tape`].
///
/// Symbols are small copyable values. Each symbol type designates one
/// blank symbol used to pad the tape when it grows.
///
/// # Example
///
/// ```rust
/// use bitmill::tape::{Tape, TapeSymbol};
///
/// // `char` tapes use '#' as their blank.
/// assert_eq!(<char as TapeSymbol>::blank(), '#');
///
/// let tape: Tape<char> = Tape::from_text("101");
/// assert_eq!(tape.read(), '1');
/// ```
pub trait TapeSymbol:
    Copy + PartialEq + Eq + Debug + Display + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The blank symbol used to pad the tape.
    fn blank() -> Self;
}

impl TapeSymbol for char {
    fn blank() -> Self {
        '#'
    }
}

/// Head movement directive of a transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one cell left, growing the tape at the left edge.
    Left,
    /// Move the head one cell right, growing the tape at the right edge.
    Right,
    /// Leave the head where it is.
    Stay,
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Move::Left => "L",
            Move::Right => "R",
            Move::Stay => "S",
        };
        write!(f, "{letter}")
    }
}

/// Auto-extending symbol tape with a head cursor.
///
/// A tape is owned exclusively by the machine driving it; it is never
/// shared between machines. Reads outside the stored cells return the
/// blank symbol instead of failing, and moving the head past either
/// edge grows the tape by one blank cell, so every operation on a tape
/// is total.
///
/// # Example
///
/// ```rust
/// use bitmill::tape::{Move, Tape};
///
/// let mut tape: Tape<char> = Tape::from_text("11");
/// assert_eq!(tape.read(), '1');
///
/// tape.move_head(Move::Right);
/// tape.move_head(Move::Right); // past the right edge
/// assert_eq!(tape.read(), '#');
///
/// tape.write('0');
/// assert_eq!(tape.render(), "110");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Tape<Y: TapeSymbol> {
    cells: Vec<Y>,
    head: usize,
}

impl<Y: TapeSymbol> Tape<Y> {
    /// Create a tape holding a single blank cell, head on it.
    pub fn new() -> Self {
        Self {
            cells: vec![Y::blank()],
            head: 0,
        }
    }

    /// Create a tape from a symbol sequence, head at index 0.
    ///
    /// An empty sequence yields a single blank cell so the head
    /// invariant holds from the start.
    pub fn from_symbols(symbols: Vec<Y>) -> Self {
        let cells = if symbols.is_empty() {
            vec![Y::blank()]
        } else {
            symbols
        };
        Self { cells, head: 0 }
    }

    /// Rebuild a tape from previously captured cells and head position.
    ///
    /// Used when restoring a snapshot; the head is clamped into range.
    pub(crate) fn with_head(symbols: Vec<Y>, head: usize) -> Self {
        let mut tape = Self::from_symbols(symbols);
        tape.head = head.min(tape.cells.len() - 1);
        tape
    }

    /// The symbol under the head.
    pub fn read(&self) -> Y {
        self.cells[self.head]
    }

    /// Overwrite the symbol under the head.
    pub fn write(&mut self, symbol: Y) {
        self.cells[self.head] = symbol;
    }

    /// Move the head, growing the tape when it crosses an edge.
    ///
    /// A move left at index 0 inserts a blank in front and leaves the
    /// head at index 0 (the tape is renormalized rather than using
    /// negative indices). A move right at the last cell appends a
    /// blank.
    pub fn move_head(&mut self, direction: Move) {
        match direction {
            Move::Left => {
                if self.head == 0 {
                    self.cells.insert(0, Y::blank());
                } else {
                    self.head -= 1;
                }
            }
            Move::Right => {
                if self.head + 1 == self.cells.len() {
                    self.cells.push(Y::blank());
                }
                self.head += 1;
            }
            Move::Stay => {}
        }
    }

    /// Read the symbol at an arbitrary index.
    ///
    /// Indices outside the stored cells read as blank.
    pub fn get(&self, index: usize) -> Y {
        self.cells.get(index).copied().unwrap_or_else(Y::blank)
    }

    /// Insert a symbol at `index`, shifting later cells right.
    ///
    /// The head keeps pointing at the same logical cell: when the
    /// insertion happens at or before it, the head index moves with
    /// the shifted cells.
    pub fn insert(&mut self, index: usize, symbol: Y) {
        let index = index.min(self.cells.len());
        self.cells.insert(index, symbol);
        if index <= self.head {
            self.head += 1;
        }
    }

    /// Current head index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Place the head on an existing cell.
    ///
    /// The target is clamped to the last cell; the tape does not grow.
    pub fn seek(&mut self, index: usize) {
        self.head = index.min(self.cells.len() - 1);
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the tape stores no cells. Never true for tapes built
    /// through the public constructors, which keep at least one blank.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All stored cells in order.
    pub fn symbols(&self) -> &[Y] {
        &self.cells
    }

    /// The tape contents as a display string, one glyph per cell.
    pub fn render(&self) -> String {
        self.cells.iter().map(|c| c.to_string()).collect()
    }

    /// Like [`render`](Self::render), with the head cell bracketed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitmill::tape::{Move, Tape};
    ///
    /// let mut tape: Tape<char> = Tape::from_text("10");
    /// tape.move_head(Move::Right);
    /// assert_eq!(tape.render_with_head(), "1[0]");
    /// ```
    pub fn render_with_head(&self) -> String {
        let mut out = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if i == self.head {
                out.push('[');
                out.push_str(&cell.to_string());
                out.push(']');
            } else {
                out.push_str(&cell.to_string());
            }
        }
        out
    }
}

impl Tape<char> {
    /// Create a `char` tape from text, head at index 0.
    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars().collect())
    }
}

impl<Y: TapeSymbol> Default for Tape<Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Y: TapeSymbol> Display for Tape<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tape_is_a_single_blank() {
        let tape: Tape<char> = Tape::new();
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(), '#');
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn empty_symbols_fall_back_to_one_blank() {
        let tape: Tape<char> = Tape::from_symbols(Vec::new());
        assert_eq!(tape.render(), "#");
    }

    #[test]
    fn moving_right_past_the_edge_appends_a_blank() {
        let mut tape = Tape::from_text("10");
        tape.move_head(Move::Right);
        tape.move_head(Move::Right);
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.head(), 2);
        assert_eq!(tape.read(), '#');
    }

    #[test]
    fn moving_left_at_the_edge_renormalizes() {
        let mut tape = Tape::from_text("10");
        tape.move_head(Move::Left);
        assert_eq!(tape.render(), "#10");
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), '#');
    }

    #[test]
    fn stay_leaves_head_and_cells_alone() {
        let mut tape = Tape::from_text("10");
        tape.move_head(Move::Stay);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.len(), 2);
    }

    #[test]
    fn out_of_bounds_get_reads_blank() {
        let tape = Tape::from_text("1");
        assert_eq!(tape.get(0), '1');
        assert_eq!(tape.get(99), '#');
    }

    #[test]
    fn write_replaces_the_cell_under_the_head() {
        let mut tape = Tape::from_text("10");
        tape.write('0');
        assert_eq!(tape.render(), "00");
    }

    #[test]
    fn insert_before_head_shifts_the_head() {
        let mut tape = Tape::from_text("10");
        tape.move_head(Move::Right);
        tape.insert(0, '#');
        assert_eq!(tape.render(), "#10");
        assert_eq!(tape.read(), '0');
    }

    #[test]
    fn insert_after_head_leaves_the_head() {
        let mut tape = Tape::from_text("10");
        tape.insert(2, '1');
        assert_eq!(tape.render(), "101");
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn seek_clamps_to_the_last_cell() {
        let mut tape = Tape::from_text("101");
        tape.seek(99);
        assert_eq!(tape.head(), 2);
        tape.seek(1);
        assert_eq!(tape.read(), '0');
    }

    #[test]
    fn with_head_restores_position() {
        let tape: Tape<char> = Tape::with_head(vec!['1', '0', '1'], 2);
        assert_eq!(tape.head(), 2);
        assert_eq!(tape.read(), '1');
    }

    #[test]
    fn render_with_head_brackets_the_cursor() {
        let mut tape = Tape::from_text("101");
        tape.move_head(Move::Right);
        assert_eq!(tape.render_with_head(), "1[0]1");
    }

    #[test]
    fn tape_serializes_correctly() {
        let mut tape = Tape::from_text("1+1");
        tape.move_head(Move::Right);
        let json = serde_json::to_string(&tape).unwrap();
        let restored: Tape<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(tape, restored);
    }
}
