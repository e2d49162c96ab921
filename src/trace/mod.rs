//! Replayable run history.
//!
//! Every machine records a [`Snapshot`] of its full configuration after
//! each applied transition (plus one for the initial configuration) into
//! a [`RunTrace`]. The trace is append-only while the machine runs and is
//! the only mechanism for stepping backward: restoring an earlier
//! configuration means copying it back out of the trace. Traces carry a
//! per-run UUID and serialize to JSON so a display layer can animate or
//! archive a run without touching the machine itself.

use crate::tape::{Tape, TapeSymbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of one machine configuration.
///
/// A snapshot copies the whole tape rather than a delta; runs are short
/// (bounded by the step budget) and whole-configuration records keep
/// restore and display trivial.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<Y: TapeSymbol> {
    /// Zero-based step index; the initial configuration is step 0.
    pub step: usize,
    /// Copy of every tape cell at snapshot time.
    pub cells: Vec<Y>,
    /// Head index at snapshot time.
    pub head: usize,
    /// Name of the control state the machine was in.
    pub state: String,
    /// The symbol that was under the head.
    pub read: Y,
    /// Human-readable description of how this configuration arose.
    pub description: String,
    /// When the snapshot was recorded.
    pub timestamp: DateTime<Utc>,
}

impl<Y: TapeSymbol> Snapshot<Y> {
    /// Capture the current configuration of a tape-driving machine.
    pub(crate) fn capture(
        step: usize,
        tape: &Tape<Y>,
        state: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            step,
            cells: tape.symbols().to_vec(),
            head: tape.head(),
            state: state.into(),
            read: tape.read(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// The captured tape as a display string, one glyph per cell.
    pub fn tape_text(&self) -> String {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}

/// Append-only history of one machine run.
///
/// # Example
///
/// ```rust
/// use bitmill::engine::Automaton;
/// use bitmill::tape::Move;
///
/// let mut machine = Automaton::new("start");
/// machine.add_transition("start", '1', "done", '1', Move::Right);
/// machine.mark_accepting("done");
/// machine.initialize("1");
/// machine.run();
///
/// let trace = machine.trace();
/// assert_eq!(trace.len(), 2); // initial configuration + one transition
/// assert!(trace.get(1).is_some());
/// assert!(trace.to_json().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RunTrace<Y: TapeSymbol> {
    run_id: Uuid,
    snapshots: Vec<Snapshot<Y>>,
}

impl<Y: TapeSymbol> RunTrace<Y> {
    /// Create an empty trace with a fresh run identifier.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            snapshots: Vec::new(),
        }
    }

    /// Unique identifier of the run this trace records.
    ///
    /// One expression evaluation spawns several machine runs; the id
    /// lets a display layer correlate their traces.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Append a snapshot. Traces only ever grow during a run.
    pub(crate) fn record(&mut self, snapshot: Snapshot<Y>) {
        self.snapshots.push(snapshot);
    }

    /// The snapshot at `index`, if recorded.
    pub fn get(&self, index: usize) -> Option<&Snapshot<Y>> {
        self.snapshots.get(index)
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Snapshot<Y>> {
        self.snapshots.last()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in recording order.
    pub fn snapshots(&self) -> &[Snapshot<Y>] {
        &self.snapshots
    }

    /// Serialize the whole trace to JSON for display or archiving.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<Y: TapeSymbol> Default for RunTrace<Y> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Cell;

    fn sample_tape() -> Tape<Cell> {
        Tape::from_symbols(vec![Cell::Blank, Cell::One, Cell::Plus, Cell::One, Cell::Blank])
    }

    #[test]
    fn new_trace_is_empty_with_an_id() {
        let trace: RunTrace<Cell> = RunTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.len(), 0);
        assert!(trace.last().is_none());
    }

    #[test]
    fn traces_get_distinct_run_ids() {
        let a: RunTrace<Cell> = RunTrace::new();
        let b: RunTrace<Cell> = RunTrace::new();
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn record_preserves_order_and_indexing() {
        let tape = sample_tape();
        let mut trace = RunTrace::new();
        trace.record(Snapshot::capture(0, &tape, "start", "initial configuration"));
        trace.record(Snapshot::capture(1, &tape, "scan", "moved right"));

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.get(0).map(|s| s.step), Some(0));
        assert_eq!(trace.get(1).map(|s| s.state.as_str()), Some("scan"));
        assert_eq!(trace.last().map(|s| s.step), Some(1));
        assert!(trace.get(2).is_none());
    }

    #[test]
    fn snapshot_captures_the_configuration() {
        let mut tape = sample_tape();
        tape.seek(2);
        let snapshot = Snapshot::capture(4, &tape, "combine", "marked digit");

        assert_eq!(snapshot.head, 2);
        assert_eq!(snapshot.read, Cell::Plus);
        assert_eq!(snapshot.cells.len(), 5);
        assert_eq!(snapshot.tape_text(), "#1+1#");
        assert_eq!(snapshot.description, "marked digit");
    }

    #[test]
    fn trace_round_trips_through_json() {
        let tape = sample_tape();
        let mut trace = RunTrace::new();
        trace.record(Snapshot::capture(0, &tape, "start", "initial configuration"));

        let json = trace.to_json().unwrap();
        let restored: RunTrace<Cell> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.run_id(), trace.run_id());
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.get(0).map(|s| s.tape_text()), Some("#1+1#".into()));
    }
}
