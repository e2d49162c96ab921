//! Table-driven deterministic automaton over `char` tapes.

use crate::engine::error::{DefinitionIssue, EngineError};
use crate::engine::rule::Rule;
use crate::tape::{Move, Tape};
use crate::trace::{RunTrace, Snapshot};
use std::collections::{HashMap, HashSet};

/// Default ceiling on the number of steps one `run` call will take.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// What a single [`Automaton::step`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A rule applied and the machine can keep going.
    Running,
    /// The machine halted in an accepting state.
    Accepted,
    /// The machine halted in a rejecting state.
    Rejected,
    /// No rule exists for the current (state, symbol) pair and the
    /// state is neither accepting nor rejecting. Unrecoverable for this
    /// run, reported as data rather than panicking.
    NoRule { state: String, symbol: char },
}

/// How a full [`Automaton::run`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Halted in an accepting state after `steps` total transitions.
    Accepted { steps: usize },
    /// Halted in a rejecting state after `steps` total transitions.
    Rejected { steps: usize },
    /// Stuck with no applicable rule in an ordinary state.
    NoRule {
        state: String,
        symbol: char,
        steps: usize,
    },
    /// The step limit ran out before the machine halted. Not fatal: the
    /// machine keeps its state and can be resumed or inspected.
    StepLimitReached { limit: usize },
}

/// A deterministic single-tape automaton driven by an explicit rule
/// table.
///
/// States are opaque string labels; rules are keyed by the
/// (state, symbol) pair, so the table is deterministic by construction
/// and redefining a pair silently replaces the old rule (recorded as a
/// [`DefinitionIssue::RuleOverwritten`] warning). The automaton knows
/// nothing about arithmetic; it is a general substrate that the demos
/// use for small illustrative machines.
///
/// # Example
///
/// A three-rule machine that flips every bit of its input:
///
/// ```rust
/// use bitmill::engine::{Automaton, RunOutcome};
/// use bitmill::tape::Move;
///
/// let mut machine = Automaton::new("scan");
/// machine.add_transition("scan", '0', "scan", '1', Move::Right);
/// machine.add_transition("scan", '1', "scan", '0', Move::Right);
/// machine.add_transition("scan", '#', "done", '#', Move::Stay);
/// machine.mark_accepting("done");
/// assert!(machine.validate().is_empty());
///
/// machine.initialize("101");
/// assert_eq!(machine.run(), RunOutcome::Accepted { steps: 4 });
/// assert_eq!(machine.tape_text(), "010#");
///
/// // Every step is replayable from the trace.
/// machine.restore(0).unwrap();
/// assert_eq!(machine.tape_text(), "101");
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    tape: Tape<char>,
    state: String,
    initial_state: String,
    rules: HashMap<(String, char), Rule>,
    declared: HashSet<String>,
    accepting: HashSet<String>,
    rejecting: HashSet<String>,
    trace: RunTrace<char>,
    steps: usize,
    halt: Option<StepOutcome>,
    overwrites: Vec<DefinitionIssue>,
}

impl Automaton {
    /// Create an automaton with the given initial state label.
    ///
    /// The tape starts as a single blank; call
    /// [`initialize`](Self::initialize) to load input.
    pub fn new(initial_state: &str) -> Self {
        let mut declared = HashSet::new();
        declared.insert(initial_state.to_string());
        Self {
            tape: Tape::new(),
            state: initial_state.to_string(),
            initial_state: initial_state.to_string(),
            rules: HashMap::new(),
            declared,
            accepting: HashSet::new(),
            rejecting: HashSet::new(),
            trace: RunTrace::new(),
            steps: 0,
            halt: None,
            overwrites: Vec::new(),
        }
    }

    /// Load input onto the tape and reset the run.
    ///
    /// The tape becomes the characters of `content` (a single blank for
    /// empty input), the head returns to index 0, the control state
    /// returns to the initial label, and a fresh trace is started with
    /// one snapshot of the initial configuration.
    pub fn initialize(&mut self, content: &str) {
        self.tape = Tape::from_text(content);
        self.state = self.initial_state.clone();
        self.steps = 0;
        self.halt = None;
        self.trace = RunTrace::new();
        self.trace.record(Snapshot::capture(
            0,
            &self.tape,
            &self.state,
            "initial configuration",
        ));
        tracing::debug!(
            run_id = %self.trace.run_id(),
            tape = %self.tape.render(),
            state = %self.state,
            "initialized"
        );
    }

    /// Register the rule: in `from`, reading `read`, write `write`,
    /// move `motion`, enter `to`.
    ///
    /// Both states are declared implicitly. Registering a second rule
    /// for the same (state, symbol) pair replaces the first and records
    /// a [`DefinitionIssue::RuleOverwritten`] warning retrievable via
    /// [`validate`](Self::validate).
    pub fn add_transition(&mut self, from: &str, read: char, to: &str, write: char, motion: Move) {
        self.declared.insert(from.to_string());
        self.declared.insert(to.to_string());
        let replaced = self.rules.insert(
            (from.to_string(), read),
            Rule {
                next_state: to.to_string(),
                write,
                motion,
            },
        );
        if replaced.is_some() {
            tracing::warn!(state = from, symbol = %read, "transition redefined");
            self.overwrites.push(DefinitionIssue::RuleOverwritten {
                state: from.to_string(),
                symbol: read,
            });
        }
    }

    /// Declare a state label without attaching any rule to it.
    ///
    /// Needed only for labels that no transition mentions, such as an
    /// accepting sink the machine reaches by halting in place.
    pub fn declare_state(&mut self, label: &str) {
        self.declared.insert(label.to_string());
    }

    /// Mark a label as accepting. Marking does not declare the label;
    /// an accepting label no rule mentions shows up in
    /// [`validate`](Self::validate).
    pub fn mark_accepting(&mut self, label: &str) {
        self.accepting.insert(label.to_string());
    }

    /// Mark a label as rejecting.
    pub fn mark_rejecting(&mut self, label: &str) {
        self.rejecting.insert(label.to_string());
    }

    /// Current control state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The tape in its current configuration.
    pub fn tape(&self) -> &Tape<char> {
        &self.tape
    }

    /// The tape contents as a display string.
    pub fn tape_text(&self) -> String {
        self.tape.render()
    }

    /// The trace recorded since the last `initialize`.
    pub fn trace(&self) -> &RunTrace<char> {
        &self.trace
    }

    /// Total transitions applied since the last `initialize`.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether the machine has halted (by acceptance, rejection, or a
    /// missing rule).
    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Apply at most one transition.
    ///
    /// Reads the symbol under the head and looks up the rule for the
    /// current (state, symbol) pair. When a rule exists it is applied
    /// (write, move, enter the next state, growing the tape at the
    /// edges as needed) and a snapshot describing the rule in
    /// `δ(q, s)` notation is appended to the trace. Entering an
    /// accepting or rejecting state halts the machine.
    ///
    /// When no rule exists the machine halts where it stands: accepted
    /// or rejected if the current state is marked as such, otherwise
    /// [`StepOutcome::NoRule`]. Stepping a halted machine returns the
    /// same outcome again without touching the tape.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(halt) = &self.halt {
            return halt.clone();
        }

        let read = self.tape.read();
        let key = (self.state.clone(), read);
        let Some(rule) = self.rules.get(&key).cloned() else {
            let outcome = if self.accepting.contains(&self.state) {
                StepOutcome::Accepted
            } else if self.rejecting.contains(&self.state) {
                StepOutcome::Rejected
            } else {
                StepOutcome::NoRule {
                    state: self.state.clone(),
                    symbol: read,
                }
            };
            tracing::debug!(state = %self.state, symbol = %read, outcome = ?outcome, "halted");
            self.halt = Some(outcome.clone());
            return outcome;
        };

        let description = rule.describe(&self.state, read);
        self.tape.write(rule.write);
        self.tape.move_head(rule.motion);
        self.state = rule.next_state;
        self.steps += 1;
        self.trace
            .record(Snapshot::capture(self.steps, &self.tape, &self.state, description));

        if self.accepting.contains(&self.state) {
            self.halt = Some(StepOutcome::Accepted);
            tracing::debug!(steps = self.steps, "accepted");
            StepOutcome::Accepted
        } else if self.rejecting.contains(&self.state) {
            self.halt = Some(StepOutcome::Rejected);
            tracing::debug!(steps = self.steps, "rejected");
            StepOutcome::Rejected
        } else {
            StepOutcome::Running
        }
    }

    /// Step until the machine halts or [`DEFAULT_STEP_LIMIT`] is
    /// reached.
    pub fn run(&mut self) -> RunOutcome {
        self.run_with_limit(DEFAULT_STEP_LIMIT)
    }

    /// Step until the machine halts or `limit` non-halting steps have
    /// been taken in this call.
    ///
    /// Hitting the limit is the soft outcome
    /// [`RunOutcome::StepLimitReached`]: nothing is torn down, and a
    /// later call can pick up where this one stopped.
    pub fn run_with_limit(&mut self, limit: usize) -> RunOutcome {
        let mut taken = 0;
        loop {
            if taken >= limit {
                tracing::warn!(limit, "step limit reached before halting");
                return RunOutcome::StepLimitReached { limit };
            }
            match self.step() {
                StepOutcome::Running => taken += 1,
                StepOutcome::Accepted => return RunOutcome::Accepted { steps: self.steps },
                StepOutcome::Rejected => return RunOutcome::Rejected { steps: self.steps },
                StepOutcome::NoRule { state, symbol } => {
                    return RunOutcome::NoRule {
                        state,
                        symbol,
                        steps: self.steps,
                    }
                }
            }
        }
    }

    /// Replace the current configuration with the one in the trace
    /// snapshot at `index`.
    ///
    /// Tape, head, control state, and step count all come from the
    /// snapshot; the trace itself is left intact, so every later
    /// snapshot stays available. Out-of-range indices fail without
    /// mutating anything.
    pub fn restore(&mut self, index: usize) -> Result<(), EngineError> {
        let Some(snapshot) = self.trace.get(index).cloned() else {
            return Err(EngineError::SnapshotOutOfRange {
                index,
                available: self.trace.len(),
            });
        };

        self.tape = Tape::with_head(snapshot.cells, snapshot.head);
        self.state = snapshot.state;
        self.steps = snapshot.step;
        self.halt = if self.accepting.contains(&self.state) {
            Some(StepOutcome::Accepted)
        } else if self.rejecting.contains(&self.state) {
            Some(StepOutcome::Rejected)
        } else {
            None
        };
        tracing::debug!(index, state = %self.state, "restored snapshot");
        Ok(())
    }

    /// Structurally check the machine definition.
    ///
    /// Returns every issue found (empty means clean): a missing
    /// accepting state, accepting/rejecting labels never declared by a
    /// transition or [`declare_state`](Self::declare_state), an initial
    /// state with no outgoing rule, and any recorded rule overwrites.
    /// Issues are ordered deterministically.
    pub fn validate(&self) -> Vec<DefinitionIssue> {
        let mut issues = Vec::new();

        if self.accepting.is_empty() {
            issues.push(DefinitionIssue::NoAcceptingState);
        }

        let mut undeclared_accepting: Vec<&String> = self
            .accepting
            .iter()
            .filter(|label| !self.declared.contains(*label))
            .collect();
        undeclared_accepting.sort();
        for label in undeclared_accepting {
            issues.push(DefinitionIssue::UndeclaredAccepting {
                state: label.clone(),
            });
        }

        let mut undeclared_rejecting: Vec<&String> = self
            .rejecting
            .iter()
            .filter(|label| !self.declared.contains(*label))
            .collect();
        undeclared_rejecting.sort();
        for label in undeclared_rejecting {
            issues.push(DefinitionIssue::UndeclaredRejecting {
                state: label.clone(),
            });
        }

        if !self
            .rules
            .keys()
            .any(|(from, _)| *from == self.initial_state)
        {
            issues.push(DefinitionIssue::InitialStateDeadEnd {
                state: self.initial_state.clone(),
            });
        }

        issues.extend(self.overwrites.iter().cloned());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Machine that flips every bit and accepts at the first blank.
    fn bit_flipper() -> Automaton {
        let mut machine = Automaton::new("scan");
        machine.add_transition("scan", '0', "scan", '1', Move::Right);
        machine.add_transition("scan", '1', "scan", '0', Move::Right);
        machine.add_transition("scan", '#', "done", '#', Move::Stay);
        machine.mark_accepting("done");
        machine
    }

    #[test]
    fn run_applies_rules_until_accepting() {
        let mut machine = bit_flipper();
        machine.initialize("1011");
        assert_eq!(machine.run(), RunOutcome::Accepted { steps: 5 });
        assert_eq!(machine.tape_text(), "0100#");
        assert!(machine.is_halted());
    }

    #[test]
    fn empty_input_becomes_a_single_blank() {
        let mut machine = bit_flipper();
        machine.initialize("");
        assert_eq!(machine.tape_text(), "#");
        assert_eq!(machine.run(), RunOutcome::Accepted { steps: 1 });
    }

    #[test]
    fn trace_records_initial_plus_each_step() {
        let mut machine = bit_flipper();
        machine.initialize("10");
        machine.run();

        let trace = machine.trace();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.get(0).unwrap().description, "initial configuration");
        assert_eq!(trace.get(1).unwrap().description, "δ(scan, 1) = (scan, 0, R)");
        assert_eq!(trace.get(3).unwrap().state, "done");
    }

    #[test]
    fn missing_rule_in_plain_state_reports_no_rule() {
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '1', "middle", '1', Move::Right);
        machine.mark_accepting("finish");
        machine.initialize("10");

        assert_eq!(machine.step(), StepOutcome::Running);
        assert_eq!(
            machine.step(),
            StepOutcome::NoRule {
                state: "middle".into(),
                symbol: '0'
            }
        );
        assert!(machine.is_halted());
    }

    #[test]
    fn missing_rule_in_rejecting_state_rejects() {
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '0', "sink", '0', Move::Stay);
        machine.mark_rejecting("sink");
        machine.initialize("0");

        assert_eq!(machine.step(), StepOutcome::Rejected);
        assert_eq!(machine.run(), RunOutcome::Rejected { steps: 1 });
    }

    #[test]
    fn stepping_a_halted_machine_repeats_the_outcome() {
        let mut machine = bit_flipper();
        machine.initialize("1");
        machine.run();

        let steps_before = machine.steps();
        assert_eq!(machine.step(), StepOutcome::Accepted);
        assert_eq!(machine.step(), StepOutcome::Accepted);
        assert_eq!(machine.steps(), steps_before);
    }

    #[test]
    fn non_halting_machine_hits_the_step_limit() {
        let mut machine = Automaton::new("bounce");
        machine.add_transition("bounce", '#', "bounce", '#', Move::Right);
        machine.mark_accepting("unreached");
        machine.initialize("");

        let outcome = machine.run_with_limit(25);
        assert_eq!(outcome, RunOutcome::StepLimitReached { limit: 25 });
        assert!(!machine.is_halted());
        assert_eq!(machine.steps(), 25);

        // The run is resumable; the machine still never halts.
        assert_eq!(
            machine.run_with_limit(5),
            RunOutcome::StepLimitReached { limit: 5 }
        );
        assert_eq!(machine.steps(), 30);
    }

    #[test]
    fn restore_rewinds_tape_head_and_state() {
        let mut machine = bit_flipper();
        machine.initialize("110");
        machine.run();
        assert_eq!(machine.tape_text(), "001#");

        machine.restore(0).unwrap();
        assert_eq!(machine.tape_text(), "110");
        assert_eq!(machine.state(), "scan");
        assert_eq!(machine.steps(), 0);
        assert!(!machine.is_halted());

        // Re-running from the restored configuration reproduces the run.
        assert_eq!(machine.run(), RunOutcome::Accepted { steps: 4 });
        assert_eq!(machine.tape_text(), "001#");
    }

    #[test]
    fn restore_to_a_halting_snapshot_keeps_the_halt() {
        let mut machine = bit_flipper();
        machine.initialize("1");
        machine.run();
        let last = machine.trace().len() - 1;

        machine.restore(0).unwrap();
        machine.restore(last).unwrap();
        assert!(machine.is_halted());
        assert_eq!(machine.state(), "done");
    }

    #[test]
    fn restore_out_of_range_fails_without_mutation() {
        let mut machine = bit_flipper();
        machine.initialize("10");
        machine.step();
        let tape_before = machine.tape_text();

        let err = machine.restore(99).unwrap_err();
        assert_eq!(
            err,
            EngineError::SnapshotOutOfRange {
                index: 99,
                available: 2
            }
        );
        assert_eq!(machine.tape_text(), tape_before);
    }

    #[test]
    fn validate_accepts_a_clean_definition() {
        let machine = bit_flipper();
        assert!(machine.validate().is_empty());
    }

    #[test]
    fn validate_reports_missing_accepting_state() {
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '1', "start", '1', Move::Right);
        assert_eq!(machine.validate(), vec![DefinitionIssue::NoAcceptingState]);
    }

    #[test]
    fn validate_reports_undeclared_accepting_label() {
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '1', "start", '1', Move::Right);
        machine.mark_accepting("phantom");

        let issues = machine.validate();
        assert!(issues.contains(&DefinitionIssue::UndeclaredAccepting {
            state: "phantom".into()
        }));

        // An explicit declaration clears it.
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '1', "start", '1', Move::Right);
        machine.mark_accepting("phantom");
        machine.declare_state("phantom");
        assert!(machine.validate().is_empty());
    }

    #[test]
    fn validate_reports_initial_dead_end() {
        let mut machine = Automaton::new("start");
        machine.add_transition("elsewhere", '1', "done", '1', Move::Stay);
        machine.mark_accepting("done");

        let issues = machine.validate();
        assert!(issues.contains(&DefinitionIssue::InitialStateDeadEnd {
            state: "start".into()
        }));
    }

    #[test]
    fn overwriting_a_rule_wins_and_warns() {
        let mut machine = Automaton::new("start");
        machine.add_transition("start", '1', "first", '1', Move::Right);
        machine.add_transition("start", '1', "second", '0', Move::Left);
        machine.mark_accepting("second");

        let issues = machine.validate();
        assert!(issues.contains(&DefinitionIssue::RuleOverwritten {
            state: "start".into(),
            symbol: '1'
        }));

        // Last definition wins at execution time.
        machine.initialize("1");
        assert_eq!(machine.step(), StepOutcome::Accepted);
        assert_eq!(machine.state(), "second");
        assert_eq!(machine.tape_text(), "#0");
    }

    #[test]
    fn right_edge_growth_is_visible_in_the_trace() {
        let mut machine = Automaton::new("walk");
        machine.add_transition("walk", '1', "walk", '1', Move::Right);
        machine.add_transition("walk", '#', "done", '#', Move::Stay);
        machine.mark_accepting("done");
        machine.initialize("1");
        machine.run();

        let snapshot = machine.trace().get(1).unwrap();
        assert_eq!(snapshot.tape_text(), "1#");
        assert_eq!(snapshot.head, 1);
    }
}
