//! Engine Playground
//!
//! This example defines a binary increment machine at runtime on the
//! general automaton engine: no hard-coded arithmetic, just a rule
//! table over (state, symbol) pairs.
//!
//! Key concepts:
//! - Runtime rule tables with string state labels
//! - Definition validation before running
//! - Step-by-step traces with rule descriptions
//! - Restoring a machine to any recorded snapshot
//!
//! Run with: cargo run --example engine_playground

use bitmill::engine::Automaton;
use bitmill::tape::Move;

fn main() {
    println!("=== Engine Playground: Binary Increment ===\n");

    // Scan to the right end, then carry back toward the left edge.
    let mut machine = Automaton::new("seek");
    machine.add_transition("seek", '0', "seek", '0', Move::Right);
    machine.add_transition("seek", '1', "seek", '1', Move::Right);
    machine.add_transition("seek", '#', "carry", '#', Move::Left);
    machine.add_transition("carry", '1', "carry", '0', Move::Left);
    machine.add_transition("carry", '0', "done", '1', Move::Stay);
    machine.add_transition("carry", '#', "done", '1', Move::Stay);
    machine.mark_accepting("done");

    let issues = machine.validate();
    println!("Definition issues: {}\n", issues.len());

    machine.initialize("1011");
    println!("Input: 1011 (decimal 11)\n");

    let outcome = machine.run();
    println!("Run outcome: {outcome:?}\n");

    println!("Trace:");
    for snapshot in machine.trace().snapshots() {
        println!(
            "  [{:>2}] {:<8} {:<8} {}",
            snapshot.step,
            snapshot.state,
            snapshot.tape_text(),
            snapshot.description
        );
    }

    println!("\nFinal tape: {} (1100 = decimal 12)", machine.tape_text());

    // Rewind to the start and watch it reach the same place.
    machine.restore(0).unwrap();
    println!("\nRestored to snapshot 0: tape {}", machine.tape_text());
    let replay = machine.run();
    println!("Replay outcome: {replay:?}");
    println!("Replay tape: {}", machine.tape_text());

    println!("\n=== Example Complete ===");
}
