//! Binary Addition on Tape
//!
//! This example steps the addition machine through 101 + 110 and
//! narrates the interesting tape events along the way.
//!
//! Key concepts:
//! - Mark-and-consume digit cycles (X marks)
//! - The `=`-delimited result area, least significant digit first
//! - The chained reversal stage that flips the digits into place
//!
//! Run with: cargo run --example binary_addition

use bitmill::ops::{StepStatus, SumMachine};

fn main() {
    println!("=== Binary Addition: 101 + 110 ===\n");

    let mut machine = SumMachine::new("101", "110").unwrap();
    println!("Initial tape: {}\n", machine.tape_text());

    // Step the machine ourselves, reporting every noted tape event and
    // skipping the plain scanning steps.
    loop {
        let status = machine.step();
        if let Some(snapshot) = machine.trace().last() {
            if !snapshot.description.starts_with("phase ") {
                println!(
                    "[{:>3}] {:<20} {}",
                    machine.steps(),
                    snapshot.tape_text(),
                    snapshot.description
                );
            }
        }
        if status == StepStatus::Halted {
            break;
        }
    }

    let outcome = machine.outcome().expect("machine halted cleanly");
    println!("\nFinal tape: {}", machine.tape_text());
    println!(
        "101 + 110 = {} (decimal {})",
        outcome.binary(),
        outcome.decimal()
    );
    println!("Total steps across both stages: {}", machine.steps());

    println!("\n=== Example Complete ===");
}
