//! Expression Evaluation
//!
//! This example walks one expression through every pipeline stage
//! (tokens, postfix order, machine-backed evaluation), then evaluates a
//! batch of expressions and shows how failures are reported.
//!
//! Key concepts:
//! - Tokenizing with operator spelling aliases (x, ×, ÷)
//! - Shunting-yard reordering by precedence
//! - One full tape-machine run per operator
//! - Signed results from unsigned machines
//!
//! Run with: cargo run --example expression_eval

use bitmill::eval::{evaluate, to_postfix, tokenize};

fn main() {
    println!("=== Expression Evaluation ===\n");

    let input = "(101 + 110) * 10";
    let tokens = tokenize(input).unwrap();
    let postfix = to_postfix(&tokens).unwrap();

    println!("Input:   {input}");
    println!("Tokens:  {}", render(&tokens));
    println!("Postfix: {}", render(&postfix));

    let outcome = evaluate(input).unwrap();
    println!(
        "Result:  {} (decimal {})\n",
        outcome.binary(),
        outcome.decimal()
    );

    println!("More expressions:");
    let batch = [
        "101 + 110",
        "1010 - 101",
        "10 - 101",
        "11 x 10",
        "1100 ÷ 10",
        "101 + 110 * 10",
    ];
    for input in batch {
        let outcome = evaluate(input).unwrap();
        println!(
            "  {input:<16} = {:>8}  (decimal {})",
            outcome.to_string(),
            outcome.signed_decimal()
        );
    }

    println!("\nFailures echo the input with the first problem found:");
    for input in ["101 ++ 110", "1100 / 0", "101"] {
        if let Err(failure) = evaluate(input) {
            println!("  {failure}");
        }
    }

    println!("\n=== Example Complete ===");
}

fn render(tokens: &[bitmill::eval::Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
