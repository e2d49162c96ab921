//! Property-based tests for the operation machines.
//!
//! These tests use proptest to verify that the digit-serial machines
//! agree with native integer arithmetic across many randomly generated
//! operands, and that the structural invariants of runs hold.

use bitmill::engine::{Automaton, RunOutcome};
use bitmill::eval::evaluate;
use bitmill::ops::{apply, DivideMachine, Operator, ReverseMachine, SumMachine};
use bitmill::tape::Move;
use proptest::prelude::*;

prop_compose! {
    /// A canonical binary operand: the digits of a 32-bit value.
    fn operand()(value in 0u64..=u64::from(u32::MAX)) -> String {
        format!("{value:b}")
    }
}

prop_compose! {
    /// A small operand whose products and sums stay re-feedable as
    /// operands themselves.
    fn small_operand()(value in 0u64..0x8000) -> String {
        format!("{value:b}")
    }
}

prop_compose! {
    /// Any digit string the machines accept, leading zeros included.
    fn digit_string()(digits in proptest::collection::vec(0u8..2, 1..=32)) -> String {
        digits.iter().map(|d| if *d == 0 { '0' } else { '1' }).collect()
    }
}

fn decode(binary: &str) -> u64 {
    u64::from_str_radix(binary, 2).unwrap()
}

proptest! {
    #[test]
    fn addition_matches_native_arithmetic(a in operand(), b in operand()) {
        let outcome = apply(Operator::Add, &a, &b).unwrap();
        prop_assert_eq!(outcome.decimal(), decode(&a) + decode(&b));
        prop_assert!(!outcome.negative());
    }

    #[test]
    fn subtraction_matches_native_arithmetic(a in operand(), b in operand()) {
        let outcome = apply(Operator::Subtract, &a, &b).unwrap();
        let expected = i128::from(decode(&a)) - i128::from(decode(&b));
        prop_assert_eq!(outcome.signed_decimal(), expected);
    }

    #[test]
    fn multiplication_matches_native_arithmetic(a in operand(), b in operand()) {
        let outcome = apply(Operator::Multiply, &a, &b).unwrap();
        prop_assert_eq!(outcome.decimal(), decode(&a) * decode(&b));
    }

    #[test]
    fn division_reconstructs_the_dividend(a in operand(), b in operand()) {
        prop_assume!(decode(&b) != 0);

        let mut machine = DivideMachine::new(&a, &b).unwrap();
        let quotient = machine.run().unwrap();
        let remainder = decode(&machine.remainder());

        prop_assert_eq!(quotient.decimal() * decode(&b) + remainder, decode(&a));
        prop_assert!(remainder < decode(&b));
    }

    #[test]
    fn any_zero_divisor_spelling_is_rejected(a in operand(), zeros in 1usize..=32) {
        let divisor = "0".repeat(zeros);
        prop_assert!(DivideMachine::new(&a, &divisor).is_err());
    }

    #[test]
    fn reversal_matches_string_reversal(s in digit_string()) {
        let outcome = ReverseMachine::for_digits(&s).unwrap().run().unwrap();
        let expected: String = s.chars().rev().collect();
        prop_assert_eq!(outcome.binary(), expected);
    }

    #[test]
    fn reversal_is_an_involution(s in digit_string()) {
        let once = ReverseMachine::for_digits(&s).unwrap().run().unwrap();
        let twice = ReverseMachine::for_digits(once.binary()).unwrap().run().unwrap();
        prop_assert_eq!(twice.binary(), s);
    }

    #[test]
    fn addition_associates_under_grouping(av in 0u64..0x4000_0000, bv in 0u64..0x4000_0000, cv in 0u64..0x4000_0000) {
        let left = evaluate(&format!("({av:b} + {bv:b}) + {cv:b}")).unwrap();
        let right = evaluate(&format!("{av:b} + ({bv:b} + {cv:b})")).unwrap();
        prop_assert_eq!(left.binary(), right.binary());
        prop_assert_eq!(left.decimal(), av + bv + cv);
    }

    #[test]
    fn multiplication_distributes_over_addition(a in small_operand(), b in small_operand(), c in small_operand()) {
        let factored = evaluate(&format!("{a} * ({b} + {c})")).unwrap();
        let expanded = evaluate(&format!("{a} * {b} + {a} * {c}")).unwrap();
        prop_assert_eq!(factored.decimal(), expanded.decimal());
    }

    #[test]
    fn trace_steps_are_consecutive(a in operand(), b in operand()) {
        let mut machine = SumMachine::new(&a, &b).unwrap();
        machine.run().unwrap();

        for (i, snapshot) in machine.trace().snapshots().iter().enumerate() {
            prop_assert_eq!(snapshot.step, i);
        }
    }

    #[test]
    fn engine_bit_flipper_flips_any_input(s in digit_string()) {
        let mut machine = Automaton::new("flip");
        machine.add_transition("flip", '0', "flip", '1', Move::Right);
        machine.add_transition("flip", '1', "flip", '0', Move::Right);
        machine.add_transition("flip", '#', "done", '#', Move::Stay);
        machine.mark_accepting("done");
        machine.initialize(&s);

        let outcome = machine.run();
        let accepted = matches!(outcome, RunOutcome::Accepted { .. });
        prop_assert!(accepted);

        let flipped: String = s.chars().map(|c| if c == '0' { '1' } else { '0' }).collect();
        prop_assert_eq!(machine.tape_text(), format!("{flipped}#"));
    }
}
