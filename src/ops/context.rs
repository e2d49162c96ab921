//! Per-run scratch registers.

use serde::{Deserialize, Serialize};

/// Scratch registers of one operation run.
///
/// Everything a machine remembers besides the tape and the control
/// phase lives here, as explicit fields rather than ambient machine
/// globals: the carry/borrow flags of the digit rules, the digits
/// captured by the current cycle, and the operator-specific registers
/// (shift and slot counters for multiplication, divisor and running
/// remainder for division). The driver hands each program the same
/// struct; programs touch only the fields they documented.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpContext {
    /// Pending carry of the addition rule.
    pub carry: u8,
    /// Pending borrow of the subtraction rule.
    pub borrow: u8,
    /// Digit consumed from operand 1 in the current cycle.
    pub digit1: Option<u8>,
    /// Digit consumed from operand 2 in the current cycle.
    pub digit2: Option<u8>,
    /// Digit waiting to be spliced into the result area.
    pub bit: u8,
    /// Sign flag of the eventual outcome; magnitudes stay unsigned.
    pub negative: bool,
    /// Multiplication: bit position of the multiplier digit being
    /// processed, incremented once per digit regardless of its value.
    pub shift: usize,
    /// Multiplication: result-area slot the next digit lands in.
    pub slot: usize,
    /// Multiplication: the multiplicand's digits in display order, used
    /// to restore consumed digits between passes.
    pub multiplicand: Vec<u8>,
    /// Division: the divisor's digits, most significant first, leading
    /// zeros trimmed.
    pub divisor: Vec<u8>,
    /// Division: the running remainder, most significant first.
    pub remainder: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_all_clear() {
        let ctx = OpContext::default();
        assert_eq!(ctx.carry, 0);
        assert_eq!(ctx.borrow, 0);
        assert_eq!(ctx.digit1, None);
        assert_eq!(ctx.digit2, None);
        assert!(!ctx.negative);
        assert!(ctx.remainder.is_empty());
    }

    #[test]
    fn context_serializes_correctly() {
        let ctx = OpContext {
            carry: 1,
            divisor: vec![1, 0],
            ..OpContext::default()
        };
        let json = serde_json::to_string(&ctx).unwrap();
        let back: OpContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
