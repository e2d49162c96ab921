//! The result value of a finished operation run.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Final value of one arithmetic machine run.
///
/// The magnitude is the binary digit string read off the finished tape,
/// exactly as the machine left it; addition, notably, keeps its
/// leading zeros. The sign is a separate flag (there is no two's
/// complement anywhere in the crate), and a zero magnitude is never
/// negative. The decimal field is the magnitude decoded for display;
/// operand bounds keep it exact in 64 bits.
///
/// # Example
///
/// ```rust
/// use bitmill::ops::SubtractMachine;
///
/// let outcome = SubtractMachine::new("101", "1010").unwrap().run().unwrap();
/// assert_eq!(outcome.binary(), "101");
/// assert!(outcome.negative());
/// assert_eq!(outcome.decimal(), 5);
/// assert_eq!(outcome.signed_decimal(), -5);
/// assert_eq!(outcome.to_string(), "-101");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    binary: String,
    negative: bool,
    decimal: u64,
}

impl Outcome {
    /// Build an outcome from a magnitude string and a sign flag.
    ///
    /// The decimal decoding saturates rather than wrapping; with the
    /// operand bounds in force it is always exact. A zero magnitude
    /// drops the sign.
    pub(crate) fn from_magnitude(binary: String, negative: bool) -> Self {
        let mut decimal: u64 = 0;
        for c in binary.chars() {
            let bit = u64::from(c == '1');
            decimal = decimal.saturating_mul(2).saturating_add(bit);
        }
        Self {
            binary,
            negative: negative && decimal != 0,
            decimal,
        }
    }

    /// The binary magnitude, exactly as it stands on the finished tape.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Whether the value is negative. Never true for a zero magnitude.
    pub fn negative(&self) -> bool {
        self.negative
    }

    /// The magnitude decoded to decimal.
    pub fn decimal(&self) -> u64 {
        self.decimal
    }

    /// The signed decimal value.
    pub fn signed_decimal(&self) -> i128 {
        if self.negative {
            -i128::from(self.decimal)
        } else {
            i128::from(self.decimal)
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.binary)
        } else {
            write!(f, "{}", self.binary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_binary_to_decimal() {
        let outcome = Outcome::from_magnitude("1011".into(), false);
        assert_eq!(outcome.decimal(), 11);
        assert_eq!(outcome.signed_decimal(), 11);
        assert_eq!(outcome.to_string(), "1011");
    }

    #[test]
    fn leading_zeros_do_not_change_the_value() {
        let outcome = Outcome::from_magnitude("0101".into(), false);
        assert_eq!(outcome.binary(), "0101");
        assert_eq!(outcome.decimal(), 5);
    }

    #[test]
    fn zero_is_never_negative() {
        let outcome = Outcome::from_magnitude("0".into(), true);
        assert!(!outcome.negative());
        assert_eq!(outcome.signed_decimal(), 0);
        assert_eq!(outcome.to_string(), "0");
    }

    #[test]
    fn negative_values_render_with_a_sign() {
        let outcome = Outcome::from_magnitude("110".into(), true);
        assert!(outcome.negative());
        assert_eq!(outcome.signed_decimal(), -6);
        assert_eq!(outcome.to_string(), "-110");
    }

    #[test]
    fn outcome_serializes_correctly() {
        let outcome = Outcome::from_magnitude("111".into(), true);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
