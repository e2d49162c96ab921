//! Bit-vector helpers shared by the operation machines.
//!
//! Digits travel as `Vec<u8>` in display order (most significant
//! first). These helpers never allocate a number type: comparing and
//! subtracting work digit-serially, the same way the machines do it on
//! tape.

use std::cmp::Ordering;

/// The digits of a validated binary operand, most significant first.
pub(crate) fn digits(operand: &str) -> Vec<u8> {
    operand
        .chars()
        .map(|c| if c == '1' { 1 } else { 0 })
        .collect()
}

/// Drop leading zeros, always keeping at least one digit.
pub(crate) fn trim_leading_zeros(bits: &[u8]) -> Vec<u8> {
    let first = bits.iter().position(|b| *b != 0);
    match first {
        Some(i) => bits[i..].to_vec(),
        None => vec![0],
    }
}

/// Compare two bit strings by numeric value.
pub(crate) fn compare(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.cmp(&b),
        unequal => unequal,
    }
}

/// `a − b` for `a ≥ b`, using the per-digit borrow rule.
///
/// In each position, when the minuend digit covers the subtrahend digit
/// plus the incoming borrow the difference is written and the borrow
/// clears; otherwise the digit is raised by two and the borrow carries
/// into the next position. The result comes back trimmed.
pub(crate) fn subtract(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0u8;
    for i in 0..a.len() {
        let d1 = a[a.len() - 1 - i];
        let d2 = if i < b.len() { b[b.len() - 1 - i] } else { 0 };
        if d1 >= d2 + borrow {
            out.push(d1 - d2 - borrow);
            borrow = 0;
        } else {
            out.push(d1 + 2 - d2 - borrow);
            borrow = 1;
        }
    }
    out.reverse();
    trim_leading_zeros(&out)
}

/// Render bits as a binary string; empty renders as `"0"`.
pub(crate) fn render(bits: &[u8]) -> String {
    if bits.is_empty() {
        return "0".to_string();
    }
    bits.iter()
        .map(|b| if *b == 0 { '0' } else { '1' })
        .collect()
}
