//! SIP2 checksum calculation and verification
//!
//! The checksum is the binary sum of every ASCII byte of the message up to
//! and including the "AZ" field identifier, two's-complement negated and
//! rendered as four uppercase hexadecimal digits.

use crate::field::code;

/// Compute the checksum digits for a message ending in the "AZ" identifier.
pub fn compute(message: &str) -> String {
    format!("{:04X}", byte_sum(message).wrapping_neg())
}

/// Verify the checksum embedded in a raw message.
///
/// Returns `false` when the message carries no "AZ" trailer, when the
/// trailer is not exactly four hex digits, or when the digits do not cancel
/// the byte sum of the preceding text. Pure function of the input string.
pub fn verify(raw: &str) -> bool {
    let Some(idx) = raw.rfind(code::CHECKSUM) else {
        return false;
    };
    let (head, digits) = raw.split_at(idx + code::CHECKSUM.len());
    if digits.len() != 4 {
        return false;
    }
    let Ok(embedded) = u16::from_str_radix(digits, 16) else {
        return false;
    };
    byte_sum(head).wrapping_add(embedded) == 0
}

fn byte_sum(text: &str) -> u16 {
    text.bytes().fold(0u16, |sum, b| sum.wrapping_add(u16::from(b)))
}
