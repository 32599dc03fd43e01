//! SIP2 message model and wire encoding
//!
//! A SIP2 message is a single ASCII line: a two-character command code,
//! fixed-width header fields, "|"-terminated variable fields, an optional
//! "AY" sequence digit with the "AZ" checksum trailer, and a carriage-return
//! terminator.

use crate::checksum;
use crate::error::{Sip2Error, Sip2Result};
use crate::field::code::{CHECKSUM, SEQUENCE_NUMBER};

/// Message terminator byte (carriage return).
pub const TERMINATOR: u8 = 0x0D;

/// An outgoing SIP2 request.
///
/// The transport core needs two capabilities from a request: merging a
/// client-wide default field and serializing to the wire string. Precedence
/// between pre-existing fields and injected defaults is decided by the
/// implementation.
pub trait Request {
    /// Merge a client default into the request.
    fn apply_default(&mut self, code: &str, value: &str);

    /// Serialize to the wire message string, terminator included.
    fn encode(&self) -> Sip2Result<String>;
}

/// Ordered-field SIP2 message builder.
#[derive(Debug, Clone)]
pub struct Message {
    command: String,
    fixed: String,
    fields: Vec<(String, String)>,
    sequence: Option<u8>,
    error_detection: bool,
}

impl Message {
    /// Create a new message for a two-character command code.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            fixed: String::new(),
            fields: Vec::new(),
            sequence: None,
            error_detection: true,
        }
    }

    /// Append a fixed-width header value.
    ///
    /// Fixed fields are positional and are emitted in insertion order
    /// directly after the command code.
    pub fn fixed(mut self, value: &str) -> Self {
        self.fixed.push_str(value);
        self
    }

    /// Append a variable field.
    pub fn field(mut self, code: &str, value: &str) -> Self {
        self.fields.push((code.to_string(), value.to_string()));
        self
    }

    /// Set the "AY" sequence digit (0-9).
    pub fn sequence(mut self, sequence: u8) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Omit the "AY"/"AZ" error-detection trailer.
    pub fn without_error_detection(mut self) -> Self {
        self.error_detection = false;
        self
    }

    /// Two-character command code.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether a variable field with this code is already present.
    pub fn has_field(&self, code: &str) -> bool {
        self.fields.iter().any(|(c, _)| c == code)
    }
}

impl Request for Message {
    /// Pre-existing fields win over injected defaults, and a default that
    /// already landed on the message is never appended twice.
    fn apply_default(&mut self, code: &str, value: &str) {
        if !self.has_field(code) {
            self.fields.push((code.to_string(), value.to_string()));
        }
    }

    fn encode(&self) -> Sip2Result<String> {
        if self.command.len() != 2 || !self.command.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Sip2Error::InvalidData(format!(
                "Invalid command code: {:?}",
                self.command
            )));
        }
        if self.fixed.contains('\r') {
            return Err(Sip2Error::InvalidData(
                "Fixed fields must not contain a carriage return".to_string(),
            ));
        }
        if let Some(sequence) = self.sequence {
            if sequence > 9 {
                return Err(Sip2Error::InvalidData(format!(
                    "Sequence number out of range: {}",
                    sequence
                )));
            }
        }

        let mut line = String::with_capacity(64);
        line.push_str(&self.command);
        line.push_str(&self.fixed);
        for (code, value) in &self.fields {
            if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(Sip2Error::InvalidData(format!(
                    "Invalid field code: {:?}",
                    code
                )));
            }
            if value.contains('\r') || value.contains('|') {
                return Err(Sip2Error::InvalidData(format!(
                    "Field {} value contains a reserved character",
                    code
                )));
            }
            line.push_str(code);
            line.push_str(value);
            line.push('|');
        }
        if self.error_detection {
            if let Some(sequence) = self.sequence {
                line.push_str(SEQUENCE_NUMBER);
                line.push((b'0' + sequence) as char);
            }
            line.push_str(CHECKSUM);
            let digits = checksum::compute(&line);
            line.push_str(&digits);
        }
        line.push(TERMINATOR as char);
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_without_error_detection() {
        let message = Message::new("17")
            .fixed("20260804    101010")
            .field("AO", "MAIN")
            .field("AB", "1856")
            .without_error_detection();
        let wire = message.encode().unwrap();
        assert_eq!(wire, "1720260804    101010AOMAIN|AB1856|\r");
    }

    #[test]
    fn test_encode_appends_verifiable_trailer() {
        let message = Message::new("99").fixed("0").fixed("040").fixed("2.00").sequence(1);
        let wire = message.encode().unwrap();
        assert!(wire.starts_with("9900402.00AY1AZ"));
        assert!(wire.ends_with('\r'));
        assert!(checksum::verify(wire.trim_end()));
    }

    #[test]
    fn test_apply_default_keeps_existing_field() {
        let mut message = Message::new("23").field("AO", "BRANCH");
        message.apply_default("AO", "MAIN");
        let wire = message.encode().unwrap();
        assert!(wire.contains("AOBRANCH|"));
        assert!(!wire.contains("AOMAIN|"));
    }

    #[test]
    fn test_apply_default_is_idempotent() {
        let mut message = Message::new("23");
        message.apply_default("AO", "MAIN");
        message.apply_default("AO", "MAIN");
        let wire = message.encode().unwrap();
        assert_eq!(wire.matches("AOMAIN|").count(), 1);
    }

    #[test]
    fn test_encode_rejects_reserved_characters() {
        assert!(Message::new("23").field("AA", "12|34").encode().is_err());
        assert!(Message::new("23").field("AA", "12\r34").encode().is_err());
        assert!(Message::new("XX").encode().is_err());
        assert!(Message::new("23").sequence(12).encode().is_err());
    }
}
