//! SIP2 response model and parsing

use crate::error::{Sip2Error, Sip2Result};
use crate::field::code::{CHECKSUM, SEQUENCE_NUMBER};
use crate::field::command;

/// A typed SIP2 response.
pub trait Response: Sized {
    /// Parse a raw, already-trimmed response line.
    fn parse(raw: &str) -> Sip2Result<Self>;
}

/// Fixed-width header length for the known ACS response commands.
///
/// Unknown commands parse with an empty fixed part; their header characters
/// end up in the first variable-field segment.
fn fixed_len(cmd: &str) -> usize {
    match cmd {
        command::CHECKIN_RESPONSE => 22,
        command::CHECKOUT_RESPONSE => 22,
        command::PATRON_STATUS_RESPONSE => 35,
        command::END_SESSION_RESPONSE => 19,
        command::LOGIN_RESPONSE => 1,
        command::ACS_STATUS => 34,
        _ => 0,
    }
}

/// Generic parsed SIP2 response: command code, fixed-width header, variable
/// fields and the error-detection trailer.
#[derive(Debug, Clone)]
pub struct ResponseMessage {
    command: String,
    fixed: String,
    fields: Vec<(String, String)>,
    sequence: Option<u8>,
    checksum: Option<String>,
    raw: String,
}

impl ResponseMessage {
    /// Two-character command code.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Concatenated fixed-width header fields.
    pub fn fixed(&self) -> &str {
        &self.fixed
    }

    /// First value carried for a field code.
    pub fn field(&self, code: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| v.as_str())
    }

    /// All variable fields in wire order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// "AY" sequence digit, when present.
    pub fn sequence(&self) -> Option<u8> {
        self.sequence
    }

    /// "AZ" checksum digits, when present.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// The raw line this response was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Response for ResponseMessage {
    fn parse(raw: &str) -> Sip2Result<Self> {
        let cmd = raw
            .get(..2)
            .ok_or_else(|| Sip2Error::Parse(format!("Response too short: {:?}", raw)))?;
        let rest = &raw[2..];
        let fixed = rest.get(..fixed_len(cmd)).ok_or_else(|| {
            Sip2Error::Parse(format!("Response truncated before fixed fields: {:?}", raw))
        })?;

        let mut fields = Vec::new();
        let mut sequence = None;
        let mut checksum = None;
        for segment in rest[fixed.len()..].split('|') {
            if segment.is_empty() {
                continue;
            }
            if let Some(tail) = segment.strip_prefix(SEQUENCE_NUMBER) {
                // Error-detection trailer: "AY" digit, then "AZ" digits.
                let digit = tail
                    .get(..1)
                    .and_then(|d| d.parse::<u8>().ok())
                    .ok_or_else(|| {
                        Sip2Error::Parse(format!("Malformed sequence field: {:?}", segment))
                    })?;
                sequence = Some(digit);
                let after = &tail[1..];
                if let Some(digits) = after.strip_prefix(CHECKSUM) {
                    checksum = Some(digits.to_string());
                } else if !after.is_empty() {
                    return Err(Sip2Error::Parse(format!(
                        "Malformed error-detection trailer: {:?}",
                        segment
                    )));
                }
            } else if let Some(digits) = segment.strip_prefix(CHECKSUM) {
                checksum = Some(digits.to_string());
            } else if segment.len() >= 2 && segment.is_char_boundary(2) {
                let (code, value) = segment.split_at(2);
                fields.push((code.to_string(), value.to_string()));
            } else {
                return Err(Sip2Error::Parse(format!(
                    "Malformed field segment: {:?}",
                    segment
                )));
            }
        }

        Ok(Self {
            command: cmd.to_string(),
            fixed: fixed.to_string(),
            fields,
            sequence,
            checksum,
            raw: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_acs_status() {
        let raw = "98YYYYNN60000320260804    1010102.00AOMAIN|BXYYYYYYYYYYYNNYYY|AY1AZABCD";
        let response = ResponseMessage::parse(raw).unwrap();
        assert_eq!(response.command(), "98");
        assert_eq!(response.fixed(), "YYYYNN60000320260804    1010102.00");
        assert_eq!(response.field("AO"), Some("MAIN"));
        assert_eq!(response.field("BX"), Some("YYYYYYYYYYYNNYYY"));
        assert_eq!(response.sequence(), Some(1));
        assert_eq!(response.checksum(), Some("ABCD"));
    }

    #[test]
    fn test_parse_login_response() {
        let response = ResponseMessage::parse("941AZFBE5").unwrap();
        assert_eq!(response.command(), "94");
        assert_eq!(response.fixed(), "1");
        assert!(response.fields().is_empty());
        assert_eq!(response.sequence(), None);
        assert_eq!(response.checksum(), Some("FBE5"));
    }

    #[test]
    fn test_parse_repeated_fields_keep_wire_order() {
        let raw = "941AGline one|AGline two|";
        let response = ResponseMessage::parse(raw).unwrap();
        assert_eq!(response.field("AG"), Some("line one"));
        let lines: Vec<_> = response
            .fields()
            .iter()
            .filter(|(code, _)| code == "AG")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(lines, ["line one", "line two"]);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(ResponseMessage::parse("9").is_err());
        assert!(ResponseMessage::parse("98YYYY").is_err());
        assert!(ResponseMessage::parse("941AYxAZABCD").is_err());
    }
}
