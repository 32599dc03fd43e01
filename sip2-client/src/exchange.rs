//! Request/response exchange with checksum-gated retry
//!
//! This is the reliability core of the client: one write per attempt, a
//! byte-at-a-time read up to the carriage-return terminator, and a bounded
//! resend loop gated on the response checksum.

use bytes::{BufMut, BytesMut};

use sip2_core::message::TERMINATOR;
use sip2_core::{checksum, Sip2Error, Sip2Result};
use sip2_transport::StreamAccessor;

/// Default maximum number of resends after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u8 = 3;

/// Performs one request/response cycle over a stream, resending on checksum
/// failure up to a bounded number of attempts.
#[derive(Debug, Clone)]
pub struct MessageExchanger {
    max_retries: u8,
    crc_check: bool,
}

impl MessageExchanger {
    /// Create an exchanger with the default retry bound and checksum
    /// verification enabled.
    pub fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            crc_check: true,
        }
    }

    /// Maximum number of resends after the initial attempt.
    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }

    pub fn set_max_retries(&mut self, max_retries: u8) {
        self.max_retries = max_retries;
    }

    /// Whether response checksums are verified.
    pub fn crc_check(&self) -> bool {
        self.crc_check
    }

    pub fn set_crc_check(&mut self, enabled: bool) {
        self.crc_check = enabled;
    }

    /// Exchange an already-serialized wire message for a validated raw
    /// response.
    ///
    /// The message is serialized once by the caller; every resend writes
    /// the same bytes. At most `max_retries + 1` attempts are made, one
    /// write each.
    pub fn exchange<S: StreamAccessor>(&self, stream: &mut S, wire: &str) -> Sip2Result<String> {
        let mut attempt: u8 = 0;
        loop {
            log::debug!("sending: {}", wire.trim_end());
            stream.write_all(wire.as_bytes())?;
            stream.flush()?;

            let raw = Self::read_response(stream)?;
            log::debug!("received: {}", raw);

            if !self.crc_check || checksum::verify(&raw) {
                if self.crc_check {
                    log::debug!("checksum ok");
                }
                return Ok(raw);
            }

            if attempt >= self.max_retries {
                log::error!(
                    "checksum still invalid after {} retries, giving up",
                    self.max_retries
                );
                return Err(Sip2Error::ChecksumExhausted {
                    retries: self.max_retries,
                });
            }
            attempt += 1;
            log::warn!("checksum mismatch, resending ({}/{})", attempt, self.max_retries);
        }
    }

    /// Accumulate bytes up to and including the terminator, then trim the
    /// surrounding whitespace (which absorbs a stray line feed left over
    /// from a CRLF-terminating peer).
    ///
    /// A clean EOF ends accumulation early and the partial buffer goes
    /// through the same checksum gate as a complete message; a read error
    /// propagates.
    fn read_response<S: StreamAccessor>(stream: &mut S) -> Sip2Result<String> {
        let mut buf = BytesMut::with_capacity(128);
        while let Some(byte) = stream.read_byte()? {
            buf.put_u8(byte);
            if byte == TERMINATOR {
                break;
            }
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }
}

impl Default for MessageExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Stream double fed from a canned byte queue, recording every write.
    struct ScriptedStream {
        incoming: VecDeque<u8>,
        writes: Vec<Vec<u8>>,
        closed: bool,
    }

    impl ScriptedStream {
        fn new(responses: &[&str]) -> Self {
            Self {
                incoming: responses.concat().bytes().collect(),
                writes: Vec::new(),
                closed: false,
            }
        }
    }

    impl StreamAccessor for ScriptedStream {
        fn set_read_timeout(&mut self, _timeout: Option<Duration>) -> Sip2Result<()> {
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> Sip2Result<usize> {
            let mut n = 0;
            while n < buf.len() {
                match self.incoming.pop_front() {
                    Some(byte) => {
                        buf[n] = byte;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }

        fn write(&mut self, buf: &[u8]) -> Sip2Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> Sip2Result<()> {
            Ok(())
        }

        fn is_closed(&self) -> bool {
            self.closed
        }

        fn close(&mut self) -> Sip2Result<()> {
            self.closed = true;
            Ok(())
        }
    }

    /// Stream double whose reads always fail.
    struct BrokenStream {
        writes: usize,
    }

    impl StreamAccessor for BrokenStream {
        fn set_read_timeout(&mut self, _timeout: Option<Duration>) -> Sip2Result<()> {
            Ok(())
        }

        fn read(&mut self, _buf: &mut [u8]) -> Sip2Result<usize> {
            Err(Sip2Error::Connection(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset by peer",
            )))
        }

        fn write(&mut self, buf: &[u8]) -> Sip2Result<usize> {
            self.writes += 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> Sip2Result<()> {
            Ok(())
        }

        fn is_closed(&self) -> bool {
            false
        }

        fn close(&mut self) -> Sip2Result<()> {
            Ok(())
        }
    }

    fn valid_line(head: &str) -> String {
        format!("{}{}\r", head, checksum::compute(head))
    }

    #[test]
    fn test_valid_first_response_is_one_cycle() {
        let line = valid_line("941AZ");
        let mut stream = ScriptedStream::new(&[&line]);
        let raw = MessageExchanger::new().exchange(&mut stream, "9900402.00\r").unwrap();
        assert_eq!(raw, line.trim_end());
        assert_eq!(stream.writes.len(), 1);
    }

    #[test]
    fn test_disabled_crc_accepts_anything() {
        let mut stream = ScriptedStream::new(&["940AZ0000\r"]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_crc_check(false);
        let raw = exchanger.exchange(&mut stream, "93\r").unwrap();
        assert_eq!(raw, "940AZ0000");
        assert_eq!(stream.writes.len(), 1);
    }

    #[test]
    fn test_exhausted_retries_fail_after_bound() {
        let bad = "941AZ0000\r";
        let mut stream = ScriptedStream::new(&[bad, bad, bad]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_max_retries(2);
        let err = exchanger.exchange(&mut stream, "93\r").unwrap_err();
        assert!(matches!(err, Sip2Error::ChecksumExhausted { retries: 2 }));
        assert_eq!(stream.writes.len(), 3);
    }

    #[test]
    fn test_recovers_on_third_attempt() {
        let line = valid_line("941AZ");
        let mut stream = ScriptedStream::new(&["941AZ0000\r", "941AZ1111\r", &line]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_max_retries(2);
        let raw = exchanger.exchange(&mut stream, "93\r").unwrap();
        assert_eq!(raw, line.trim_end());
        assert_eq!(stream.writes.len(), 3);
    }

    #[test]
    fn test_resends_identical_bytes() {
        let line = valid_line("941AZ");
        let mut stream = ScriptedStream::new(&["941AZ0000\r", &line]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_max_retries(1);
        exchanger.exchange(&mut stream, "93CNuser|\r").unwrap();
        assert_eq!(stream.writes.len(), 2);
        assert_eq!(stream.writes[0], stream.writes[1]);
    }

    #[test]
    fn test_crlf_terminator_is_fully_stripped() {
        let mut stream = ScriptedStream::new(&["63000AOIN|AY1AZEEF2\r\n"]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_crc_check(false);
        let raw = exchanger.exchange(&mut stream, "63\r").unwrap();
        assert_eq!(raw, "63000AOIN|AY1AZEEF2");
        // the line feed stays behind and is trimmed off the next read
        assert_eq!(stream.incoming, [b'\n']);
    }

    #[test]
    fn test_eof_counts_as_checksum_failure() {
        let mut stream = ScriptedStream::new(&["941AZ"]);
        let mut exchanger = MessageExchanger::new();
        exchanger.set_max_retries(0);
        let err = exchanger.exchange(&mut stream, "93\r").unwrap_err();
        assert!(matches!(err, Sip2Error::ChecksumExhausted { retries: 0 }));
        assert_eq!(stream.writes.len(), 1);
    }

    #[test]
    fn test_read_error_is_fatal_not_retried() {
        let mut stream = BrokenStream { writes: 0 };
        let err = MessageExchanger::new().exchange(&mut stream, "93\r").unwrap_err();
        assert!(matches!(err, Sip2Error::Connection(_)));
        assert_eq!(stream.writes, 1);
    }
}
