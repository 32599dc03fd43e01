//! Stream accessor trait for the transport layer

use sip2_core::{Sip2Error, Sip2Result};
use std::time::Duration;

/// Stream accessor interface to access a byte stream to a remote ACS
///
/// All operations block the calling thread; SIP2 sessions carry one
/// request at a time, so a stream is never accessed concurrently.
pub trait StreamAccessor: Send {
    /// Set the read timeout
    ///
    /// # Arguments
    ///
    /// * `timeout` - The timeout duration. None means block indefinitely.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Sip2Result<()>;

    /// Read data from the stream
    ///
    /// # Returns
    ///
    /// Number of bytes read, or 0 if EOF
    fn read(&mut self, buf: &mut [u8]) -> Sip2Result<usize>;

    /// Read a single byte from the stream
    ///
    /// # Returns
    ///
    /// The byte, or None if the peer closed the stream
    fn read_byte(&mut self) -> Sip2Result<Option<u8>> {
        let mut buf = [0u8; 1];
        if self.read(&mut buf)? == 0 {
            Ok(None)
        } else {
            Ok(Some(buf[0]))
        }
    }

    /// Write data to the stream
    ///
    /// # Returns
    ///
    /// Number of bytes written
    fn write(&mut self, buf: &[u8]) -> Sip2Result<usize>;

    /// Write all data to the stream
    fn write_all(&mut self, buf: &[u8]) -> Sip2Result<()> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..])?;
            if n == 0 {
                return Err(Sip2Error::Connection(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "Failed to write all data",
                )));
            }
            written += n;
        }
        Ok(())
    }

    /// Flush any buffered data
    fn flush(&mut self) -> Sip2Result<()>;

    /// Check if the stream is closed
    fn is_closed(&self) -> bool;

    /// Close the stream
    fn close(&mut self) -> Sip2Result<()>;
}

/// Transport layer trait that extends StreamAccessor
pub trait TransportLayer: StreamAccessor {
    /// Open the physical connection
    fn open(&mut self) -> Sip2Result<()>;
}
