//! Client builder
//!
//! Fluent configuration for a TCP-backed client; all parameters carry the
//! defaults the protocol recommends, so the common case is
//! `ClientBuilder::new().tcp(address).build()`.

use std::net::SocketAddr;
use std::time::Duration;

use sip2_core::{Sip2Error, Sip2Result};
use sip2_transport::{TcpSettings, TcpTransport, DEFAULT_CONNECT_TIMEOUT};

use crate::client::Sip2Client;
use crate::exchange::DEFAULT_MAX_RETRIES;

/// Builder for a TCP-backed [`Sip2Client`]
///
/// # Usage Example
///
/// ```rust,no_run
/// use sip2_client::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new()
///     .tcp("acs.example.org:6001")
///     .connect_timeout(Duration::from_secs(5))
///     .read_timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    address: Option<String>,
    bind: Option<SocketAddr>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_retries: u8,
    crc_check: bool,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            address: None,
            bind: None,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: None,
            max_retries: DEFAULT_MAX_RETRIES,
            crc_check: true,
        }
    }

    /// Configure the remote ACS address ("host:port").
    pub fn tcp(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Bind the local end of the socket, for outbound interface selection
    /// on multi-homed hosts.
    pub fn bind(mut self, bind: SocketAddr) -> Self {
        self.bind = Some(bind);
        self
    }

    /// Bound the connection attempt. Default 15 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Let the connection attempt block indefinitely.
    pub fn no_connect_timeout(mut self) -> Self {
        self.connect_timeout = None;
        self
    }

    /// Bound each read on the established stream. Without this, a peer
    /// that stalls mid-response hangs the caller.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Maximum resends after the initial attempt. Default 3.
    pub fn max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enable or disable response checksum verification. Default enabled.
    pub fn crc_check(mut self, enabled: bool) -> Self {
        self.crc_check = enabled;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns an error when no ACS address was configured.
    pub fn build(self) -> Sip2Result<Sip2Client<TcpTransport>> {
        let Some(address) = self.address else {
            return Err(Sip2Error::InvalidData(
                "ACS address must be configured".to_string(),
            ));
        };
        let settings = TcpSettings {
            address,
            bind: self.bind,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        };
        let mut client = Sip2Client::new(TcpTransport::new(settings));
        client.set_max_retries(self.max_retries);
        client.set_crc_check(self.crc_check);
        Ok(client)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_address() {
        assert!(matches!(
            ClientBuilder::new().build(),
            Err(Sip2Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_build_applies_configuration() {
        let client = ClientBuilder::new()
            .tcp("127.0.0.1:6001")
            .bind("127.0.0.1:0".parse().unwrap())
            .no_connect_timeout()
            .read_timeout(Duration::from_secs(30))
            .max_retries(5)
            .crc_check(false)
            .build()
            .unwrap();

        let settings = client.transport().settings();
        assert_eq!(settings.address, "127.0.0.1:6001");
        assert!(settings.bind.is_some());
        assert!(settings.connect_timeout.is_none());
        assert_eq!(settings.read_timeout, Some(Duration::from_secs(30)));
        assert_eq!(client.max_retries(), 5);
        assert!(!client.crc_check());
    }
}
