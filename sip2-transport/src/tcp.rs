//! Blocking TCP transport implementation

use crate::stream::{StreamAccessor, TransportLayer};
use sip2_core::{Sip2Error, Sip2Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// TCP transport settings
#[derive(Debug, Clone)]
pub struct TcpSettings {
    /// Remote ACS address as "host:port", resolved when the transport opens.
    pub address: String,
    /// Optional local bind address, for outbound interface selection on
    /// multi-homed hosts.
    pub bind: Option<SocketAddr>,
    /// Connect timeout. None blocks indefinitely.
    pub connect_timeout: Option<Duration>,
    /// Read timeout applied to the established stream. None blocks
    /// indefinitely, so a peer that stalls mid-response hangs the caller.
    pub read_timeout: Option<Duration>,
}

impl TcpSettings {
    /// Create new TCP settings with the default connect timeout
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            bind: None,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: None,
        }
    }
}

/// Blocking TCP transport
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<TcpStream>,
    settings: TcpSettings,
    closed: bool,
}

impl TcpTransport {
    /// Create a new TCP transport
    pub fn new(settings: TcpSettings) -> Self {
        Self {
            stream: None,
            settings,
            closed: true,
        }
    }

    /// Create a TCP transport from an address string
    pub fn from_address(address: &str) -> Self {
        Self::new(TcpSettings::new(address))
    }

    /// Current transport settings
    pub fn settings(&self) -> &TcpSettings {
        &self.settings
    }

    fn resolve(&self) -> Sip2Result<SocketAddr> {
        let mut addrs = self.settings.address.to_socket_addrs().map_err(|e| {
            Sip2Error::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid ACS address {:?}: {}", self.settings.address, e),
            ))
        })?;
        addrs.next().ok_or_else(|| {
            Sip2Error::Connection(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("Address {:?} resolved to nothing", self.settings.address),
            ))
        })
    }

    fn stream_mut(&mut self) -> Sip2Result<&mut TcpStream> {
        self.stream.as_mut().ok_or_else(|| {
            Sip2Error::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "TCP stream not connected",
            ))
        })
    }
}

impl TransportLayer for TcpTransport {
    fn open(&mut self) -> Sip2Result<()> {
        if !self.closed {
            return Err(Sip2Error::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }

        log::debug!("connecting to {}", self.settings.address);
        let addr = self.resolve()?;

        // Dropping `socket` on any early return below closes the
        // half-constructed descriptor; no connection is retained on failure.
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(Sip2Error::Connection)?;

        if let Some(bind) = self.settings.bind {
            socket.bind(&bind.into()).map_err(|e| {
                log::error!("failed to bind local address {}: {}", bind, e);
                Sip2Error::Connection(e)
            })?;
        }

        let connected = match self.settings.connect_timeout {
            Some(timeout) => socket.connect_timeout(&addr.into(), timeout),
            None => socket.connect(&addr.into()),
        };
        connected.map_err(|e| {
            log::error!("failed to connect to {}: {}", addr, e);
            match e.kind() {
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Sip2Error::Timeout,
                _ => Sip2Error::Connection(e),
            }
        })?;

        // connect_timeout can leave the socket non-blocking; all I/O after
        // the connect is blocking.
        socket.set_nonblocking(false).map_err(Sip2Error::Connection)?;

        let stream: TcpStream = socket.into();
        stream
            .set_read_timeout(self.settings.read_timeout)
            .map_err(Sip2Error::Connection)?;

        log::debug!("connected to {}", addr);
        self.stream = Some(stream);
        self.closed = false;
        Ok(())
    }
}

impl StreamAccessor for TcpTransport {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Sip2Result<()> {
        self.settings.read_timeout = timeout;
        if let Some(stream) = self.stream.as_ref() {
            stream.set_read_timeout(timeout).map_err(Sip2Error::Connection)?;
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Sip2Result<usize> {
        let stream = self.stream_mut()?;
        match stream.read(buf) {
            Ok(0) => {
                self.closed = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Err(Sip2Error::Timeout)
            }
            Err(e) => {
                self.closed = true;
                Err(Sip2Error::Connection(e))
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> Sip2Result<usize> {
        let stream = self.stream_mut()?;
        stream.write(buf).map_err(Sip2Error::Connection)
    }

    fn flush(&mut self) -> Sip2Result<()> {
        let stream = self.stream_mut()?;
        stream.flush().map_err(Sip2Error::Connection)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Sip2Result<()> {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
        self.closed = true;
        Ok(())
    }
}
