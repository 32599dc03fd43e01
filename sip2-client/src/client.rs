//! SIP2 session facade
//!
//! Composes the transport, the default field set and the exchanger into the
//! client API: connect, disconnect, set_default and send_request.

use sip2_core::{Request, Response, Sip2Error, Sip2Result};
use sip2_transport::{TcpTransport, TransportLayer};

use crate::defaults::DefaultFieldSet;
use crate::exchange::MessageExchanger;

/// Client connection state
///
/// `send_request` is only meaningful in `Connected`; the facade checks this
/// explicitly instead of letting I/O fail on an absent stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// No session is held (initial state)
    Disconnected,
    /// A transport session is established
    Connected,
}

/// SC-side SIP2 client
///
/// Owns at most one transport session, the default field set and the
/// exchange policy. The retry bound and checksum toggle are instance state,
/// so clients with different policies coexist in one process. Generic over
/// the transport so the facade can be driven against a simulated peer.
pub struct Sip2Client<T: TransportLayer = TcpTransport> {
    transport: T,
    state: ClientState,
    defaults: DefaultFieldSet,
    exchanger: MessageExchanger,
}

impl<T: TransportLayer> Sip2Client<T> {
    /// Create a client over an unopened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ClientState::Disconnected,
            defaults: DefaultFieldSet::new(),
            exchanger: MessageExchanger::new(),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ClientState::Connected
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Open the transport session.
    ///
    /// A failed attempt leaves the client `Disconnected`; no half-open
    /// session is ever held. Connecting while connected is an error.
    pub fn connect(&mut self) -> Sip2Result<()> {
        self.transport.open()?;
        self.state = ClientState::Connected;
        Ok(())
    }

    /// Close the transport session. A no-op when already disconnected.
    pub fn disconnect(&mut self) -> Sip2Result<()> {
        if self.state == ClientState::Disconnected {
            return Ok(());
        }
        self.transport.close()?;
        self.state = ClientState::Disconnected;
        Ok(())
    }

    /// Set or overwrite a default field merged into every request.
    pub fn set_default(&mut self, code: &str, value: &str) {
        self.defaults.set(code, value);
    }

    /// Maximum number of resends after the initial attempt.
    pub fn max_retries(&self) -> u8 {
        self.exchanger.max_retries()
    }

    pub fn set_max_retries(&mut self, max_retries: u8) {
        self.exchanger.set_max_retries(max_retries);
    }

    /// Whether response checksums are verified.
    pub fn crc_check(&self) -> bool {
        self.exchanger.crc_check()
    }

    pub fn set_crc_check(&mut self, enabled: bool) {
        self.exchanger.set_crc_check(enabled);
    }

    /// Send one request and parse the validated response.
    ///
    /// Defaults are merged into the request first; the wire string is then
    /// serialized exactly once for the whole call, resends included, so
    /// mutating the request mid-call has no effect. Exchange and parse
    /// failures propagate unchanged.
    pub fn send_request<R: Request, P: Response>(&mut self, request: &mut R) -> Sip2Result<P> {
        if self.state != ClientState::Connected {
            return Err(Sip2Error::NotConnected);
        }
        self.defaults.apply(request);
        let wire = request.encode()?;
        let raw = self.exchanger.exchange(&mut self.transport, &wire)?;
        P::parse(&raw)
    }
}

impl Sip2Client<TcpTransport> {
    /// Create a TCP client for a "host:port" address with default settings.
    pub fn tcp(address: &str) -> Self {
        Self::new(TcpTransport::from_address(address))
    }
}
