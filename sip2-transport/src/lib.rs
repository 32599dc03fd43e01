//! Transport layer module for the SIP2 protocol
//!
//! This crate provides the blocking stream abstraction and the TCP
//! transport used by the SIP2 client.

pub mod stream;
pub mod tcp;

pub use stream::{StreamAccessor, TransportLayer};
pub use tcp::{TcpSettings, TcpTransport, DEFAULT_CONNECT_TIMEOUT};
