//! SIP2 client implementation
//!
//! This crate provides the SC-side session facade: connection lifecycle,
//! default field injection and the checksum-gated request/response
//! exchange.

pub mod builder;
pub mod client;
pub mod defaults;
pub mod exchange;

pub use builder::ClientBuilder;
pub use client::{ClientState, Sip2Client};
pub use defaults::DefaultFieldSet;
pub use exchange::{MessageExchanger, DEFAULT_MAX_RETRIES};
