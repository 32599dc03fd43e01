//! SIP2 self-check client
//!
//! Rust implementation of the SC (self-check) side of SIP2, the Standard
//! Interchange Protocol used between library self-service terminals and an
//! Automated Circulation System (ACS).
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `sip2-core`: Core types, error handling, checksum and message model
//! - `sip2-transport`: Blocking transport layer (TCP)
//! - `sip2-client`: Session facade, default fields, checksum-gated exchange
//!
//! # Usage
//!
//! ```no_run
//! use sip2::{requests, ClientBuilder, ResponseMessage};
//!
//! let mut client = ClientBuilder::new()
//!     .tcp("acs.example.org:6001")
//!     .build()
//!     .unwrap();
//! client.connect().unwrap();
//! client.set_default("AO", "MAIN");
//!
//! let mut request = requests::sc_status(0, 40, "2.00");
//! let status: ResponseMessage = client.send_request(&mut request).unwrap();
//! println!("ACS online: {}", status.command() == "98");
//!
//! client.disconnect().unwrap();
//! ```

// Re-export core types
pub use sip2_core::{checksum, field, requests};
pub use sip2_core::{Message, Request, Response, ResponseMessage, Sip2Error, Sip2Result};

// Re-export client API
pub use sip2_client::{ClientBuilder, ClientState, DefaultFieldSet, MessageExchanger, Sip2Client};

// Re-export transport layer
pub mod transport {
    pub use sip2_transport::*;
}
