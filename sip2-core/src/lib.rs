//! Core types and utilities for the SIP2 protocol
//!
//! This crate provides fundamental types, error handling, checksum support
//! and the message model used throughout the SIP2 implementation.

pub mod checksum;
pub mod error;
pub mod field;
pub mod message;
pub mod requests;
pub mod response;

pub use error::{Sip2Error, Sip2Result};
pub use message::{Message, Request, TERMINATOR};
pub use response::{Response, ResponseMessage};
