use thiserror::Error;

/// Main error type for SIP2 operations
#[derive(Error, Debug)]
pub enum Sip2Error {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Not connected")]
    NotConnected,

    #[error("Checksum still invalid after {retries} retries")]
    ChecksumExhausted { retries: u8 },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for SIP2 operations
pub type Sip2Result<T> = Result<T, Sip2Error>;
