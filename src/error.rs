//! Error types for hufvault.
//!
//! Every failure is returned to the caller as an [`Error`]. Nothing is retried and nothing is
//! partially recovered: a corrupt container aborts the whole call.

use thiserror::Error;

/// Top-level error type for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed us arguments we cannot work with.
    #[error("invalid input: {0}")]
    Input(String),

    /// The container is password protected and the attempt was missing or wrong.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The container is damaged or was not produced by this codec.
    #[error("corrupt container: {0}")]
    Corrupt(#[from] CorruptError),

    /// File I/O from the command line front end
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when a retry with a different password might succeed.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::Corrupt(_))
    }
}

/// Password gate failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("a password is required to open this file")]
    PasswordRequired,

    #[error("the password does not match")]
    WrongPassword,
}

/// Structural problems found while parsing a container. Each variant names the stage that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorruptError {
    /// Fewer bytes than the fixed header needs
    #[error("header truncated: need at least {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    #[error("header: invalid password flag {0:#04x}")]
    InvalidFlag(u8),

    /// The frequency table length field points past the end of the container
    #[error("header: frequency table length {declared} exceeds the {available} bytes remaining")]
    TableOverrun { declared: usize, available: usize },

    #[error("frequency table: {0}")]
    BadTable(String),

    #[error("padding: count {0} is not in 0..=7")]
    InvalidPadding(u8),

    /// More padding declared than there are payload bits
    #[error("padding: {padding} padding bits declared but only {available} payload bits present")]
    PaddingOverrun { padding: u8, available: usize },

    /// Bits that match no code in the table
    #[error("bitstream: no code matches the bits at position {position}")]
    UnknownCode { position: usize },

    /// The stream ended in the middle of a code
    #[error("bitstream: stream ends with {bits} bits of an incomplete code")]
    IncompleteCode { bits: usize },

    #[error("bitstream: decoded {actual} symbols but the frequency table counts {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
