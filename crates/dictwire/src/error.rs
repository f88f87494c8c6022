//! Error types for DICT operations.

use std::io;
use std::time::Duration;

/// Result type alias for DICT operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DICT error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reported by the transport.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The peer closed the stream in the middle of a line.
    #[error("Connection closed before receiving complete line")]
    ConnectionClosed,

    /// A line exceeded the reader's size limit.
    #[error("Line too long: more than {0} bytes without CRLF")]
    LineTooLong(usize),

    /// An operation was attempted without an established connection.
    #[error("Connection not established")]
    NotConnected,

    /// An operation was attempted after the connection recorded a failure.
    #[error("Connection error occurred: {0}")]
    ConnectionError(String),

    /// The server banner did not look like a status line.
    #[error("Invalid DICT greeting format: {0}")]
    InvalidGreeting(String),

    /// The server banner carried a non-220 status.
    #[error("Connection failed: {line}")]
    ConnectionFailed {
        /// Raw banner line.
        line: String,
    },

    /// A single-line reply did not match `<code> <text>`.
    #[error("Invalid DICT {command} response format: {line}")]
    InvalidStatus {
        /// Command that was answered.
        command: &'static str,
        /// Raw reply line.
        line: String,
    },

    /// A `151` definition header was malformed.
    #[error("Invalid definition header: {0}")]
    InvalidDefinitionHeader(String),

    /// A command that has no soft-failure path got a non-success status.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The endpoint string could not be turned into host and port.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The endpoint URL used a scheme other than `dict:`.
    #[error("Unsupported URL scheme: {0} (expected dict:)")]
    UnsupportedScheme(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// TCP connect did not finish in time.
    #[error("Connect timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Returns true if the error came from the transport rather than the protocol.
    ///
    /// Transport errors tear the connection down.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::ConnectionClosed | Self::LineTooLong(_) | Self::Timeout(_)
        )
    }
}
