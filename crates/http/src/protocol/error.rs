use http::Version;
use thiserror::Error;

/// Hard failures of message generation.
///
/// Every variant is fatal for the message in flight: the generator does not try to
/// recover and the caller is expected to abandon the message. Running out of buffer
/// space is never reported here, see [`Outcome`](crate::codec::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("protocol misuse: {reason}")]
    ProtocolMisuse { reason: String },

    #[error("content length mismatch, declared: {declared}, prepared: {prepared}")]
    ContentLengthMismatch { declared: u64, prepared: u64 },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("unsupported http version: {0:?}")]
    UnsupportedVersion(Version),

    #[error("chunked transfer-encoding is not available for {0:?}")]
    ChunkedUnavailable(Version),
}

impl GenerateError {
    pub fn protocol_misuse<S: ToString>(str: S) -> Self {
        Self::ProtocolMisuse { reason: str.to_string() }
    }

    pub fn content_length_mismatch(declared: u64, prepared: u64) -> Self {
        Self::ContentLengthMismatch { declared, prepared }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    /// Returns true for errors caused by calling the generator out of order.
    pub fn is_protocol_misuse(&self) -> bool {
        matches!(self, Self::ProtocolMisuse { .. })
    }

    /// Returns true when the body did not match the declared content length.
    pub fn is_content_length_mismatch(&self) -> bool {
        matches!(self, Self::ContentLengthMismatch { .. })
    }
}
