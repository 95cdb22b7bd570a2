//! HTTP header encoder implementation for serializing message heads
//!
//! This module renders the start line and header fields of a request or response into
//! raw bytes. Framing fields are owned by the encoder: whatever `Content-Length` or
//! `Transfer-Encoding` the caller supplied, the one written matches the framing the
//! generator committed to.
//!
//! # Features
//!
//! - Request line and status line serialization
//! - Header fields written in insertion order with their original case
//! - Automatic `Content-Length` / `Transfer-Encoding` fields
//! - Optional `Server` field for responses

use crate::codec::body::{PayloadEncoder, TransferMode};
use crate::config::GeneratorConfig;
use crate::protocol::{GenerateError, MessageHead};

use bytes::{BufMut, BytesMut};

use http::Version;
use http::header::{CONTENT_LENGTH, SERVER, TRANSFER_ENCODING};
use std::io;
use std::io::Write;
use tracing::{error, trace};

/// Initial buffer size allocated for header serialization
pub(crate) const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for message heads.
///
/// The encoder renders a [`MessageHead`] followed by the framing field matching the
/// selected [`PayloadEncoder`].
#[derive(Debug, Clone, Default)]
pub struct HeaderEncoder {
    config: GeneratorConfig,
}

impl HeaderEncoder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Encodes the message head into the provided bytes buffer.
    ///
    /// # Arguments
    ///
    /// * `head` - Request or response metadata
    /// * `payload` - The framing selected for the body
    /// * `dst` - Mutable reference to the destination buffer
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - HTTP version is not supported (only HTTP/1.0 and HTTP/1.1 supported)
    /// - The rendered head is larger than the configured limit
    pub(crate) fn encode(&self, head: MessageHead<'_>, payload: &PayloadEncoder, dst: &mut BytesMut) -> Result<(), GenerateError> {
        let start = dst.len();
        dst.reserve(INIT_HEADER_SIZE);

        let version = version_str(head.version())?;
        match head {
            MessageHead::Request(request) => {
                write!(FastWrite(dst), "{} {} {}\r\n", request.method(), request.uri(), version).map_err(write_error)?;
            }
            MessageHead::Response(response) => {
                write!(FastWrite(dst), "{} {} {}\r\n", version, response.status().as_str(), response.reason())
                    .map_err(write_error)?;
            }
        }

        // Write all caller fields, framing fields excluded
        let fields = head.fields();
        for field in fields {
            if field.is(CONTENT_LENGTH.as_str()) || field.is(TRANSFER_ENCODING.as_str()) {
                trace!(name = field.name(), "skip caller supplied framing field");
                continue;
            }
            put_field(dst, field.name().as_bytes(), field.value());
        }

        if let (MessageHead::Response(_), Some(server)) = (head, self.config.server()) {
            if !fields.contains(SERVER.as_str()) {
                put_field(dst, b"Server", server);
            }
        }

        // Set appropriate content length or transfer encoding field
        match payload.transfer_mode() {
            TransferMode::Length => {
                let length = payload.fix_length_size().unwrap_or_default();
                write!(FastWrite(dst), "Content-Length: {length}\r\n").map_err(write_error)?;
            }
            TransferMode::Chunked => put_field(dst, b"Transfer-Encoding", b"chunked"),
            TransferMode::None => {}
        }
        dst.put_slice(b"\r\n");

        let current_size = dst.len() - start;
        let max_size = self.config.max_header_size();
        if current_size > max_size {
            error!(current_size, max_size, "rendered header exceeds the limit");
            dst.truncate(start);
            return Err(GenerateError::too_large_header(current_size, max_size));
        }
        Ok(())
    }
}

fn version_str(version: Version) -> Result<&'static str, GenerateError> {
    match version {
        Version::HTTP_11 => Ok("HTTP/1.1"),
        Version::HTTP_10 => Ok("HTTP/1.0"),
        v => {
            error!(http_version = ?v, "unsupported http version");
            Err(GenerateError::UnsupportedVersion(v))
        }
    }
}

#[inline]
fn put_field(dst: &mut BytesMut, name: &[u8], value: &[u8]) {
    dst.put_slice(name);
    dst.put_slice(b": ");
    dst.put_slice(value);
    dst.put_slice(b"\r\n");
}

fn write_error(e: io::Error) -> GenerateError {
    GenerateError::protocol_misuse(format!("failed to render header: {e}"))
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
