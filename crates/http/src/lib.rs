//! An incremental, resumable HTTP/1.1 message generator
//!
//! This crate produces the wire bytes of HTTP/1.1 requests and responses without doing
//! any I/O itself. Callers drive a [`codec::Generator`] with message metadata, buffers
//! and body slices; every call either fills the buffers and asks the caller to flush
//! them, or reports exactly which input is missing. That makes it easy to plug the
//! generator into blocking, async or event driven transports alike.
//!
//! # Features
//!
//! - HTTP/1.0 and HTTP/1.1 request and status lines
//! - Automatic choice between no body, `Content-Length` and chunked framing
//! - Body bytes are never copied into internal buffers
//! - Bounded, caller owned buffers with explicit backpressure signals
//! - Clean error handling
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use http::StatusCode;
//! use micro_http_generator::codec::{Generator, Outcome};
//! use micro_http_generator::protocol::ResponseInfo;
//!
//! let mut info = ResponseInfo::new(StatusCode::OK);
//! info.fields_mut().add("Content-Type", "text/plain");
//!
//! let body = b"Hello World!\r\n";
//! let mut generator = Generator::new();
//! let mut header = BytesMut::with_capacity(256);
//!
//! let outcome = generator.generate_response(Some(&info), Some(&mut header), None, Some(&body[..]), true).unwrap();
//! assert_eq!(outcome, Outcome::Flush);
//! assert_eq!(&header[..], b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 14\r\n\r\n");
//!
//! // write header then body to the transport, then confirm completion
//! assert_eq!(generator.generate_response(None, None, None, None, true).unwrap(), Outcome::Done);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`codec`]: The generator state machine and the header and body encoders it drives
//! - [`protocol`]: Message metadata, header fields and the error type
//! - [`config`]: Limits and defaults applied while generating
//!
//! ## Error Handling
//!
//! Every failure is reported as a [`protocol::GenerateError`]. Errors are final for the
//! message being generated: call [`codec::Generator::reset`] before starting another.
//!
//! # Limitations
//!
//! - HTTP/1.x only (HTTP/2 or HTTP/3 is not supported)
//! - No trailers after the terminal chunk
//! - Maximum header size: 8KB by default

pub mod codec;
pub mod config;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
