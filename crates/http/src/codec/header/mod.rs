//! HTTP header encoding for generated messages
//!
//! This module renders the head of a request or response: start line, header fields,
//! the framing field chosen by the generator and the blank line ending the head.
//!
//! # Components
//!
//! - [`HeaderEncoder`]: Encodes message heads to bytes
//!   - Implements standard HTTP/1.1 header formatting
//!   - Preserves field order and name case
//!   - Manages content-length and transfer-encoding fields
//!   - Enforces the configured header size limit

mod header_encoder;

pub use header_encoder::HeaderEncoder;
pub(crate) use header_encoder::INIT_HEADER_SIZE;
