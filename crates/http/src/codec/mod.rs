//! HTTP codec module for generating HTTP/1.1 messages
//!
//! This module turns message metadata and body slices into wire bytes. It performs no
//! I/O: the caller hands in buffers, the codec fills them and reports what it needs
//! next, so a message can be produced across any number of calls.
//!
//! # Architecture
//!
//! The codec module is organized into several components:
//!
//! - [`Generator`]: the resumable state machine driving one message at a time
//! - Header encoding via the `header` module
//!   - start line and fields in caller order
//!   - framing field chosen at commit time
//! - Payload framing via the `body` module
//!   - `Content-Length` accounting
//!   - chunk envelopes and the terminal chunk
//!
//! # Features
//!
//! - Body bytes are never copied, only framed
//! - Caller owned, bounded buffers
//! - Chunked transfer encoding
//! - Content-Length based payload handling
//! - State machine based processing

mod body;
mod generator;
mod header;

pub use body::TransferMode;
pub use generator::{CHUNK_SIZE, Generator, Outcome, Phase};
