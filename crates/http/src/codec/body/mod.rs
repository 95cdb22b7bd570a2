//! Body framing for generated messages.
//!
//! The generator never copies body bytes. Each encoder here only keeps the accounting
//! for its framing and writes the bytes that surround the payload.
//!
//! # Components
//!
//! - `ChunkedEncoder`: chunk envelopes and the terminal chunk
//! - `LengthEncoder`: `Content-Length` accounting
//! - [`PayloadEncoder`]: closed set of framings the generator picks from at commit time

mod chunked_encoder;
mod length_encoder;
mod payload_encoder;

pub use payload_encoder::EncodeStatus;
pub use payload_encoder::PayloadEncoder;
pub use payload_encoder::TransferMode;
