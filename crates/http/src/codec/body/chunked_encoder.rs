//! Encoder for HTTP chunked transfer encoding envelopes.
//!
//! The payload itself never passes through this encoder: it only writes the bytes that
//! surround each payload slice. The CRLF closing a payload is owed until the next
//! envelope, so every envelope after the first starts with it:
//!
//! ```text
//! D\r\n            <- first envelope
//! Hello World.     <- payload, sent by the caller
//! \r\n2D\r\n       <- closes the first payload, opens the second
//! ...
//! \r\n0\r\n\r\n    <- closes the last payload, terminal chunk
//! ```

use crate::utils::spare_capacity;
use bytes::BytesMut;
use std::io::Write;
use tracing::trace;

const CRLF: &[u8] = b"\r\n";
const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedEncoder {
    need_crlf: bool,
    eof: bool,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self { need_crlf: false, eof: false }
    }

    /// Exact number of bytes the envelope of a `size` bytes payload takes.
    pub fn envelope_len(&self, size: usize) -> usize {
        self.crlf_len() + hex_len(size) + CRLF.len()
    }

    /// Exact number of bytes the terminal chunk takes.
    pub fn eof_len(&self) -> usize {
        self.crlf_len() + LAST_CHUNK.len()
    }

    /// Writes the envelope that precedes `size` payload bytes.
    ///
    /// Returns false, writing nothing, when `dst` lacks the room for it.
    pub fn encode_chunk(&mut self, size: usize, dst: &mut BytesMut) -> bool {
        debug_assert!(size > 0, "an empty payload would terminate the body");
        if self.eof || spare_capacity(dst) < self.envelope_len(size) {
            return false;
        }

        if self.need_crlf {
            dst.extend_from_slice(CRLF);
        }
        // formatting into a BytesMut can not fail
        let _ = write!(helper::Writer(dst), "{size:X}\r\n");
        self.need_crlf = true;
        trace!(size, "encoded chunk envelope");
        true
    }

    /// Writes the terminal chunk.
    ///
    /// Returns false, writing nothing, when `dst` lacks the room for it.
    pub fn encode_eof(&mut self, dst: &mut BytesMut) -> bool {
        if self.eof {
            return true;
        }
        if spare_capacity(dst) < self.eof_len() {
            return false;
        }

        if self.need_crlf {
            dst.extend_from_slice(CRLF);
        }
        dst.extend_from_slice(LAST_CHUNK);
        self.need_crlf = false;
        self.eof = true;
        trace!("encoded last chunk");
        true
    }

    pub fn is_finish(&self) -> bool {
        self.eof
    }

    fn crlf_len(&self) -> usize {
        if self.need_crlf { CRLF.len() } else { 0 }
    }
}

/// Number of upper case hex digits needed to print `size`.
fn hex_len(size: usize) -> usize {
    if size == 0 { 1 } else { (usize::BITS - size.leading_zeros()).div_ceil(4) as usize }
}

mod helper {
    use bytes::{BufMut, BytesMut};
    use std::io;

    pub struct Writer<'a>(pub &'a mut BytesMut);

    impl io::Write for Writer<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.put_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
