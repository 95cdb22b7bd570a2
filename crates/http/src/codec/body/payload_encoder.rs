use crate::codec::body::chunked_encoder::ChunkedEncoder;
use crate::codec::body::length_encoder::LengthEncoder;
use crate::protocol::GenerateError;
use bytes::BytesMut;
use tracing::error;

/// How the body of a message is delimited on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferMode {
    /// The message has no body
    None,
    /// `Content-Length` framing
    Length,
    /// `Transfer-Encoding: chunked` framing
    Chunked,
}

/// What happened to the body bytes offered to the encoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodeStatus {
    /// The bytes are accepted, and their envelope, if any, is written
    Accepted,
    /// A chunk buffer with enough room is required first
    NeedChunk,
}

/// frame the payload of the message being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEncoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// content-length payload
    Length(LengthEncoder),

    /// transfer-encoding chunked payload
    Chunked(ChunkedEncoder),

    /// have no body with the message
    NoBody,
}

impl PayloadEncoder {
    /// create an empty `PayloadEncoder`
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    /// create a chunked `PayloadEncoder`
    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedEncoder::new()) }
    }

    /// create a fixed length `PayloadEncoder`
    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthEncoder::new(size)) }
    }

    pub fn transfer_mode(&self) -> TransferMode {
        match &self.kind {
            Kind::Length(_) => TransferMode::Length,
            Kind::Chunked(_) => TransferMode::Chunked,
            Kind::NoBody => TransferMode::None,
        }
    }

    /// The declared length for `Content-Length` framing.
    pub fn fix_length_size(&self) -> Option<u64> {
        match &self.kind {
            Kind::Length(encoder) => Some(encoder.length()),
            Kind::Chunked(_) | Kind::NoBody => None,
        }
    }

    /// Returns true while chunked framing still owes its terminal chunk.
    pub fn is_chunking(&self) -> bool {
        match &self.kind {
            Kind::Chunked(encoder) => !encoder.is_finish(),
            Kind::Length(_) | Kind::NoBody => false,
        }
    }

    /// Bytes the envelope of `size` payload bytes takes, zero unless chunked.
    pub fn envelope_len(&self, size: usize) -> usize {
        match &self.kind {
            Kind::Chunked(encoder) => encoder.envelope_len(size),
            Kind::Length(_) | Kind::NoBody => 0,
        }
    }

    /// Bytes the end of body marker takes, zero unless chunked.
    pub fn eof_len(&self) -> usize {
        match &self.kind {
            Kind::Chunked(encoder) if !encoder.is_finish() => encoder.eof_len(),
            _ => 0,
        }
    }

    /// Accepts `size` body bytes, writing their envelope into `dst` when chunked.
    ///
    /// Nothing is accounted unless `Accepted` is returned.
    pub fn encode(&mut self, size: usize, dst: Option<&mut BytesMut>) -> Result<EncodeStatus, GenerateError> {
        match &mut self.kind {
            Kind::Length(encoder) => {
                encoder.accept(size)?;
                Ok(EncodeStatus::Accepted)
            }
            Kind::Chunked(encoder) => {
                if encoder.is_finish() {
                    error!("body bytes offered after the last chunk");
                    return Err(GenerateError::protocol_misuse("body after the last chunk"));
                }
                let Some(dst) = dst else {
                    return Ok(EncodeStatus::NeedChunk);
                };
                Ok(if encoder.encode_chunk(size, dst) { EncodeStatus::Accepted } else { EncodeStatus::NeedChunk })
            }
            Kind::NoBody => {
                error!(size, "body bytes offered for a message without body");
                Err(GenerateError::protocol_misuse("message has no body"))
            }
        }
    }

    /// Marks the end of the body, writing the terminal chunk into `dst` when chunked.
    pub fn encode_eof(&mut self, dst: Option<&mut BytesMut>) -> Result<EncodeStatus, GenerateError> {
        match &mut self.kind {
            Kind::Length(encoder) => {
                encoder.check_complete()?;
                Ok(EncodeStatus::Accepted)
            }
            Kind::Chunked(encoder) => {
                if encoder.is_finish() {
                    return Ok(EncodeStatus::Accepted);
                }
                let Some(dst) = dst else {
                    return Ok(EncodeStatus::NeedChunk);
                };
                Ok(if encoder.encode_eof(dst) { EncodeStatus::Accepted } else { EncodeStatus::NeedChunk })
            }
            Kind::NoBody => Ok(EncodeStatus::Accepted),
        }
    }

    /// Verifies the body may end now, without writing anything.
    pub fn check_complete(&self) -> Result<(), GenerateError> {
        match &self.kind {
            Kind::Length(encoder) => encoder.check_complete(),
            Kind::Chunked(_) | Kind::NoBody => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(PayloadEncoder::empty().transfer_mode(), TransferMode::None);
        assert_eq!(PayloadEncoder::chunked().transfer_mode(), TransferMode::Chunked);
        assert_eq!(PayloadEncoder::fix_length(3).transfer_mode(), TransferMode::Length);
        assert_eq!(PayloadEncoder::fix_length(3).fix_length_size(), Some(3));
        assert_eq!(PayloadEncoder::chunked().fix_length_size(), None);
    }

    #[test]
    fn test_chunked_needs_buffer() {
        let mut encoder = PayloadEncoder::chunked();
        assert!(encoder.is_chunking());
        assert_eq!(encoder.encode(13, None).unwrap(), EncodeStatus::NeedChunk);

        let mut dst = BytesMut::with_capacity(12);
        assert_eq!(encoder.encode(13, Some(&mut dst)).unwrap(), EncodeStatus::Accepted);
        assert_eq!(&dst[..], b"D\r\n");

        dst.clear();
        assert_eq!(encoder.encode_eof(None).unwrap(), EncodeStatus::NeedChunk);
        assert_eq!(encoder.encode_eof(Some(&mut dst)).unwrap(), EncodeStatus::Accepted);
        assert_eq!(&dst[..], b"\r\n0\r\n\r\n");
        assert!(!encoder.is_chunking());
        assert_eq!(encoder.eof_len(), 0);

        assert!(encoder.encode(1, Some(&mut dst)).unwrap_err().is_protocol_misuse());
    }

    #[test]
    fn test_length_ignores_buffer() {
        let mut encoder = PayloadEncoder::fix_length(5);
        assert_eq!(encoder.envelope_len(5), 0);
        assert!(encoder.encode_eof(None).unwrap_err().is_content_length_mismatch());
        assert_eq!(encoder.encode(5, None).unwrap(), EncodeStatus::Accepted);
        assert_eq!(encoder.encode_eof(None).unwrap(), EncodeStatus::Accepted);
        assert!(encoder.encode(1, None).unwrap_err().is_content_length_mismatch());
    }

    #[test]
    fn test_no_body_refuses_content() {
        let mut encoder = PayloadEncoder::empty();
        assert!(encoder.encode(1, None).unwrap_err().is_protocol_misuse());
        assert_eq!(encoder.encode_eof(None).unwrap(), EncodeStatus::Accepted);
        assert!(!encoder.is_chunking());
    }
}
