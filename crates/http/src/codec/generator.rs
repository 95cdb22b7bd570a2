//! Resumable HTTP/1.1 message generator.
//!
//! The [`Generator`] turns message metadata and a sequence of body slices into wire
//! bytes across as many calls as the caller's buffers require. It performs no I/O and
//! never holds body bytes: each call either writes into the buffers it is handed and
//! returns [`Outcome::Flush`], or tells the caller what it is missing.
//!
//! # Buffers
//!
//! - the *header* buffer receives the start line and header fields, once per message
//! - the *chunk* buffer receives chunk envelopes and the terminal chunk
//! - the *content* slice is the next piece of body; it is never copied
//!
//! After a `Flush` the caller sends the header buffer, then the chunk buffer, then the
//! content slice, and clears what it sent before the next call. Buffers are bounded by
//! their spare capacity, the generator never grows them.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use http::{Method, Uri};
//! use micro_http_generator::codec::{Generator, Outcome, Phase, CHUNK_SIZE};
//! use micro_http_generator::protocol::RequestInfo;
//!
//! let mut info = RequestInfo::new(Method::POST, Uri::from_static("/upload"));
//! info.fields_mut().add("Host", "example.com");
//!
//! let mut generator = Generator::new();
//! let mut header = BytesMut::with_capacity(1024);
//! let mut chunk = BytesMut::with_capacity(CHUNK_SIZE);
//! let mut wire = Vec::new();
//!
//! let outcome = generator.generate_request(Some(&info), Some(&mut header), None, Some(&b"hello"[..]), false).unwrap();
//! assert_eq!(outcome, Outcome::Flush);
//! wire.extend_from_slice(&header);
//! wire.extend_from_slice(b"hello");
//! header.clear();
//!
//! assert_eq!(generator.generate_request(None, None, Some(&mut chunk), None, true).unwrap(), Outcome::Continue);
//! assert_eq!(generator.generate_request(None, None, Some(&mut chunk), None, true).unwrap(), Outcome::Flush);
//! wire.extend_from_slice(&chunk);
//! assert_eq!(generator.generate_request(None, None, Some(&mut chunk), None, true).unwrap(), Outcome::Done);
//! assert_eq!(generator.phase(), Phase::End);
//!
//! let wire = String::from_utf8(wire).unwrap();
//! assert!(wire.ends_with("Transfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n"));
//! ```

use std::mem;

use crate::codec::body::{EncodeStatus, PayloadEncoder, TransferMode};
use crate::codec::header::{HeaderEncoder, INIT_HEADER_SIZE};
use crate::config::GeneratorConfig;
use crate::ensure;
use crate::protocol::{ContentLength, GenerateError, MessageHead, MessageInfo, RequestInfo, ResponseInfo};
use crate::utils::spare_capacity;
use bytes::{BufMut, BytesMut};
use http::Version;
use tracing::{debug, error, trace};

/// Recommended capacity of chunk buffers: CRLF, eight hex digits and CRLF.
pub const CHUNK_SIZE: usize = 12;

/// Lifecycle of the message being generated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No header bytes emitted yet
    Start,
    /// Header emitted, framing fixed, more body may follow
    Committed,
    /// The end of the body is known, the terminal marker or confirmation is pending
    Completing,
    /// The message is fully generated
    End,
}

/// Result of a single generator call.
///
/// Apart from `Flush` and `Done` these are backpressure signals: the caller retries
/// with what is asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Message metadata is required before the header can be produced
    NeedInfo,
    /// A header buffer, or one with more room, is required
    NeedHeader,
    /// A chunk buffer, or one with more room, is required
    NeedChunk,
    /// Bytes were produced; send header, chunk and content before calling again
    Flush,
    /// Nothing was produced, call again to make progress
    Continue,
    /// The message is complete
    Done,
}

#[derive(Debug, Clone)]
enum State {
    Start,
    Committed(PayloadEncoder),
    Completing(PayloadEncoder),
    End(TransferMode),
}

/// Incremental generator for one HTTP/1.1 message at a time.
///
/// A generator is driven by repeated calls to [`generate_request`](Self::generate_request),
/// [`generate_response`](Self::generate_response) or [`generate`](Self::generate). Once
/// the header is committed all three continue the message the same way. After
/// [`Outcome::Done`] call [`reset`](Self::reset) before generating the next message.
#[derive(Debug, Clone)]
pub struct Generator {
    header_encoder: HeaderEncoder,
    state: State,
    content_prepared: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_config(GeneratorConfig::default())
    }
}

impl Generator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { header_encoder: HeaderEncoder::new(config), state: State::Start, content_prepared: 0 }
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.header_encoder.config()
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Start => Phase::Start,
            State::Committed(_) => Phase::Committed,
            State::Completing(_) => Phase::Completing,
            State::End(_) => Phase::End,
        }
    }

    /// Returns true while chunked framing is active and its terminal chunk is not written.
    pub fn is_chunking(&self) -> bool {
        match &self.state {
            State::Committed(encoder) | State::Completing(encoder) => encoder.is_chunking(),
            State::Start | State::End(_) => false,
        }
    }

    /// The framing selected at commit time, `None` before the header is committed.
    pub fn transfer_mode(&self) -> Option<TransferMode> {
        match &self.state {
            State::Start => None,
            State::Committed(encoder) | State::Completing(encoder) => Some(encoder.transfer_mode()),
            State::End(mode) => Some(*mode),
        }
    }

    /// Body bytes accepted for the current message, envelopes and header excluded.
    pub fn content_prepared(&self) -> u64 {
        self.content_prepared
    }

    pub fn is_committed(&self) -> bool {
        !matches!(self.state, State::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.state, State::End(_))
    }

    /// Forgets the current message so the generator can start a new one.
    pub fn reset(&mut self) {
        trace!(phase = ?self.phase(), "reset generator");
        self.state = State::Start;
        self.content_prepared = 0;
    }

    /// Generates a request: the request line is taken from `info` at commit time.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn generate_request(
        &mut self,
        info: Option<&RequestInfo>,
        header: Option<&mut BytesMut>,
        chunk: Option<&mut BytesMut>,
        content: Option<&[u8]>,
        last: bool,
    ) -> Result<Outcome, GenerateError> {
        self.step(info.map(MessageHead::Request), header, chunk, content, last)
    }

    /// Generates a response: the status line is taken from `info` at commit time.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn generate_response(
        &mut self,
        info: Option<&ResponseInfo>,
        header: Option<&mut BytesMut>,
        chunk: Option<&mut BytesMut>,
        content: Option<&[u8]>,
        last: bool,
    ) -> Result<Outcome, GenerateError> {
        self.step(info.map(MessageHead::Response), header, chunk, content, last)
    }

    /// Runs one step of message generation.
    ///
    /// # Arguments
    ///
    /// * `info` - Message metadata, only accepted before the header is committed
    /// * `header` - Buffer receiving the message head
    /// * `chunk` - Buffer receiving chunk envelopes once the head is committed
    /// * `content` - Next body slice; an empty slice counts as no content
    /// * `last` - No body follows the bytes supplied so far
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - metadata is supplied after the header was committed, body bytes follow `last`,
    ///   body bytes are supplied for a message without body, or the message already ended
    /// - the body does not match the declared content length
    /// - the content length field can not be parsed, the head is too large, or the
    ///   version does not support the required framing
    pub fn generate(
        &mut self,
        info: Option<&MessageInfo>,
        header: Option<&mut BytesMut>,
        chunk: Option<&mut BytesMut>,
        content: Option<&[u8]>,
        last: bool,
    ) -> Result<Outcome, GenerateError> {
        self.step(info.map(MessageInfo::head), header, chunk, content, last)
    }

    fn step(
        &mut self,
        head: Option<MessageHead<'_>>,
        header: Option<&mut BytesMut>,
        chunk: Option<&mut BytesMut>,
        content: Option<&[u8]>,
        last: bool,
    ) -> Result<Outcome, GenerateError> {
        let content = content.filter(|content| !content.is_empty());

        match &mut self.state {
            State::Start => self.commit(head, header, content, last),

            State::Committed(encoder) => {
                ensure!(head.is_none(), info_after_commit());
                let size = content.map_or(0, <[u8]>::len);

                let outcome = prepare_content(encoder, chunk, content, last)?;
                if outcome == Outcome::Flush {
                    self.content_prepared += size as u64;
                }
                if last && outcome != Outcome::NeedChunk {
                    self.advance();
                }
                Ok(outcome)
            }

            State::Completing(encoder) => {
                ensure!(head.is_none(), info_after_commit());
                ensure!(content.is_none(), {
                    error!("body bytes supplied after the last flag");
                    GenerateError::protocol_misuse("body after the end of the message was signaled")
                });

                if encoder.is_chunking() {
                    return Ok(match encoder.encode_eof(chunk)? {
                        EncodeStatus::Accepted => Outcome::Flush,
                        EncodeStatus::NeedChunk => {
                            debug!("no room for the last chunk");
                            Outcome::NeedChunk
                        }
                    });
                }

                self.advance();
                trace!(content_prepared = self.content_prepared, "message generated");
                Ok(Outcome::Done)
            }

            State::End(_) => {
                error!("generate called after the message ended");
                Err(GenerateError::protocol_misuse("message already generated, reset the generator first"))
            }
        }
    }

    fn commit(
        &mut self,
        head: Option<MessageHead<'_>>,
        header: Option<&mut BytesMut>,
        content: Option<&[u8]>,
        last: bool,
    ) -> Result<Outcome, GenerateError> {
        let Some(head) = head else {
            trace!("message info required");
            return Ok(Outcome::NeedInfo);
        };
        let Some(header) = header else {
            trace!("header buffer required");
            return Ok(Outcome::NeedHeader);
        };

        let size = content.map_or(0, <[u8]>::len);
        let mut encoder = select_payload_encoder(head, size, last)?;

        // account the body before any byte reaches the caller's buffer
        let chunked = encoder.transfer_mode() == TransferMode::Chunked;
        if size > 0 && !chunked {
            encoder.encode(size, None)?;
        }
        if last {
            encoder.check_complete()?;
        }

        let mut rendered = BytesMut::with_capacity(INIT_HEADER_SIZE);
        self.header_encoder.encode(head, &encoder, &mut rendered)?;

        let framing = match (size, last) {
            (0, true) => encoder.eof_len(),
            (0, false) => 0,
            (size, _) => encoder.envelope_len(size),
        };
        let required = rendered.len() + framing;
        let available = spare_capacity(header);
        if available < required {
            debug!(required, available, "no room for the message header");
            return Ok(Outcome::NeedHeader);
        }

        header.put_slice(&rendered);
        if chunked {
            // room for the envelope was checked together with the header
            let status = if size > 0 {
                encoder.encode(size, Some(header))?
            } else if last {
                encoder.encode_eof(Some(header))?
            } else {
                EncodeStatus::Accepted
            };
            debug_assert_eq!(status, EncodeStatus::Accepted);
        }

        self.content_prepared += size as u64;
        trace!(
            transfer_mode = ?encoder.transfer_mode(),
            header_size = rendered.len(),
            content_size = size,
            last,
            "header committed"
        );
        self.state = if last { State::Completing(encoder) } else { State::Committed(encoder) };
        Ok(Outcome::Flush)
    }

    /// Moves to the next phase once the current one is done.
    fn advance(&mut self) {
        self.state = match mem::replace(&mut self.state, State::Start) {
            State::Committed(encoder) => State::Completing(encoder),
            State::Completing(encoder) => State::End(encoder.transfer_mode()),
            state => state,
        };
        trace!(phase = ?self.phase(), "phase advanced");
    }
}

/// Chooses the body framing, exactly once, when the header is about to be written.
fn select_payload_encoder(head: MessageHead<'_>, size: usize, last: bool) -> Result<PayloadEncoder, GenerateError> {
    if head.forbids_body() {
        ensure!(size == 0, {
            error!(size, "body bytes supplied for a response that can not carry a body");
            GenerateError::protocol_misuse("response status forbids a body")
        });
        return Ok(PayloadEncoder::empty());
    }

    let encoder = match head.effective_length()? {
        ContentLength::Known(length) => PayloadEncoder::fix_length(length),
        ContentLength::Chunked => PayloadEncoder::chunked(),
        // the whole body is at hand, its length is known
        ContentLength::Unset if last && size > 0 => PayloadEncoder::fix_length(size as u64),
        ContentLength::Unset if last => PayloadEncoder::empty(),
        ContentLength::Unset => PayloadEncoder::chunked(),
    };

    match head.version() {
        Version::HTTP_11 => Ok(encoder),
        Version::HTTP_10 if encoder.transfer_mode() != TransferMode::Chunked => Ok(encoder),
        Version::HTTP_10 => {
            error!("chunked framing required for an HTTP/1.0 message");
            Err(GenerateError::ChunkedUnavailable(Version::HTTP_10))
        }
        v => {
            error!(http_version = ?v, "unsupported http version");
            Err(GenerateError::UnsupportedVersion(v))
        }
    }
}

/// Offers body bytes to an already committed message.
fn prepare_content(
    encoder: &mut PayloadEncoder,
    chunk: Option<&mut BytesMut>,
    content: Option<&[u8]>,
    last: bool,
) -> Result<Outcome, GenerateError> {
    let Some(content) = content else {
        if last {
            encoder.check_complete()?;
        }
        return Ok(Outcome::Continue);
    };

    match encoder.encode(content.len(), chunk)? {
        EncodeStatus::NeedChunk => {
            debug!(size = content.len(), "no room for the chunk envelope");
            Ok(Outcome::NeedChunk)
        }
        EncodeStatus::Accepted => {
            if last {
                encoder.check_complete()?;
            }
            Ok(Outcome::Flush)
        }
    }
}

fn info_after_commit() -> GenerateError {
    error!("message info supplied after the header was committed");
    GenerateError::protocol_misuse("message info supplied after commit")
}
