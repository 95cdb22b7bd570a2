//! Shared helpers for the generator property tests.
//!
//! [`drive`] plays the part of a transport: it feeds body pieces to a generator,
//! grows buffers when asked to and concatenates everything the generator flushes.
//! [`split_head`] and [`dechunk`] take the resulting wire bytes apart again.

use bytes::BytesMut;
use micro_http_generator::codec::{CHUNK_SIZE, Generator, Outcome};
use micro_http_generator::protocol::{GenerateError, MessageInfo};
use proptest::prelude::*;

/// Wire bytes of one generated message together with the outcomes seen on the way.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub wire: Vec<u8>,
    pub outcomes: Vec<Outcome>,
}

/// Generates `info` with `pieces` as body, starting from a header buffer of
/// `header_capacity` bytes.
///
/// The last piece is delivered together with the last flag. Buffers are enlarged
/// whenever the generator reports they are too small.
pub fn drive(
    generator: &mut Generator,
    info: &MessageInfo,
    pieces: &[Vec<u8>],
    header_capacity: usize,
) -> Result<Transcript, GenerateError> {
    let mut header = BytesMut::with_capacity(header_capacity);
    let mut chunk = BytesMut::with_capacity(CHUNK_SIZE);
    let mut info = Some(info);
    let mut transcript = Transcript { wire: Vec::new(), outcomes: Vec::new() };
    let mut index = 0;

    loop {
        let content = pieces.get(index).map(Vec::as_slice);
        let last = index + 1 >= pieces.len();

        let outcome = generator.generate(info, Some(&mut header), Some(&mut chunk), content, last)?;
        transcript.outcomes.push(outcome);

        match outcome {
            Outcome::NeedInfo => unreachable!("info is supplied until the header is committed"),
            Outcome::NeedHeader => header.reserve(header.capacity().max(64) * 2),
            Outcome::NeedChunk => chunk.reserve(CHUNK_SIZE),
            Outcome::Flush | Outcome::Continue => {
                transcript.wire.extend_from_slice(&header);
                transcript.wire.extend_from_slice(&chunk);
                if outcome == Outcome::Flush {
                    transcript.wire.extend_from_slice(content.unwrap_or_default());
                }
                header.clear();
                chunk.clear();
                info = None;
                index += 1;
            }
            Outcome::Done => return Ok(transcript),
        }
    }
}

/// Splits wire bytes at the blank line ending the head.
pub fn split_head(wire: &[u8]) -> (String, &[u8]) {
    let end = wire.windows(4).position(|w| w == b"\r\n\r\n").expect("wire bytes should contain a complete head") + 4;
    (String::from_utf8(wire[..end].to_vec()).expect("head should be utf-8"), &wire[end..])
}

/// Decodes a chunked body, returning the payload and the size of every data chunk.
///
/// Returns `None` unless `body` is exactly a sequence of chunks with upper case hex
/// sizes followed by a single terminal chunk.
pub fn dechunk(mut body: &[u8]) -> Option<(Vec<u8>, Vec<usize>)> {
    let mut payload = Vec::new();
    let mut sizes = Vec::new();

    loop {
        let line_end = body.windows(2).position(|w| w == b"\r\n")?;
        let hex = std::str::from_utf8(&body[..line_end]).ok()?;
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)) {
            return None;
        }
        let size = usize::from_str_radix(hex, 16).ok()?;
        body = &body[line_end + 2..];

        if size == 0 {
            return (body == b"\r\n").then_some((payload, sizes));
        }

        let data = body.get(..size)?;
        payload.extend_from_slice(data);
        sizes.push(size);
        body = body[size..].strip_prefix(b"\r\n")?;
    }
}

/// Header field names unrelated to framing.
pub fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Host".to_string()),
        Just("Accept".to_string()),
        Just("User-Agent".to_string()),
        Just("Cache-Control".to_string()),
        "X-[A-Za-z]{1,8}".prop_map(|s| s),
    ]
}

pub fn field_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 /.-]{1,32}".prop_map(|s| s)
}

pub fn fields() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((field_name(), field_value()), 0..6)
}

/// Body split into the pieces handed to the generator, empty pieces included.
pub fn pieces() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..300), 0..6)
}

pub fn concat(pieces: &[Vec<u8>]) -> Vec<u8> {
    pieces.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dechunk_accepts_generated_framing() {
        let body = b"D\r\nHello World. \r\n2\r\nok\r\n0\r\n\r\n";
        let (payload, sizes) = dechunk(body).unwrap();
        assert_eq!(payload, b"Hello World. ok");
        assert_eq!(sizes, vec![13, 2]);
    }

    #[test]
    fn dechunk_rejects_malformed_framing() {
        assert!(dechunk(b"d\r\nHello World. \r\n0\r\n\r\n").is_none());
        assert!(dechunk(b"2\r\nok\r\n").is_none());
        assert!(dechunk(b"0\r\n\r\n0\r\n\r\n").is_none());
    }
}
