use crate::protocol::{GenerateError, HeaderFields, RequestInfo, ResponseInfo};
use http::Version;
use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};

/// Content length hint carried by a message.
///
/// This enum is used to determine how the payload should be framed:
/// - Known length: frame with `Content-Length`
/// - Chunked: frame with `Transfer-Encoding: chunked` whatever happens
/// - Unset: let the generator decide when the header is committed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ContentLength {
    /// No length is declared
    #[default]
    Unset,
    /// Use chunked transfer encoding regardless of the body
    Chunked,
    /// Exact body length in bytes
    Known(u64),
}

impl ContentLength {
    /// Returns true if an exact length is declared
    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, ContentLength::Known(_))
    }

    /// Returns true if chunked framing is requested
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, ContentLength::Chunked)
    }
}

/// Converts the signed wire convention: `-1` unset, `-2` chunked, `>= 0` known.
impl From<i64> for ContentLength {
    fn from(value: i64) -> Self {
        match value {
            -2 => ContentLength::Chunked,
            n => u64::try_from(n).map_or(ContentLength::Unset, ContentLength::Known),
        }
    }
}

impl From<u64> for ContentLength {
    fn from(value: u64) -> Self {
        ContentLength::Known(value)
    }
}

/// Metadata of a message to generate, either a request or a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInfo {
    Request(RequestInfo),
    Response(ResponseInfo),
}

impl MessageInfo {
    pub fn version(&self) -> Version {
        self.head().version()
    }

    pub fn fields(&self) -> &HeaderFields {
        self.head().fields()
    }

    pub fn content_length(&self) -> ContentLength {
        self.head().declared_length()
    }

    pub fn is_request(&self) -> bool {
        matches!(self, MessageInfo::Request(_))
    }

    pub(crate) fn head(&self) -> MessageHead<'_> {
        match self {
            MessageInfo::Request(request) => MessageHead::Request(request),
            MessageInfo::Response(response) => MessageHead::Response(response),
        }
    }
}

impl From<RequestInfo> for MessageInfo {
    fn from(request: RequestInfo) -> Self {
        MessageInfo::Request(request)
    }
}

impl From<ResponseInfo> for MessageInfo {
    fn from(response: ResponseInfo) -> Self {
        MessageInfo::Response(response)
    }
}

/// Borrowed view over either kind of message metadata.
///
/// Only the start line differs between requests and responses, everything after it
/// goes through this common view.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MessageHead<'a> {
    Request(&'a RequestInfo),
    Response(&'a ResponseInfo),
}

impl<'a> MessageHead<'a> {
    pub(crate) fn version(&self) -> Version {
        match self {
            MessageHead::Request(request) => request.version(),
            MessageHead::Response(response) => response.version(),
        }
    }

    pub(crate) fn fields(&self) -> &'a HeaderFields {
        match *self {
            MessageHead::Request(request) => request.fields(),
            MessageHead::Response(response) => response.fields(),
        }
    }

    pub(crate) fn declared_length(&self) -> ContentLength {
        match self {
            MessageHead::Request(request) => request.content_length(),
            MessageHead::Response(response) => response.content_length(),
        }
    }

    /// Responses to which a body must never be attached.
    pub(crate) fn forbids_body(&self) -> bool {
        match self {
            MessageHead::Request(_) => false,
            MessageHead::Response(response) => response.forbids_body(),
        }
    }

    /// Resolves the content length, falling back to the framing fields when no hint
    /// is declared.
    pub(crate) fn effective_length(&self) -> Result<ContentLength, GenerateError> {
        let declared = self.declared_length();
        if declared != ContentLength::Unset {
            return Ok(declared);
        }

        let fields = self.fields();
        if let Some(value) = fields.get(CONTENT_LENGTH.as_str()) {
            let length = std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .ok_or_else(|| GenerateError::invalid_content_length(String::from_utf8_lossy(value)))?;
            return Ok(ContentLength::Known(length));
        }

        let chunked = fields
            .get_all(TRANSFER_ENCODING.as_str())
            .filter_map(|value| std::str::from_utf8(value).ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|coding| !coding.is_empty())
            .last()
            .is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"));

        Ok(if chunked { ContentLength::Chunked } else { ContentLength::Unset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode, Uri};

    fn request() -> RequestInfo {
        RequestInfo::new(Method::POST, Uri::from_static("/index.html"))
    }

    #[test]
    fn content_length_from_signed() {
        assert_eq!(ContentLength::from(-1_i64), ContentLength::Unset);
        assert_eq!(ContentLength::from(-2_i64), ContentLength::Chunked);
        assert_eq!(ContentLength::from(-7_i64), ContentLength::Unset);
        assert_eq!(ContentLength::from(0_i64), ContentLength::Known(0));
        assert_eq!(ContentLength::from(58_i64), ContentLength::Known(58));
    }

    #[test]
    fn declared_length_wins_over_fields() {
        let mut info = request().with_content_length(ContentLength::Known(10));
        info.fields_mut().add("Content-Length", "58");
        let length = MessageHead::Request(&info).effective_length().unwrap();
        assert_eq!(length, ContentLength::Known(10));
    }

    #[test]
    fn length_from_content_length_field() {
        let mut info = request();
        info.fields_mut().add("Content-Length", " 58 ");
        let length = MessageHead::Request(&info).effective_length().unwrap();
        assert_eq!(length, ContentLength::Known(58));
    }

    #[test]
    fn invalid_content_length_field() {
        let mut info = request();
        info.fields_mut().add("Content-Length", "fifty");
        let result = MessageHead::Request(&info).effective_length();
        assert!(matches!(result, Err(GenerateError::InvalidContentLength { .. })));
    }

    #[test]
    fn chunked_from_transfer_encoding_field() {
        let mut info = request();
        info.fields_mut().add("Transfer-Encoding", "gzip, Chunked");
        let length = MessageHead::Request(&info).effective_length().unwrap();
        assert_eq!(length, ContentLength::Chunked);

        let mut info = request();
        info.fields_mut().add("Transfer-Encoding", "chunked, gzip");
        let length = MessageHead::Request(&info).effective_length().unwrap();
        assert_eq!(length, ContentLength::Unset);
    }

    #[test]
    fn message_info_common_view() {
        let info = MessageInfo::from(ResponseInfo::new(StatusCode::OK).with_content_length(ContentLength::Known(12)));
        assert!(!info.is_request());
        assert_eq!(info.version(), Version::HTTP_11);
        assert_eq!(info.content_length(), ContentLength::Known(12));
        assert!(info.fields().is_empty());
    }
}
