//! HTTP response metadata for the generator.
//!
//! [`ResponseInfo`] carries the status, reason phrase, version, header fields and the
//! content length hint of a response to generate.

use std::borrow::Cow;

use http::response::Parts;
use http::{Response, StatusCode, Version};

use crate::protocol::{ContentLength, HeaderFields};

/// Represents the head of an HTTP response to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    version: Version,
    fields: HeaderFields,
    content_length: ContentLength,
    status: StatusCode,
    reason: Option<Cow<'static, str>>,
}

impl ResponseInfo {
    /// Creates an HTTP/1.1 response with the canonical reason phrase.
    pub fn new(status: StatusCode) -> Self {
        Self { version: Version::HTTP_11, fields: HeaderFields::new(), content_length: ContentLength::Unset, status, reason: None }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: HeaderFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_content_length(mut self, content_length: ContentLength) -> Self {
        self.content_length = content_length;
        self
    }

    /// Overrides the reason phrase written on the status line.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase, falling back to the canonical one for the status.
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or_else(|| self.status.canonical_reason().unwrap_or(""))
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn fields(&self) -> &HeaderFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut HeaderFields {
        &mut self.fields
    }

    pub fn content_length(&self) -> ContentLength {
        self.content_length
    }

    /// Informational, `204 No Content` and `304 Not Modified` responses never carry a body.
    pub fn forbids_body(&self) -> bool {
        self.status.is_informational() || self.status == StatusCode::NO_CONTENT || self.status == StatusCode::NOT_MODIFIED
    }
}

impl From<&Parts> for ResponseInfo {
    fn from(parts: &Parts) -> Self {
        Self::new(parts.status).with_version(parts.version).with_fields(HeaderFields::from(&parts.headers))
    }
}

impl<T> From<&Response<T>> for ResponseInfo {
    fn from(response: &Response<T>) -> Self {
        Self::new(response.status()).with_version(response.version()).with_fields(HeaderFields::from(response.headers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_reason() {
        assert_eq!(ResponseInfo::new(StatusCode::OK).reason(), "OK");
        assert_eq!(ResponseInfo::new(StatusCode::NOT_FOUND).reason(), "Not Found");
        assert_eq!(ResponseInfo::new(StatusCode::from_u16(599).unwrap()).reason(), "");
    }

    #[test]
    fn custom_reason() {
        let info = ResponseInfo::new(StatusCode::OK).with_reason("Fine");
        assert_eq!(info.reason(), "Fine");
    }

    #[test]
    fn bodyless_statuses() {
        assert!(ResponseInfo::new(StatusCode::CONTINUE).forbids_body());
        assert!(ResponseInfo::new(StatusCode::SWITCHING_PROTOCOLS).forbids_body());
        assert!(ResponseInfo::new(StatusCode::NO_CONTENT).forbids_body());
        assert!(ResponseInfo::new(StatusCode::NOT_MODIFIED).forbids_body());
        assert!(!ResponseInfo::new(StatusCode::OK).forbids_body());
        assert!(!ResponseInfo::new(StatusCode::NOT_FOUND).forbids_body());
    }

    #[test]
    fn from_http_response() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .header(http::header::LOCATION, "/items/1")
            .body(())
            .unwrap();

        let info = ResponseInfo::from(&response);
        assert_eq!(info.status(), StatusCode::CREATED);
        assert_eq!(info.reason(), "Created");
        assert_eq!(info.fields().get_str("location"), Some("/items/1"));

        let (parts, ()) = response.into_parts();
        assert_eq!(ResponseInfo::from(&parts), info);
    }
}
