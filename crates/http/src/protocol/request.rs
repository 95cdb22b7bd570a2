//! HTTP request metadata for the generator.
//!
//! This module provides [`RequestInfo`], everything the generator needs to render a
//! request line and its header fields: method, target, version, the header fields
//! themselves and the content length hint used for framing.

use http::request::Parts;
use http::{Method, Request, Uri, Version};

use crate::protocol::{ContentLength, HeaderFields};

/// Represents the head of an HTTP request to generate.
///
/// This struct holds:
/// - The request method and target
/// - The HTTP version (HTTP/1.1 by default)
/// - Header fields in the order they will be written
/// - The content length hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    version: Version,
    fields: HeaderFields,
    content_length: ContentLength,
    method: Method,
    uri: Uri,
}

impl RequestInfo {
    /// Creates an HTTP/1.1 request with no fields and no declared length.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { version: Version::HTTP_11, fields: HeaderFields::new(), content_length: ContentLength::Unset, method, uri }
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

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns a reference to the request's target.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns a reference to the request's header fields.
    pub fn fields(&self) -> &HeaderFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut HeaderFields {
        &mut self.fields
    }

    /// Returns the declared content length hint.
    pub fn content_length(&self) -> ContentLength {
        self.content_length
    }
}

/// Converts request parts, the header map becomes the field list.
impl From<&Parts> for RequestInfo {
    fn from(parts: &Parts) -> Self {
        Self {
            version: parts.version,
            fields: HeaderFields::from(&parts.headers),
            content_length: ContentLength::Unset,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
        }
    }
}

impl<T> From<&Request<T>> for RequestInfo {
    fn from(request: &Request<T>) -> Self {
        Self {
            version: request.version(),
            fields: HeaderFields::from(request.headers()),
            content_length: ContentLength::Unset,
            method: request.method().clone(),
            uri: request.uri().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let info = RequestInfo::new(Method::GET, Uri::from_static("/index.html"));

        assert_eq!(info.method(), &Method::GET);
        assert_eq!(info.uri().path(), "/index.html");
        assert_eq!(info.version(), Version::HTTP_11);
        assert_eq!(info.content_length(), ContentLength::Unset);
        assert!(info.fields().is_empty());
    }

    #[test]
    fn builder_setters() {
        let mut fields = HeaderFields::new();
        fields.add("Host", "something");

        let info = RequestInfo::new(Method::POST, Uri::from_static("/upload"))
            .with_version(Version::HTTP_10)
            .with_fields(fields)
            .with_content_length(ContentLength::Known(58));

        assert_eq!(info.version(), Version::HTTP_10);
        assert_eq!(info.fields().get_str("host"), Some("something"));
        assert_eq!(info.content_length(), ContentLength::Known(58));
    }

    #[test]
    fn from_http_request() {
        let request = Request::builder()
            .method(Method::PUT)
            .uri("http://127.0.0.1:8080/index/?a=1")
            .header(http::header::HOST, "127.0.0.1:8080")
            .header(http::header::USER_AGENT, "curl/7.79.1")
            .body(())
            .unwrap();

        let info = RequestInfo::from(&request);
        assert_eq!(info.method(), &Method::PUT);
        assert_eq!(info.uri().query(), Some("a=1"));
        assert_eq!(info.fields().len(), 2);
        assert_eq!(info.fields().get_str("user-agent"), Some("curl/7.79.1"));

        let (parts, ()) = request.into_parts();
        assert_eq!(RequestInfo::from(&parts), info);
    }
}
