//! Generator configuration.

use bytes::Bytes;

/// Default upper bound for a rendered message header.
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8 * 1024;

/// Settings shared by every message a [`Generator`](crate::codec::Generator) produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    max_header_size: usize,
    server: Option<Bytes>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { max_header_size: DEFAULT_MAX_HEADER_SIZE, server: None }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest header, start line included, the generator agrees to render.
    #[must_use]
    pub fn with_max_header_size(mut self, max_header_size: usize) -> Self {
        self.max_header_size = max_header_size;
        self
    }

    /// Value of the `Server` field added to responses that do not carry one.
    #[must_use]
    pub fn with_server(mut self, server: impl Into<Bytes>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    pub fn server(&self) -> Option<&[u8]> {
        self.server.as_deref()
    }
}
