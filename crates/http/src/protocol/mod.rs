//! Message metadata consumed by the generator.
//!
//! This module provides the inputs of message generation: what to write on the start
//! line, which header fields follow it, and how long the body is expected to be.
//!
//! # Architecture
//!
//! - **Message Metadata** (`message`): the tagged request/response variant
//!   - [`MessageInfo`]: either a [`RequestInfo`] or a [`ResponseInfo`]
//!   - [`ContentLength`]: the content length hint driving the framing decision
//!
//! - **Request Metadata** (`request`): method, target, version
//!   - [`RequestInfo`]
//!
//! - **Response Metadata** (`response`): status, reason phrase, version
//!   - [`ResponseInfo`]
//!
//! - **Header Fields** (`fields`): ordered, case preserving field list
//!   - [`HeaderFields`], [`HeaderField`]
//!
//! - **Error Handling** (`error`):
//!   - [`GenerateError`]: fatal generation errors

mod message;
pub use message::ContentLength;
pub use message::MessageInfo;
pub(crate) use message::MessageHead;

mod request;
pub use request::RequestInfo;

mod response;
pub use response::ResponseInfo;

mod fields;
pub use fields::HeaderField;
pub use fields::HeaderFields;

mod error;
pub use error::GenerateError;
