//! Utility macros and functions for the generator crate.
//!
//! This module provides helper macros and functions that are used internally
//! by the generator implementation.

use bytes::BytesMut;

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// It's useful for validation checks where you want to return early with an error
/// if some condition is not satisfied.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
///
/// # Example
///
/// ```ignore
/// ensure!(info.is_none(), GenerateError::protocol_misuse("message info after commit"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Number of bytes that can still be written into `buf` without reallocating.
///
/// Caller supplied buffers are treated as bounded: the generator never grows them.
#[inline]
pub(crate) fn spare_capacity(buf: &BytesMut) -> usize {
    buf.capacity() - buf.len()
}
