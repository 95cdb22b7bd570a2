//! Accounting for bodies framed by `Content-Length`.
//!
//! Nothing surrounds the payload in this framing, the encoder only makes sure the
//! caller delivers exactly the declared number of bytes.

use crate::ensure;
use crate::protocol::GenerateError;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    length: u64,
    prepared: u64,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { length, prepared: 0 }
    }

    /// Accepts `size` more body bytes, refusing to go past the declared length.
    pub fn accept(&mut self, size: usize) -> Result<(), GenerateError> {
        let prepared = self.prepared.saturating_add(size as u64);
        if prepared > self.length {
            error!(declared = self.length, prepared, remaining = self.remaining(), "body exceeds the declared content length");
            return Err(GenerateError::content_length_mismatch(self.length, prepared));
        }
        self.prepared = prepared;
        Ok(())
    }

    /// Verifies that the whole declared body was delivered.
    pub fn check_complete(&self) -> Result<(), GenerateError> {
        ensure!(self.is_finish(), {
            error!(declared = self.length, prepared = self.prepared, "body ended before the declared content length");
            GenerateError::content_length_mismatch(self.length, self.prepared)
        });
        Ok(())
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn remaining(&self) -> u64 {
        self.length - self.prepared
    }

    pub fn is_finish(&self) -> bool {
        self.prepared == self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length() {
        let mut encoder = LengthEncoder::new(58);
        encoder.accept(13).unwrap();
        assert_eq!(encoder.remaining(), 45);
        assert!(!encoder.is_finish());
        assert!(encoder.check_complete().is_err());

        encoder.accept(45).unwrap();
        assert!(encoder.is_finish());
        assert!(encoder.check_complete().is_ok());
    }

    #[test]
    fn test_overflow() {
        let mut encoder = LengthEncoder::new(10);
        encoder.accept(8).unwrap();

        let error = encoder.accept(3).unwrap_err();
        assert_eq!(error, GenerateError::content_length_mismatch(10, 11));
        // the refused bytes are not accounted
        assert_eq!(encoder.remaining(), 2);
    }

    #[test]
    fn test_zero_length() {
        let encoder = LengthEncoder::new(0);
        assert!(encoder.is_finish());
        assert_eq!(encoder.length(), 0);
    }
}
