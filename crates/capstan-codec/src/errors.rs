//! Decode error taxonomy.
//!
//! Truncation is split by where it was detected: [`CodecError::TruncatedHeader`]
//! for the fixed frame prefix, [`CodecError::TruncatedBody`] for a record body
//! whose declared block cannot satisfy the codec's known fields. Both are
//! recoverable conditions to surface to the caller, not panics. An unknown
//! template id is deliberately absent here: it is a normal condition handled
//! by skipping, not an error.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while decoding framed records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A primitive read needed more bytes than the wrapped region holds.
    #[error("read of {needed} bytes exceeds the {available} bytes remaining")]
    OutOfBounds {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the region.
        available: usize,
    },

    /// Fewer than the fixed eight frame-header bytes were available.
    #[error("truncated frame header: only {available} of 8 bytes available")]
    TruncatedHeader {
        /// Bytes available where the header was expected.
        available: usize,
    },

    /// The record body is smaller than the fields the codec requires.
    #[error(
        "truncated body for template {template_id}: codec needs {needed} bytes, \
         {available} available"
    )]
    TruncatedBody {
        /// Template id of the codec that detected the truncation.
        template_id: u16,
        /// Fixed-block bytes the codec requires.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// An enum field carried an integer with no known mapping.
    #[error("no {field} mapping for value {value}")]
    InvalidEnum {
        /// Name of the enum field.
        field: &'static str,
        /// The unmapped wire value.
        value: i32,
    },

    /// A string field was not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}
