//! Fixed frame header preceding every committed record.
//!
//! The header is 8 bytes of little-endian binary: block length, template id,
//! schema id, schema version, two bytes each. The layout is compile-time
//! verified via `zerocopy`, so decoding is a bounds check plus a cast with
//! no per-field parsing.

use zerocopy::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::cursor::Cursor;
use crate::errors::{CodecError, Result};

/// Common prefix of every record in the log.
///
/// `block_length` is the size of the record's fixed-layout body. A consumer
/// that knows fewer fields than the producer wrote skips the tail of the
/// block; variable-length sections follow the block and are not counted in
/// it.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct FrameHeader {
    block_length: U16,
    template_id: U16,
    schema_id: U16,
    version: U16,
}

impl FrameHeader {
    /// Encoded size of the header in bytes.
    pub const ENCODED_LENGTH: usize = 8;

    /// Schema id stamped on every frame this crate produces.
    pub const SCHEMA_ID: u16 = 101;

    /// Schema version this crate encodes and understands.
    pub const SCHEMA_VERSION: u16 = 1;

    /// Header for a record of the current schema.
    pub fn new(block_length: u16, template_id: u16) -> Self {
        Self {
            block_length: U16::new(block_length),
            template_id: U16::new(template_id),
            schema_id: U16::new(Self::SCHEMA_ID),
            version: U16::new(Self::SCHEMA_VERSION),
        }
    }

    /// Decode the fixed prefix from the cursor.
    ///
    /// Fails with [`CodecError::TruncatedHeader`] if fewer than
    /// [`Self::ENCODED_LENGTH`] bytes remain.
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let available = cursor.remaining();
        let bytes = cursor
            .read_bytes(Self::ENCODED_LENGTH)
            .map_err(|_| CodecError::TruncatedHeader { available })?;
        Self::read_from_bytes(bytes).map_err(|_| CodecError::TruncatedHeader { available })
    }

    /// Append the encoded header to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    /// Declared size of the fixed-layout body.
    pub fn block_length(&self) -> u16 {
        self.block_length.get()
    }

    /// Record kind selector.
    pub fn template_id(&self) -> u16 {
        self.template_id.get()
    }

    /// Schema family id.
    pub fn schema_id(&self) -> u16 {
        self.schema_id.get()
    }

    /// Producer's schema version.
    pub fn version(&self) -> u16 {
        self.version.get()
    }
}
