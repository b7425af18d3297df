//! Whole-frame helpers: header plus body in one buffer.
//!
//! Producers and tests use [`encode_record`]; [`decode_record`] is the
//! single-frame counterpart used where no dispatch is involved (tooling,
//! fuzzing). The replay dispatcher performs the same steps itself so it can
//! route each record kind to a different sink callback.

use crate::cursor::Cursor;
use crate::errors::Result;
use crate::header::FrameHeader;
use crate::records::Record;
use crate::templates::TemplateId;

/// Encode a record as a complete frame: header, fixed block, trailing
/// sections.
pub fn encode_record(record: &Record<'_>) -> Vec<u8> {
    let header = FrameHeader::new(record.block_length(), record.template_id().as_u16());
    let mut out =
        Vec::with_capacity(FrameHeader::ENCODED_LENGTH + usize::from(record.block_length()));
    header.encode_into(&mut out);
    record.encode_body_into(&mut out);
    out
}

/// Decode one complete frame.
///
/// Returns `Ok(None)` for a well-formed header whose template id is outside
/// the known set; that is the forward-compatibility case, not an error.
pub fn decode_record(frame: &[u8]) -> Result<Option<Record<'_>>> {
    let mut cursor = Cursor::new(frame);
    let header = FrameHeader::decode(&mut cursor)?;
    let Some(template) = TemplateId::from_u16(header.template_id()) else {
        return Ok(None);
    };
    Record::decode_body(template, &mut cursor, header.block_length(), header.version()).map(Some)
}
