//! Wire format for the Capstan cluster log.
//!
//! Every committed record starts with a fixed 8-byte frame header (zero-copy
//! binary) followed by a fixed-layout body and, for some record kinds, a
//! variable-length trailing section. The header carries the body's declared
//! block length, a template id selecting the record kind, and the producer's
//! schema version.
//!
//! The block length is what makes the format evolvable: a consumer reads only
//! the fields it knows and skips the rest of the declared block, so newer
//! producers can append fields without breaking older consumers. Template ids
//! outside the known set are not a decode error; callers are expected to
//! skip them.
//!
//! # Security
//!
//! All parsing goes through the bounds-checked [`Cursor`], and the frame
//! header layout is compile-time verified via `zerocopy`. Malformed input
//! surfaces as a [`CodecError`], never as an out-of-bounds read or a panic.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cursor;
pub mod errors;
pub mod frame;
pub mod header;
pub mod records;
pub mod templates;

pub use cursor::Cursor;
pub use errors::{CodecError, Result};
pub use frame::{decode_record, encode_record};
pub use header::FrameHeader;
pub use records::{
    CloseReason, ClusterAction, Record, ServiceAction, SessionClose, SessionMessage, SessionOpen,
    TimerEvent,
};
pub use templates::TemplateId;
