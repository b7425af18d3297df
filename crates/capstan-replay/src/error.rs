//! Replay error types.
//!
//! Every variant carries the log position of the offending fragment, and the
//! template id once the header was readable, so a schema mismatch can be
//! located in the log without re-running the replay under a debugger.

use capstan_codec::CodecError;
use thiserror::Error;

/// A fragment that could not be decoded during replay.
///
/// These abort the current poll; they are not retried here, since replay is
/// only idempotent when restarted from the same log position, and that
/// decision belongs to the duty-cycle owner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The frame header itself could not be decoded.
    #[error("frame header at log position {position} could not be decoded")]
    Header {
        /// Byte position of the fragment within the log.
        position: u64,
        /// The underlying codec failure.
        #[source]
        source: CodecError,
    },

    /// The header was readable but the matched codec rejected the body.
    #[error("record with template {template_id} at log position {position} could not be decoded")]
    Body {
        /// Template id from the frame header.
        template_id: u16,
        /// Byte position of the fragment within the log.
        position: u64,
        /// The underlying codec failure.
        #[source]
        source: CodecError,
    },
}

impl ReplayError {
    /// Byte position of the fragment this error refers to.
    pub fn position(&self) -> u64 {
        match self {
            Self::Header { position, .. } | Self::Body { position, .. } => *position,
        }
    }

    /// The underlying codec failure.
    pub fn codec_error(&self) -> &CodecError {
        match self {
            Self::Header { source, .. } | Self::Body { source, .. } => source,
        }
    }
}
