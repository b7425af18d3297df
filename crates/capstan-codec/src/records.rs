//! Record bodies and their codecs, one per template id.
//!
//! Each codec reads only the fields it understands. When the declared block
//! is larger (a newer producer appended fixed fields), the tail of the block
//! is skipped before any variable-length section. When the declared block is
//! smaller than the known fields, decoding fails with
//! [`CodecError::TruncatedBody`]; a codec never reads fixed fields past the
//! declared block.
//!
//! Byte-backed fields (`payload`, `response_channel`) borrow from the frame
//! buffer. They are views, not copies; consumers that retain them past the
//! buffer's lifetime must copy.

use crate::cursor::Cursor;
use crate::errors::{CodecError, Result};
use crate::templates::TemplateId;

/// Why a client session left the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CloseReason {
    /// The client asked to close.
    ClientAction = 0,
    /// A service closed the session.
    ServiceAction = 1,
    /// The session timed out.
    Timeout = 2,
}

impl CloseReason {
    /// Map a wire value; unmapped values are a structured error, never a
    /// guessed default.
    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::ClientAction),
            1 => Ok(Self::ServiceAction),
            2 => Ok(Self::Timeout),
            _ => Err(CodecError::InvalidEnum { field: "close_reason", value }),
        }
    }

    /// The reason's wire value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Cluster lifecycle action a service asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ClusterAction {
    /// Initialise service state.
    Init = 0,
    /// Take a snapshot of service state.
    Snapshot = 1,
    /// Snapshot, then shut down in an orderly fashion.
    Shutdown = 2,
    /// Shut down without a snapshot.
    Abort = 3,
}

impl ClusterAction {
    /// Map a wire value; unmapped values are a structured error.
    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Init),
            1 => Ok(Self::Snapshot),
            2 => Ok(Self::Shutdown),
            3 => Ok(Self::Abort),
            _ => Err(CodecError::InvalidEnum { field: "action", value }),
        }
    }

    /// The action's wire value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Checks shared by every body codec: the block must cover the known fixed
/// fields, and the region must cover the block.
fn check_block(
    template: TemplateId,
    cursor: &Cursor<'_>,
    block_length: u16,
    known: usize,
) -> Result<usize> {
    let block = usize::from(block_length);
    if block < known {
        return Err(CodecError::TruncatedBody {
            template_id: template.as_u16(),
            needed: known,
            available: block,
        });
    }
    if cursor.remaining() < block {
        return Err(CodecError::TruncatedBody {
            template_id: template.as_u16(),
            needed: block,
            available: cursor.remaining(),
        });
    }
    Ok(block)
}

/// Application message routed through a client session.
///
/// The payload is whatever follows the fixed block, with no explicit length
/// field: its size is the remainder of the fragment. The payload is opaque
/// to the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionMessage<'a> {
    /// Client-assigned correlation for responses.
    pub correlation_id: i64,
    /// Cluster-wide session the message arrived on.
    pub cluster_session_id: i64,
    /// Commit timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// Opaque application bytes, borrowed from the frame buffer.
    pub payload: &'a [u8],
}

impl<'a> SessionMessage<'a> {
    /// Size of the fixed-layout body this codec understands.
    pub const BLOCK_LENGTH: u16 = 24;

    /// Decode the body that follows a [`SessionMessage`](TemplateId::SessionMessage) header.
    pub fn decode(cursor: &mut Cursor<'a>, block_length: u16, _version: u16) -> Result<Self> {
        let block =
            check_block(TemplateId::SessionMessage, cursor, block_length, usize::from(Self::BLOCK_LENGTH))?;
        let correlation_id = cursor.read_i64()?;
        let cluster_session_id = cursor.read_i64()?;
        let timestamp = cursor.read_i64()?;
        cursor.skip(block - usize::from(Self::BLOCK_LENGTH))?;
        let payload = cursor.rest();
        Ok(Self { correlation_id, cluster_session_id, timestamp, payload })
    }

    /// Append the encoded body to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.correlation_id.to_le_bytes());
        out.extend_from_slice(&self.cluster_session_id.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(self.payload);
    }
}

/// Client session accepted into the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOpen<'a> {
    /// Correlation of the connect request.
    pub correlation_id: i64,
    /// Newly assigned cluster session.
    pub cluster_session_id: i64,
    /// Commit timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// Stream id the cluster responds on.
    pub response_stream_id: i32,
    /// Channel URI the cluster responds on, borrowed from the frame buffer.
    pub response_channel: &'a str,
}

impl<'a> SessionOpen<'a> {
    /// Size of the fixed-layout body this codec understands. The response
    /// channel follows the block as a length-prefixed string and is not
    /// counted here.
    pub const BLOCK_LENGTH: u16 = 28;

    /// Decode the body that follows a [`SessionOpen`](TemplateId::SessionOpen) header.
    pub fn decode(cursor: &mut Cursor<'a>, block_length: u16, _version: u16) -> Result<Self> {
        let block =
            check_block(TemplateId::SessionOpen, cursor, block_length, usize::from(Self::BLOCK_LENGTH))?;
        let correlation_id = cursor.read_i64()?;
        let cluster_session_id = cursor.read_i64()?;
        let timestamp = cursor.read_i64()?;
        let response_stream_id = cursor.read_i32()?;
        cursor.skip(block - usize::from(Self::BLOCK_LENGTH))?;
        let response_channel = cursor.read_string()?;
        Ok(Self { correlation_id, cluster_session_id, timestamp, response_stream_id, response_channel })
    }

    /// Append the encoded body to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.correlation_id.to_le_bytes());
        out.extend_from_slice(&self.cluster_session_id.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.response_stream_id.to_le_bytes());
        let channel = self.response_channel.as_bytes();
        out.extend_from_slice(&(channel.len() as u32).to_le_bytes());
        out.extend_from_slice(channel);
    }
}

/// Client session left the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClose {
    /// Correlation of the close request.
    pub correlation_id: i64,
    /// The session that closed.
    pub cluster_session_id: i64,
    /// Commit timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// Why the session closed.
    pub close_reason: CloseReason,
}

impl SessionClose {
    /// Size of the fixed-layout body this codec understands.
    pub const BLOCK_LENGTH: u16 = 28;

    /// Decode the body that follows a [`SessionClose`](TemplateId::SessionClose) header.
    pub fn decode(cursor: &mut Cursor<'_>, block_length: u16, _version: u16) -> Result<Self> {
        let block =
            check_block(TemplateId::SessionClose, cursor, block_length, usize::from(Self::BLOCK_LENGTH))?;
        let correlation_id = cursor.read_i64()?;
        let cluster_session_id = cursor.read_i64()?;
        let timestamp = cursor.read_i64()?;
        let close_reason = CloseReason::from_i32(cursor.read_i32()?)?;
        cursor.skip(block - usize::from(Self::BLOCK_LENGTH))?;
        Ok(Self { correlation_id, cluster_session_id, timestamp, close_reason })
    }

    /// Append the encoded body to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.correlation_id.to_le_bytes());
        out.extend_from_slice(&self.cluster_session_id.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.close_reason.as_i32().to_le_bytes());
    }
}

/// Expired cluster timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// Correlation the timer was scheduled with.
    pub correlation_id: i64,
    /// Expiry timestamp, epoch milliseconds.
    pub timestamp: i64,
}

impl TimerEvent {
    /// Size of the fixed-layout body this codec understands.
    pub const BLOCK_LENGTH: u16 = 16;

    /// Decode the body that follows a [`TimerEvent`](TemplateId::TimerEvent) header.
    pub fn decode(cursor: &mut Cursor<'_>, block_length: u16, _version: u16) -> Result<Self> {
        let block =
            check_block(TemplateId::TimerEvent, cursor, block_length, usize::from(Self::BLOCK_LENGTH))?;
        let correlation_id = cursor.read_i64()?;
        let timestamp = cursor.read_i64()?;
        cursor.skip(block - usize::from(Self::BLOCK_LENGTH))?;
        Ok(Self { correlation_id, timestamp })
    }

    /// Append the encoded body to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.correlation_id.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
    }
}

/// Cluster lifecycle action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAction {
    /// Commit timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// The requested action.
    pub action: ClusterAction,
}

impl ServiceAction {
    /// Size of the fixed-layout body this codec understands.
    pub const BLOCK_LENGTH: u16 = 12;

    /// Decode the body that follows a [`ServiceAction`](TemplateId::ServiceAction) header.
    pub fn decode(cursor: &mut Cursor<'_>, block_length: u16, _version: u16) -> Result<Self> {
        let block =
            check_block(TemplateId::ServiceAction, cursor, block_length, usize::from(Self::BLOCK_LENGTH))?;
        let timestamp = cursor.read_i64()?;
        let action = ClusterAction::from_i32(cursor.read_i32()?)?;
        cursor.skip(block - usize::from(Self::BLOCK_LENGTH))?;
        Ok(Self { timestamp, action })
    }

    /// Append the encoded body to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.action.as_i32().to_le_bytes());
    }
}

/// A decoded record: the tagged union over every known body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// See [`SessionMessage`].
    SessionMessage(SessionMessage<'a>),
    /// See [`TimerEvent`].
    TimerEvent(TimerEvent),
    /// See [`SessionOpen`].
    SessionOpen(SessionOpen<'a>),
    /// See [`SessionClose`].
    SessionClose(SessionClose),
    /// See [`ServiceAction`].
    ServiceAction(ServiceAction),
}

impl<'a> Record<'a> {
    /// Template id this record is framed with.
    pub fn template_id(&self) -> TemplateId {
        match self {
            Self::SessionMessage(_) => TemplateId::SessionMessage,
            Self::TimerEvent(_) => TemplateId::TimerEvent,
            Self::SessionOpen(_) => TemplateId::SessionOpen,
            Self::SessionClose(_) => TemplateId::SessionClose,
            Self::ServiceAction(_) => TemplateId::ServiceAction,
        }
    }

    /// Block length this crate frames the record with.
    pub fn block_length(&self) -> u16 {
        match self {
            Self::SessionMessage(_) => SessionMessage::BLOCK_LENGTH,
            Self::TimerEvent(_) => TimerEvent::BLOCK_LENGTH,
            Self::SessionOpen(_) => SessionOpen::BLOCK_LENGTH,
            Self::SessionClose(_) => SessionClose::BLOCK_LENGTH,
            Self::ServiceAction(_) => ServiceAction::BLOCK_LENGTH,
        }
    }

    /// Decode the body for `template` from the cursor.
    pub fn decode_body(
        template: TemplateId,
        cursor: &mut Cursor<'a>,
        block_length: u16,
        version: u16,
    ) -> Result<Self> {
        Ok(match template {
            TemplateId::SessionMessage => {
                Self::SessionMessage(SessionMessage::decode(cursor, block_length, version)?)
            }
            TemplateId::TimerEvent => {
                Self::TimerEvent(TimerEvent::decode(cursor, block_length, version)?)
            }
            TemplateId::SessionOpen => {
                Self::SessionOpen(SessionOpen::decode(cursor, block_length, version)?)
            }
            TemplateId::SessionClose => {
                Self::SessionClose(SessionClose::decode(cursor, block_length, version)?)
            }
            TemplateId::ServiceAction => {
                Self::ServiceAction(ServiceAction::decode(cursor, block_length, version)?)
            }
        })
    }

    /// Append the encoded body to `out`.
    pub fn encode_body_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::SessionMessage(r) => r.encode_into(out),
            Self::TimerEvent(r) => r.encode_into(out),
            Self::SessionOpen(r) => r.encode_into(out),
            Self::SessionClose(r) => r.encode_into(out),
            Self::ServiceAction(r) => r.encode_into(out),
        }
    }
}
