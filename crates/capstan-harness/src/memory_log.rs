//! In-memory committed log.

use std::ops::ControlFlow;

use bytes::Bytes;
use capstan_codec::{encode_record, Record};
use capstan_replay::{Fragment, FragmentFlags, FragmentSource};
use tracing::trace;

/// A committed log held in memory, one frame per appended record.
///
/// Appends assign monotonically increasing byte positions, the way a real
/// log does. Polling delivers frames in append order from an advancing read
/// cursor; [`MemoryLog::rewind`] moves the cursor back to the start so the
/// same log can be replayed again.
#[derive(Debug, Default)]
pub struct MemoryLog {
    frames: Vec<StoredFrame>,
    next: usize,
    tail: u64,
}

#[derive(Debug)]
struct StoredFrame {
    bytes: Bytes,
    position: u64,
}

impl MemoryLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the byte position it was committed at.
    pub fn append(&mut self, record: &Record<'_>) -> u64 {
        self.append_raw(encode_record(record))
    }

    /// Append pre-encoded frame bytes verbatim.
    ///
    /// The bytes are not validated, so tests can commit truncated or
    /// unknown-template frames.
    pub fn append_raw(&mut self, frame: impl Into<Bytes>) -> u64 {
        let bytes = frame.into();
        let position = self.tail;
        self.tail += bytes.len() as u64;
        trace!(position, length = bytes.len(), "frame appended");
        self.frames.push(StoredFrame { bytes, position });
        position
    }

    /// Number of frames committed to the log.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the log holds no frames at all.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames committed but not yet delivered.
    pub fn undelivered(&self) -> usize {
        self.frames.len() - self.next
    }

    /// Move the read cursor back to the start of the log.
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

impl FragmentSource for MemoryLog {
    fn poll(
        &mut self,
        on_fragment: &mut dyn FnMut(Fragment<'_>) -> ControlFlow<()>,
        fragment_limit: usize,
    ) -> usize {
        let mut delivered = 0;
        while delivered < fragment_limit && self.next < self.frames.len() {
            let frame = &self.frames[self.next];
            let fragment = Fragment {
                data: &frame.bytes,
                position: frame.position,
                flags: FragmentFlags::UNFRAGMENTED,
            };
            self.next += 1;
            delivered += 1;
            if on_fragment(fragment).is_break() {
                break;
            }
        }
        delivered
    }
}
