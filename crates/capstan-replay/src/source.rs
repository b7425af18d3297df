//! Fragment metadata and the pull-based transport trait.
//!
//! The transport owns delivery and reassembly: by the time a fragment
//! reaches this crate it contains exactly one complete framed record. This
//! crate only consumes fragments; it never asks the transport to retransmit
//! or block.

use std::ops::ControlFlow;

use bitflags::bitflags;

bitflags! {
    /// Transport framing flags carried in a fragment's positional metadata.
    ///
    /// A source only ever delivers whole records, so consumers normally see
    /// [`FragmentFlags::UNFRAGMENTED`]; the begin/end split is preserved for
    /// sinks that care how a large message travelled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FragmentFlags: u8 {
        /// First transport packet of the message.
        const BEGIN = 0b1000_0000;
        /// Last transport packet of the message.
        const END = 0b0100_0000;
    }
}

impl FragmentFlags {
    /// The message fit in a single transport packet.
    pub const UNFRAGMENTED: Self = Self::BEGIN.union(Self::END);
}

/// One transport-delivered chunk of the committed log.
///
/// The buffer is valid only for the duration of the handler call it is
/// passed to; anything that must outlive the call has to be copied.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    /// The framed record: header first, then the body.
    pub data: &'a [u8],
    /// Byte position of the frame within the committed log.
    pub position: u64,
    /// Transport framing flags.
    pub flags: FragmentFlags,
}

/// Pull-based supplier of log fragments.
///
/// `poll` hands up to `fragment_limit` fragments to the handler, in commit
/// order, and returns how many were delivered; it must never block. A
/// handler that returns [`ControlFlow::Break`] stops delivery for this poll;
/// the fragment it broke on still counts as delivered.
pub trait FragmentSource {
    /// Deliver up to `fragment_limit` fragments to `on_fragment`.
    fn poll(
        &mut self,
        on_fragment: &mut dyn FnMut(Fragment<'_>) -> ControlFlow<()>,
        fragment_limit: usize,
    ) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfragmented_is_begin_and_end() {
        assert!(FragmentFlags::UNFRAGMENTED.contains(FragmentFlags::BEGIN));
        assert!(FragmentFlags::UNFRAGMENTED.contains(FragmentFlags::END));
        assert_eq!(FragmentFlags::UNFRAGMENTED.bits(), 0b1100_0000);
    }
}
