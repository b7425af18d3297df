//! Deterministic in-memory harness for Capstan replay testing.
//!
//! An in-memory committed log implementing the fragment source contract and
//! a sink that records every callback as an owned event. Together they let
//! replay behavior be asserted end to end without any transport, with
//! reproducible results.

pub mod memory_log;
pub mod recording_sink;

pub use memory_log::MemoryLog;
pub use recording_sink::{RecordingSink, ReplayEvent};
