//! Sink that records every callback as an owned event.

use capstan_codec::{CloseReason, ClusterAction};
use capstan_replay::{Fragment, ReplaySink};

/// One sink callback, captured with owned copies of every field.
///
/// The dispatcher hands out payload and channel views that die with the
/// callback, so the sink copies them into `Vec<u8>`/`String` here. That copy
/// is the correct behavior for any sink that retains data, not a
/// test-only workaround.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    /// `on_session_message` fired.
    SessionMessage {
        /// Correlation of the message.
        correlation_id: i64,
        /// Session the message arrived on.
        cluster_session_id: i64,
        /// Commit timestamp.
        timestamp: i64,
        /// Copied payload bytes.
        payload: Vec<u8>,
        /// Log position of the carrying fragment.
        position: u64,
    },
    /// `on_timer_event` fired.
    TimerEvent {
        /// Correlation the timer was scheduled with.
        correlation_id: i64,
        /// Expiry timestamp.
        timestamp: i64,
    },
    /// `on_session_open` fired.
    SessionOpen {
        /// Correlation of the connect request.
        correlation_id: i64,
        /// Newly assigned session.
        cluster_session_id: i64,
        /// Commit timestamp.
        timestamp: i64,
        /// Response stream id.
        response_stream_id: i32,
        /// Copied response channel URI.
        response_channel: String,
    },
    /// `on_session_close` fired.
    SessionClose {
        /// Correlation of the close request.
        correlation_id: i64,
        /// The session that closed.
        cluster_session_id: i64,
        /// Commit timestamp.
        timestamp: i64,
        /// Why the session closed.
        close_reason: CloseReason,
    },
    /// `on_service_action` fired.
    ServiceAction {
        /// Commit timestamp.
        timestamp: i64,
        /// The requested action.
        action: ClusterAction,
    },
}

/// A [`ReplaySink`] that appends every callback to an owned event list.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<ReplayEvent>,
}

impl RecordingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, in callback order.
    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    /// Number of callbacks recorded.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no callback has fired yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the sink, returning the recorded events.
    pub fn into_events(self) -> Vec<ReplayEvent> {
        self.events
    }
}

impl ReplaySink for RecordingSink {
    fn on_session_message(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        payload: &[u8],
        fragment: &Fragment<'_>,
    ) {
        self.events.push(ReplayEvent::SessionMessage {
            correlation_id,
            cluster_session_id,
            timestamp,
            payload: payload.to_vec(),
            position: fragment.position,
        });
    }

    fn on_timer_event(&mut self, correlation_id: i64, timestamp: i64) {
        self.events.push(ReplayEvent::TimerEvent { correlation_id, timestamp });
    }

    fn on_session_open(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        response_stream_id: i32,
        response_channel: &str,
    ) {
        self.events.push(ReplayEvent::SessionOpen {
            correlation_id,
            cluster_session_id,
            timestamp,
            response_stream_id,
            response_channel: response_channel.to_owned(),
        });
    }

    fn on_session_close(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        close_reason: CloseReason,
    ) {
        self.events.push(ReplayEvent::SessionClose {
            correlation_id,
            cluster_session_id,
            timestamp,
            close_reason,
        });
    }

    fn on_service_action(&mut self, timestamp: i64, action: ClusterAction) {
        self.events.push(ReplayEvent::ServiceAction { timestamp, action });
    }
}
