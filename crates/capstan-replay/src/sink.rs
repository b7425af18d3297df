//! The typed callback surface of the downstream state machine.

use capstan_codec::{CloseReason, ClusterAction};

use crate::source::Fragment;

/// Receiver of decoded log records, one method per record kind.
///
/// The dispatcher calls each method synchronously, at most once per decoded
/// record, in commit order; no call overlaps another. Borrowed arguments
/// (`payload`, `response_channel`, the fragment buffer) are views into the
/// transport's buffer and are valid only until the method returns: an
/// implementation that needs them afterwards must copy them before
/// returning.
pub trait ReplaySink {
    /// An application message committed on a client session.
    ///
    /// `fragment` carries the positional metadata of the frame the message
    /// arrived in, for sinks that track log positions.
    fn on_session_message(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        payload: &[u8],
        fragment: &Fragment<'_>,
    );

    /// A cluster timer fired.
    fn on_timer_event(&mut self, correlation_id: i64, timestamp: i64);

    /// A client session was accepted into the cluster.
    fn on_session_open(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        response_stream_id: i32,
        response_channel: &str,
    );

    /// A client session left the cluster.
    fn on_session_close(
        &mut self,
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        close_reason: CloseReason,
    );

    /// A service requested a cluster lifecycle action.
    fn on_service_action(&mut self, timestamp: i64, action: ClusterAction);
}
