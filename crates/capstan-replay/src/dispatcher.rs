//! Header decode, template lookup, body decode, dispatch.
//!
//! [`LogDispatcher`] is the bridge between the committed log and the state
//! machine replaying it: each poll pulls a bounded batch of fragments from
//! the source and turns every fragment into exactly one sink callback, in
//! commit order. There is no buffering and no reordering; the only state the
//! dispatcher keeps across polls is its configuration and a counter of
//! skipped unknown records.

use std::ops::ControlFlow;

use capstan_codec::{
    Cursor, FrameHeader, ServiceAction, SessionClose, SessionMessage, SessionOpen, TemplateId,
    TimerEvent,
};
use tracing::trace;

use crate::error::ReplayError;
use crate::sink::ReplaySink;
use crate::source::{Fragment, FragmentSource};

/// Tuning for the replay duty cycle.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Most fragments one [`LogDispatcher::poll`] call will process. Bounds
    /// the tail latency of the owning duty-cycle loop.
    pub fragment_limit: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { fragment_limit: 10 }
    }
}

/// Decodes framed log fragments and dispatches them to a [`ReplaySink`].
///
/// The source and sink are supplied on every call rather than stored, so the
/// same dispatcher value drives a production subscription and an in-memory
/// log alike. Single-threaded by construction: nothing here is shared, and
/// `poll` never blocks.
#[derive(Debug, Default)]
pub struct LogDispatcher {
    config: ReplayConfig,
    unknown_skipped: u64,
}

impl LogDispatcher {
    /// Dispatcher with the given configuration.
    pub fn new(config: ReplayConfig) -> Self {
        Self { config, unknown_skipped: 0 }
    }

    /// The configuration this dispatcher runs with.
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// How many fragments were skipped because their template id was outside
    /// the known set.
    ///
    /// Skipping is the intended rolling-upgrade behavior, so it is not an
    /// error; the counter exists to make unexpected unknown records
    /// diagnosable.
    pub fn unknown_skipped(&self) -> u64 {
        self.unknown_skipped
    }

    /// Run one duty-cycle tick of log replay.
    ///
    /// Pulls at most `fragment_limit` fragments from `source` and dispatches
    /// each to `sink`, synchronously and in delivery order. Returns the
    /// number of fragments processed, zero when the source is idle.
    ///
    /// # Errors
    ///
    /// A fragment that fails to decode aborts the tick: fragments already
    /// dispatched stay dispatched, the rest of the batch is not consumed,
    /// and the error surfaces with its log position attached.
    pub fn poll<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<usize, ReplayError>
    where
        S: FragmentSource + ?Sized,
        K: ReplaySink + ?Sized,
    {
        let limit = self.config.fragment_limit;
        let mut failure = None;

        let processed = source.poll(
            &mut |fragment| match self.dispatch(&fragment, sink) {
                Ok(()) => ControlFlow::Continue(()),
                Err(err) => {
                    failure = Some(err);
                    ControlFlow::Break(())
                }
            },
            limit,
        );

        match failure {
            Some(err) => Err(err),
            None => Ok(processed),
        }
    }

    /// Decode one fragment and invoke the matching sink callback.
    fn dispatch<K>(&mut self, fragment: &Fragment<'_>, sink: &mut K) -> Result<(), ReplayError>
    where
        K: ReplaySink + ?Sized,
    {
        let mut cursor = Cursor::new(fragment.data);
        let header = FrameHeader::decode(&mut cursor)
            .map_err(|source| ReplayError::Header { position: fragment.position, source })?;

        let Some(template) = TemplateId::from_u16(header.template_id()) else {
            // A newer producer emitted a record kind we do not know. Skip it
            // so rolling upgrades keep replaying; the counter and trace are
            // the only observable effects.
            self.unknown_skipped += 1;
            trace!(
                template_id = header.template_id(),
                position = fragment.position,
                "skipping record with unknown template id"
            );
            return Ok(());
        };

        let block_length = header.block_length();
        let version = header.version();
        let body = |source| ReplayError::Body {
            template_id: template.as_u16(),
            position: fragment.position,
            source,
        };

        match template {
            TemplateId::SessionMessage => {
                let msg = SessionMessage::decode(&mut cursor, block_length, version).map_err(body)?;
                sink.on_session_message(
                    msg.correlation_id,
                    msg.cluster_session_id,
                    msg.timestamp,
                    msg.payload,
                    fragment,
                );
            }
            TemplateId::TimerEvent => {
                let timer = TimerEvent::decode(&mut cursor, block_length, version).map_err(body)?;
                sink.on_timer_event(timer.correlation_id, timer.timestamp);
            }
            TemplateId::SessionOpen => {
                let open = SessionOpen::decode(&mut cursor, block_length, version).map_err(body)?;
                sink.on_session_open(
                    open.correlation_id,
                    open.cluster_session_id,
                    open.timestamp,
                    open.response_stream_id,
                    open.response_channel,
                );
            }
            TemplateId::SessionClose => {
                let close = SessionClose::decode(&mut cursor, block_length, version).map_err(body)?;
                sink.on_session_close(
                    close.correlation_id,
                    close.cluster_session_id,
                    close.timestamp,
                    close.close_reason,
                );
            }
            TemplateId::ServiceAction => {
                let action = ServiceAction::decode(&mut cursor, block_length, version).map_err(body)?;
                sink.on_service_action(action.timestamp, action.action);
            }
        }

        Ok(())
    }
}
