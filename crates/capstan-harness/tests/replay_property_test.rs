//! Property tests for replay dispatch.
//!
//! Random sequences of mixed record kinds are committed to the in-memory
//! log and drained through the dispatcher under a random fragment budget.
//! Whatever the sequence and budget, the sink must observe one callback per
//! record, in commit order, with every field intact.

use capstan_codec::{
    CloseReason, ClusterAction, Record, ServiceAction, SessionClose, SessionMessage, SessionOpen,
    TimerEvent,
};
use capstan_harness::{MemoryLog, RecordingSink, ReplayEvent};
use capstan_replay::{LogDispatcher, ReplayConfig};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Owned form of a record, so proptest can generate and hold the data the
/// borrowed codec structs point into.
#[derive(Debug, Clone)]
enum OwnedRecord {
    Message { correlation_id: i64, cluster_session_id: i64, timestamp: i64, payload: Vec<u8> },
    Timer { correlation_id: i64, timestamp: i64 },
    Open {
        correlation_id: i64,
        cluster_session_id: i64,
        timestamp: i64,
        response_stream_id: i32,
        response_channel: String,
    },
    Close { correlation_id: i64, cluster_session_id: i64, timestamp: i64, close_reason: CloseReason },
    Action { timestamp: i64, action: ClusterAction },
}

impl OwnedRecord {
    fn as_record(&self) -> Record<'_> {
        match self {
            Self::Message { correlation_id, cluster_session_id, timestamp, payload } => {
                Record::SessionMessage(SessionMessage {
                    correlation_id: *correlation_id,
                    cluster_session_id: *cluster_session_id,
                    timestamp: *timestamp,
                    payload,
                })
            }
            Self::Timer { correlation_id, timestamp } => Record::TimerEvent(TimerEvent {
                correlation_id: *correlation_id,
                timestamp: *timestamp,
            }),
            Self::Open {
                correlation_id,
                cluster_session_id,
                timestamp,
                response_stream_id,
                response_channel,
            } => Record::SessionOpen(SessionOpen {
                correlation_id: *correlation_id,
                cluster_session_id: *cluster_session_id,
                timestamp: *timestamp,
                response_stream_id: *response_stream_id,
                response_channel,
            }),
            Self::Close { correlation_id, cluster_session_id, timestamp, close_reason } => {
                Record::SessionClose(SessionClose {
                    correlation_id: *correlation_id,
                    cluster_session_id: *cluster_session_id,
                    timestamp: *timestamp,
                    close_reason: *close_reason,
                })
            }
            Self::Action { timestamp, action } => {
                Record::ServiceAction(ServiceAction { timestamp: *timestamp, action: *action })
            }
        }
    }

    fn expected_event(&self, position: u64) -> ReplayEvent {
        match self {
            Self::Message { correlation_id, cluster_session_id, timestamp, payload } => {
                ReplayEvent::SessionMessage {
                    correlation_id: *correlation_id,
                    cluster_session_id: *cluster_session_id,
                    timestamp: *timestamp,
                    payload: payload.clone(),
                    position,
                }
            }
            Self::Timer { correlation_id, timestamp } => ReplayEvent::TimerEvent {
                correlation_id: *correlation_id,
                timestamp: *timestamp,
            },
            Self::Open {
                correlation_id,
                cluster_session_id,
                timestamp,
                response_stream_id,
                response_channel,
            } => ReplayEvent::SessionOpen {
                correlation_id: *correlation_id,
                cluster_session_id: *cluster_session_id,
                timestamp: *timestamp,
                response_stream_id: *response_stream_id,
                response_channel: response_channel.clone(),
            },
            Self::Close { correlation_id, cluster_session_id, timestamp, close_reason } => {
                ReplayEvent::SessionClose {
                    correlation_id: *correlation_id,
                    cluster_session_id: *cluster_session_id,
                    timestamp: *timestamp,
                    close_reason: *close_reason,
                }
            }
            Self::Action { timestamp, action } => {
                ReplayEvent::ServiceAction { timestamp: *timestamp, action: *action }
            }
        }
    }
}

fn close_reason_strategy() -> impl Strategy<Value = CloseReason> {
    prop_oneof![
        Just(CloseReason::ClientAction),
        Just(CloseReason::ServiceAction),
        Just(CloseReason::Timeout),
    ]
}

fn cluster_action_strategy() -> impl Strategy<Value = ClusterAction> {
    prop_oneof![
        Just(ClusterAction::Init),
        Just(ClusterAction::Snapshot),
        Just(ClusterAction::Shutdown),
        Just(ClusterAction::Abort),
    ]
}

fn record_strategy() -> impl Strategy<Value = OwnedRecord> {
    prop_oneof![
        // Session messages dominate a real log.
        4 => (
            any::<i64>(),
            any::<i64>(),
            any::<i64>(),
            prop::collection::vec(any::<u8>(), 0..64),
        )
            .prop_map(|(correlation_id, cluster_session_id, timestamp, payload)| {
                OwnedRecord::Message { correlation_id, cluster_session_id, timestamp, payload }
            }),
        2 => (any::<i64>(), any::<i64>()).prop_map(|(correlation_id, timestamp)| {
            OwnedRecord::Timer { correlation_id, timestamp }
        }),
        2 => (any::<i64>(), any::<i64>(), any::<i64>(), any::<i32>(), "[ -~]{0,40}").prop_map(
            |(correlation_id, cluster_session_id, timestamp, response_stream_id, response_channel)| {
                OwnedRecord::Open {
                    correlation_id,
                    cluster_session_id,
                    timestamp,
                    response_stream_id,
                    response_channel,
                }
            }
        ),
        2 => (any::<i64>(), any::<i64>(), any::<i64>(), close_reason_strategy()).prop_map(
            |(correlation_id, cluster_session_id, timestamp, close_reason)| {
                OwnedRecord::Close { correlation_id, cluster_session_id, timestamp, close_reason }
            }
        ),
        1 => (any::<i64>(), cluster_action_strategy()).prop_map(|(timestamp, action)| {
            OwnedRecord::Action { timestamp, action }
        }),
    ]
}

proptest! {
    /// One callback per committed record, in commit order, every field
    /// intact, whatever the fragment budget.
    #[test]
    fn prop_replay_preserves_order_and_fields(
        records in prop::collection::vec(record_strategy(), 0..24),
        fragment_limit in 1usize..8,
    ) {
        let mut log = MemoryLog::new();
        let mut expected = Vec::new();
        for record in &records {
            let position = log.append(&record.as_record());
            expected.push(record.expected_event(position));
        }

        let mut dispatcher = LogDispatcher::new(ReplayConfig { fragment_limit });
        let mut sink = RecordingSink::new();
        let mut total = 0;
        loop {
            let processed = dispatcher.poll(&mut log, &mut sink).map_err(|e| {
                TestCaseError::fail(format!("replay failed: {e}"))
            })?;
            if processed == 0 {
                break;
            }
            prop_assert!(processed <= fragment_limit);
            total += processed;
        }

        prop_assert_eq!(total, records.len());
        prop_assert_eq!(dispatcher.unknown_skipped(), 0);
        prop_assert_eq!(sink.into_events(), expected);
    }

    /// Positions reported to the sink are strictly increasing, matching
    /// commit order.
    #[test]
    fn prop_message_positions_strictly_increase(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..16),
    ) {
        let mut log = MemoryLog::new();
        for (i, payload) in payloads.iter().enumerate() {
            log.append(&Record::SessionMessage(SessionMessage {
                correlation_id: i as i64,
                cluster_session_id: 1,
                timestamp: 0,
                payload,
            }));
        }

        let mut dispatcher = LogDispatcher::new(ReplayConfig::default());
        let mut sink = RecordingSink::new();
        loop {
            let processed = dispatcher.poll(&mut log, &mut sink).map_err(|e| {
                TestCaseError::fail(format!("replay failed: {e}"))
            })?;
            if processed == 0 {
                break;
            }
        }

        let positions: Vec<u64> = sink
            .events()
            .iter()
            .map(|event| match event {
                ReplayEvent::SessionMessage { position, .. } => *position,
                other => panic!("unexpected event: {other:?}"),
            })
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
