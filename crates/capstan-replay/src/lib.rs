//! Replay dispatch for the Capstan cluster log.
//!
//! Pure dispatch logic, completely decoupled from I/O. The committed log
//! reaches this crate through the [`FragmentSource`] trait, and decoded
//! records leave it through the [`ReplaySink`] trait; the crate itself never
//! touches a socket, a file, or a clock.
//!
//! # Architecture
//!
//! A duty-cycle thread owns a [`LogDispatcher`] and repeatedly calls
//! [`LogDispatcher::poll`], supplying the source and sink explicitly on every
//! call. Each poll drains at most a configured number of fragments, decodes
//! each one, and invokes exactly one sink callback per record, synchronously
//! and in commit order. Replaying the log from the start through the same
//! sink reconstructs the downstream state machine deterministically.
//!
//! Keeping the collaborators as call parameters rather than stored fields
//! keeps the dispatcher a plain value: trivial to construct in tests, no
//! lifetime coupling to the transport, and the same code runs against a
//! production subscription or an in-memory log.
//!
//! # Components
//!
//! - [`source`]: fragment metadata and the pull-based transport trait
//! - [`sink`]: the typed callback surface of the downstream state machine
//! - [`dispatcher`]: header decode, template lookup, body decode, dispatch
//! - [`error`]: replay error types with fragment position context

pub mod dispatcher;
pub mod error;
pub mod sink;
pub mod source;

pub use dispatcher::{LogDispatcher, ReplayConfig};
pub use error::ReplayError;
pub use sink::ReplaySink;
pub use source::{Fragment, FragmentFlags, FragmentSource};
