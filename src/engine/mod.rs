//! Engine module - the cross-context action execution core
//!
//! Resolution of ambiguous selector chains, channel selection across the
//! frame boundary, the highlight/act/restore performer, and the sequencer
//! that drives a script one step at a time.

pub mod bridge;
pub mod performer;
pub mod resolver;
pub mod sequencer;

pub use bridge::{Channel, ContextBridge, Reachability};
pub use performer::ActionPerformer;
pub use sequencer::{AbortHandle, RunEvent, RunState, Sequencer};
