//! Frameact - Cross-Context UI Action Execution Engine
//!
//! Drives ordered click/type/submit scripts against elements of an
//! embedded, possibly cross-origin, document, without assuming control over
//! that document's code.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Dom**: Document/element abstraction, frames, in-memory implementation
//! - **Engine**: Selector resolution, channel bridging, the action
//!   performer, and the sequencer
//! - **Listener**: Reference collaborator for the messaging channel
//! - **Protocol**: The bit-exact envelope posted across the frame boundary
//! - **Script**: Stub prompt translator and run summarizer
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use frameact::{
//!     ActionPerformer, Config, ContextBridge, MemoryDocument, SameOriginFrame, Sequencer,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let document = MemoryDocument::login_page();
//!     let frame = Arc::new(SameOriginFrame::new(document));
//!     let bridge = ContextBridge::new(frame, ActionPerformer::new(&config));
//!     let mut sequencer = Sequencer::new(bridge, &config);
//!
//!     let report = sequencer.run(frameact::translate("click on login")).await;
//!     println!("{} steps attempted", report.entries.len());
//! }
//! ```

pub mod core;
pub mod dom;
pub mod engine;
pub mod listener;
pub mod protocol;
pub mod script;

// Re-export commonly used items
pub use crate::core::{
    Action, ActionKind, Config, FrameactError, LogEntry, Outcome, Result, RunReport, Script,
};
pub use dom::{
    embed, CrossOriginFrame, DocumentRoot, Element, Frame, MemoryDocument, MemoryElement,
    MessageSink, SameOriginFrame,
};
pub use engine::{
    AbortHandle, ActionPerformer, Channel, ContextBridge, Reachability, RunEvent, RunState,
    Sequencer,
};
pub use listener::DocumentListener;
pub use script::{translate, RunSummary};
