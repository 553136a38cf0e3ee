//! Context bridge - channel selection across the frame boundary
//!
//! The target document is reached either directly (same security context)
//! or by posting messages to a listener collaborator inside the frame. The
//! boundary is probed before every step, because a navigation inside the
//! frame can change reachability mid-run.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{Action, FrameactError, Result};
use crate::engine::performer::ActionPerformer;
use crate::engine::resolver;
use crate::protocol::{ActionMessage, Envelope};
use crate::dom::Frame;

/// Result of a capability probe against the frame boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// Direct inspection succeeded
    Reachable,
    /// Direct inspection was denied by the boundary
    Unreachable,
    /// The boundary has not been tried yet
    Unknown,
}

/// Execution channel for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Resolve and act against the live document in-process
    Direct,
    /// Serialize the action and post it to the frame
    Messaging,
}

impl Channel {
    /// Pure mapping from a probe result to the channel to use. An untried
    /// boundary gets the messaging path, which works on both sides.
    pub fn for_reachability(reachability: Reachability) -> Channel {
        match reachability {
            Reachability::Reachable => Channel::Direct,
            Reachability::Unreachable | Reachability::Unknown => Channel::Messaging,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Direct => write!(f, "direct"),
            Channel::Messaging => write!(f, "messaging"),
        }
    }
}

/// Bridges the engine to the frame hosting the target document
pub struct ContextBridge {
    frame: Arc<dyn Frame>,
    performer: ActionPerformer,
    reachability: Reachability,
}

impl ContextBridge {
    pub fn new(frame: Arc<dyn Frame>, performer: ActionPerformer) -> Self {
        Self {
            frame,
            performer,
            reachability: Reachability::Unknown,
        }
    }

    /// The result of the last probe, `Unknown` before the first
    pub fn reachability(&self) -> Reachability {
        self.reachability
    }

    /// Probe whether the document is directly inspectable right now.
    /// Permission faults are recovered here and never surface further up.
    pub async fn probe(&mut self) -> Reachability {
        self.reachability = match self.frame.document().await {
            Ok(_) => Reachability::Reachable,
            Err(error) => {
                debug!(%error, "direct inspection unavailable, messaging fallback");
                Reachability::Unreachable
            }
        };
        self.reachability
    }

    /// Execute one step over whichever channel the boundary allows,
    /// returning the channel that was used.
    pub async fn execute_step(&mut self, action: &Action, step: usize) -> Result<Channel> {
        let channel = Channel::for_reachability(self.probe().await);
        match channel {
            Channel::Direct => self.resolve_and_act(action).await?,
            Channel::Messaging => self.dispatch(action, step).await?,
        }
        Ok(channel)
    }

    /// Direct channel: resolve against the live document, act locally
    pub async fn resolve_and_act(&self, action: &Action) -> Result<()> {
        let document = self.frame.document().await?;
        let element = resolver::resolve(&action.selector, document.as_ref())
            .ok_or_else(|| FrameactError::resolution(action.selector.clone()))?;

        self.performer
            .perform(action.kind, &element, action.value.as_deref())
            .await
    }

    /// Messaging channel: serialize the action into the envelope and post
    /// it. Fire-and-forget; whether the collaborator found the element or
    /// performed the action is not observable from here, so a posted step
    /// counts as dispatched unless the post itself fails.
    pub async fn dispatch(&self, action: &Action, step: usize) -> Result<()> {
        let message = ActionMessage::from_action(action, step).ok_or_else(|| {
            FrameactError::dispatch(format!(
                "{} is not part of the collaborator protocol",
                action.kind
            ))
        })?;

        let payload = serde_json::to_value(Envelope::Action(message))?;
        self.frame.post_message(payload).await?;
        info!(step, selector = %action.selector, "action dispatched to frame");
        Ok(())
    }
}
