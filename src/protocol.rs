//! Messaging envelope shared with the listener collaborator
//!
//! This is the one bit-exact contract in the system: the JSON shape posted
//! across the frame boundary when the target document cannot be inspected
//! directly. The collaborator on the other side ignores anything that does
//! not carry the `AUTOMATION_ACTION` discriminator.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionKind};

/// Action names the collaborator recognizes on the wire.
///
/// Submit is deliberately absent: the collaborator has no submit handler,
/// so a submit can only travel over the direct channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireAction {
    Click,
    Type,
}

impl From<WireAction> for ActionKind {
    fn from(action: WireAction) -> Self {
        match action {
            WireAction::Click => ActionKind::Click,
            WireAction::Type => ActionKind::Type,
        }
    }
}

/// Message envelope posted into the frame.
///
/// Serializes as `{"type": "AUTOMATION_ACTION", "action": ..., "selector":
/// ..., "value": ..., "step": ...}`. Deserialization fails for any payload
/// lacking the discriminator, which is how unrecognized messages get dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Envelope {
    #[serde(rename = "AUTOMATION_ACTION")]
    Action(ActionMessage),
}

/// Payload of an `AUTOMATION_ACTION` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMessage {
    pub action: WireAction,
    /// The untouched comma-separated fallback chain
    pub selector: String,
    /// Present only for `type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// 1-based step index
    pub step: usize,
}

impl ActionMessage {
    /// Serialize an action for the wire. Returns `None` for kinds the
    /// collaborator protocol does not carry.
    pub fn from_action(action: &Action, step: usize) -> Option<Self> {
        let wire = match action.kind {
            ActionKind::Click => WireAction::Click,
            ActionKind::Type => WireAction::Type,
            ActionKind::Submit => return None,
        };

        Some(Self {
            action: wire,
            selector: action.selector.clone(),
            value: match action.kind {
                ActionKind::Type => action.value.clone(),
                _ => None,
            },
            step,
        })
    }
}

/// Parse an incoming message. `None` means the payload is not a recognized
/// action envelope and must be ignored.
pub fn parse(message: &serde_json::Value) -> Option<ActionMessage> {
    match serde_json::from_value::<Envelope>(message.clone()) {
        Ok(Envelope::Action(action)) => Some(action),
        Err(_) => None,
    }
}
