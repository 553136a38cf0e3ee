//! Listener collaborator - the receiving side of the messaging channel
//!
//! Runs inside the target document's own context. On a recognized action
//! envelope it independently repeats what the direct channel would have
//! done: the same fallback-chain resolution and the same
//! highlight/act/restore protocol, against its local document. It never
//! replies; the sender side has no way to observe the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::core::{ActionKind, Config};
use crate::dom::{DocumentRoot, MessageSink};
use crate::engine::performer::ActionPerformer;
use crate::engine::resolver;
use crate::protocol;

/// Reference implementation of the collaborator contract
pub struct DocumentListener {
    document: Arc<dyn DocumentRoot>,
    performer: ActionPerformer,
}

impl DocumentListener {
    pub fn new(document: Arc<dyn DocumentRoot>, config: &Config) -> Self {
        Self {
            document,
            performer: ActionPerformer::new(config),
        }
    }

    /// Handle one incoming message. Payloads without the recognized
    /// envelope are dropped silently; so is every failure, because there is
    /// no reply path.
    pub async fn on_message(&self, message: serde_json::Value) {
        let Some(incoming) = protocol::parse(&message) else {
            debug!("ignoring message without the action discriminator");
            return;
        };

        debug!(
            step = incoming.step,
            selector = %incoming.selector,
            "collaborator handling dispatched action"
        );

        let Some(element) = resolver::resolve(&incoming.selector, self.document.as_ref()) else {
            debug!(selector = %incoming.selector, "no element for dispatched action");
            return;
        };

        let kind: ActionKind = incoming.action.into();
        if let Err(error) = self
            .performer
            .perform(kind, &element, incoming.value.as_deref())
            .await
        {
            debug!(%error, "dispatched action failed on the collaborator side");
        }
    }
}

#[async_trait]
impl MessageSink for DocumentListener {
    async fn deliver(&self, message: serde_json::Value) {
        self.on_message(message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, MemoryElement};

    fn listener_over(document: Arc<MemoryDocument>) -> DocumentListener {
        DocumentListener::new(document, &Config::immediate())
    }

    fn click_message(selector: &str, step: usize) -> serde_json::Value {
        serde_json::json!({
            "type": "AUTOMATION_ACTION",
            "action": "click",
            "selector": selector,
            "step": step,
        })
    }

    #[tokio::test]
    async fn performs_a_dispatched_click_locally() {
        let document = Arc::new(MemoryDocument::new());
        let button = document.adopt(MemoryElement::new("button").with_id("go"));

        listener_over(document)
            .on_message(click_message("#missing, #go", 1))
            .await;

        assert_eq!(button.clicks(), 1);
        // Highlight was applied and fully restored
        assert_eq!(button.css_text(), "");
    }

    #[tokio::test]
    async fn performs_a_dispatched_type_with_notifications() {
        let document = Arc::new(MemoryDocument::new());
        let input = document.adopt(MemoryElement::new("input").with_id("user"));

        listener_over(document)
            .on_message(serde_json::json!({
                "type": "AUTOMATION_ACTION",
                "action": "type",
                "selector": "#user",
                "value": "alice",
                "step": 2,
            }))
            .await;

        assert_eq!(input.value(), "alice");
        assert_eq!(input.events(), vec!["input", "change"]);
    }

    #[tokio::test]
    async fn ignores_messages_without_the_discriminator() {
        let document = Arc::new(MemoryDocument::new());
        let button = document.adopt(MemoryElement::new("button").with_id("go"));

        listener_over(document)
            .on_message(serde_json::json!({"action": "click", "selector": "#go"}))
            .await;

        assert_eq!(button.clicks(), 0);
    }

    #[tokio::test]
    async fn unresolved_chains_are_dropped_without_a_reply() {
        let document = Arc::new(MemoryDocument::new());
        // Nothing to resolve; the call just returns
        listener_over(document)
            .on_message(click_message("#nowhere", 3))
            .await;
    }
}
