//! Frame handles - the boundary between the engine and the target document
//!
//! A `Frame` hosts the target document. Whether the document can be
//! inspected directly depends on the security context: same-origin frames
//! hand out their document, cross-origin frames deny inspection and only
//! accept posted messages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::core::{FrameactError, Result};
use crate::dom::element::DocumentRoot;

/// A reference to the frame hosting the target document.
#[async_trait]
pub trait Frame: Send + Sync {
    /// Attempt direct access to the hosted document. Fails with a
    /// permission fault across an origin boundary.
    async fn document(&self) -> Result<Arc<dyn DocumentRoot>>;

    /// Post a message into the frame, fire-and-forget. The sender learns
    /// nothing about whether anyone handled it.
    async fn post_message(&self, message: serde_json::Value) -> Result<()>;
}

/// Receiver side of the messaging channel, attached to a frame.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Handle one posted message. There is no reply path.
    async fn deliver(&self, message: serde_json::Value);
}

/// A frame whose document shares the host page's origin: direct inspection
/// is allowed.
pub struct SameOriginFrame {
    document: Arc<dyn DocumentRoot>,
    sink: Option<Arc<dyn MessageSink>>,
}

impl SameOriginFrame {
    pub fn new(document: Arc<dyn DocumentRoot>) -> Self {
        Self {
            document,
            sink: None,
        }
    }

    /// Attach a message listener; same-origin documents can still receive
    /// posted messages.
    pub fn with_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

#[async_trait]
impl Frame for SameOriginFrame {
    async fn document(&self) -> Result<Arc<dyn DocumentRoot>> {
        Ok(self.document.clone())
    }

    async fn post_message(&self, message: serde_json::Value) -> Result<()> {
        match &self.sink {
            Some(sink) => {
                let sink = sink.clone();
                tokio::spawn(async move { sink.deliver(message).await });
            }
            // A message nobody listens for just vanishes
            None => debug!("message posted to a frame with no listener"),
        }
        Ok(())
    }
}

/// A frame across an origin boundary: inspection is denied, messages are
/// delivered to whatever listener runs inside the document.
pub struct CrossOriginFrame {
    origin: String,
    sink: Arc<dyn MessageSink>,
}

impl CrossOriginFrame {
    pub fn new(origin: impl Into<String>, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            origin: origin.into(),
            sink,
        }
    }
}

#[async_trait]
impl Frame for CrossOriginFrame {
    async fn document(&self) -> Result<Arc<dyn DocumentRoot>> {
        Err(FrameactError::permission(format!(
            "cross-origin frame {}",
            self.origin
        )))
    }

    async fn post_message(&self, message: serde_json::Value) -> Result<()> {
        let sink = self.sink.clone();
        // Fire-and-forget: the listener runs on its own, nothing is awaited
        tokio::spawn(async move { sink.deliver(message).await });
        Ok(())
    }
}

/// Build a frame for a document hosted at `document_url`, as seen from a
/// page at `host_url`. Origin equality decides which side of the boundary
/// the engine lands on; the listener is only consulted for messages.
pub fn embed(
    host_url: &Url,
    document_url: &Url,
    document: Arc<dyn DocumentRoot>,
    listener: Arc<dyn MessageSink>,
) -> Arc<dyn Frame> {
    if host_url.origin() == document_url.origin() {
        debug!(%host_url, %document_url, "embedding same-origin frame");
        Arc::new(SameOriginFrame::new(document).with_sink(listener))
    } else {
        debug!(%host_url, %document_url, "embedding cross-origin frame");
        Arc::new(CrossOriginFrame::new(
            document_url.origin().ascii_serialization(),
            listener,
        ))
    }
}
