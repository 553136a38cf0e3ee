//! Action performer - executes one semantic action against an element
//!
//! Every action follows the same visible protocol: snapshot the element's
//! style, apply the highlight treatment, wait, act, wait, restore. The
//! restore leg runs on every exit path, so an observer always sees the
//! element return to its pre-step appearance.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::debug;

use crate::core::{ActionKind, Config, FrameactError, Result};
use crate::dom::{Element, StyleSnapshot};

/// Presentation overlay with guaranteed removal. Dropping an unreleased
/// overlay restores the element's style, covering panics and early returns.
struct Overlay<'a> {
    element: &'a dyn Element,
    snapshot: Option<StyleSnapshot>,
}

impl<'a> Overlay<'a> {
    fn apply(element: &'a dyn Element, css: &str) -> Self {
        let snapshot = element.style_snapshot();
        element.apply_highlight(css);
        Self {
            element,
            snapshot: Some(snapshot),
        }
    }

    fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.element.restore_style(&snapshot);
        }
    }
}

impl Drop for Overlay<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Executes single actions with the highlight/act/restore protocol
#[derive(Debug, Clone)]
pub struct ActionPerformer {
    highlight_css: String,
    highlight_delay: std::time::Duration,
    restore_delay: std::time::Duration,
}

impl ActionPerformer {
    pub fn new(config: &Config) -> Self {
        Self {
            highlight_css: config.highlight.css.clone(),
            highlight_delay: config.pacing.highlight(),
            restore_delay: config.pacing.restore(),
        }
    }

    /// Perform one action against a resolved element.
    ///
    /// An `Err` maps to a `Failed` log entry at the call site; the element's
    /// style is restored either way.
    pub async fn perform(
        &self,
        kind: ActionKind,
        element: &Arc<dyn Element>,
        value: Option<&str>,
    ) -> Result<()> {
        let overlay = Overlay::apply(element.as_ref(), &self.highlight_css);
        debug!(element = %element.describe(), %kind, "highlighted, waiting to act");
        sleep(self.highlight_delay).await;

        let result = self.execute(kind, element.as_ref(), value);

        sleep(self.restore_delay).await;
        overlay.release();
        debug!(element = %element.describe(), "style restored");

        result
    }

    fn execute(&self, kind: ActionKind, element: &dyn Element, value: Option<&str>) -> Result<()> {
        match kind {
            ActionKind::Click => element.activate(),
            ActionKind::Type => {
                if !element.is_text_input() {
                    return Err(FrameactError::incompatible(format!(
                        "cannot type into {}",
                        element.describe()
                    )));
                }
                element.set_text(value.unwrap_or_default())
            }
            ActionKind::Submit => {
                if !element.is_form() {
                    return Err(FrameactError::incompatible(format!(
                        "{} is not a form",
                        element.describe()
                    )));
                }
                element.submit()
            }
        }
    }
}
