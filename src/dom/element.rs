//! Element and document traits
//!
//! `DocumentRoot` is the "document-like queryable root" the resolver works
//! against; `Element` is the live handle one resolved step holds on to.

use std::sync::Arc;

use thiserror::Error;

use crate::core::Result;

/// A selector the query engine cannot parse. The resolver treats this as
/// "no match for this candidate", never as a fatal error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

impl SelectorError {
    pub fn new(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Opaque pre-highlight visual state of an element, captured before the
/// highlight is applied and used for restoration afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSnapshot(pub(crate) String);

/// A live handle to a concrete UI element.
pub trait Element: Send + Sync {
    /// Short human-readable description, e.g. `input#username`
    fn describe(&self) -> String;

    /// Invoke the element's activation behavior
    fn activate(&self) -> Result<()>;

    /// Whether the element is a text-input-capable control
    fn is_text_input(&self) -> bool;

    /// Set the control's value and notify `input`/`change` listeners bound
    /// to the embedded page's own logic. Callers check `is_text_input` first.
    fn set_text(&self, value: &str) -> Result<()>;

    /// Whether the element is a form
    fn is_form(&self) -> bool;

    /// Trigger the form's submission behavior
    fn submit(&self) -> Result<()>;

    /// Capture the current visual style state
    fn style_snapshot(&self) -> StyleSnapshot;

    /// Apply a highlight treatment on top of the current style
    fn apply_highlight(&self, css: &str);

    /// Restore the style captured by `style_snapshot`
    fn restore_style(&self, snapshot: &StyleSnapshot);
}

/// A queryable document root.
pub trait DocumentRoot: Send + Sync + std::fmt::Debug {
    /// Find the first element matching `selector`, in document order.
    ///
    /// `Ok(None)` means the selector is valid but nothing matches;
    /// `Err` means the selector itself is invalid for this query engine.
    fn query(
        &self,
        selector: &str,
    ) -> std::result::Result<Option<Arc<dyn Element>>, SelectorError>;
}
