//! Selector resolution with candidate fallback
//!
//! A target description is a comma-separated chain of selector candidates.
//! Candidates are tried in order; the first match wins, and order in the
//! chain encodes priority. A candidate the query engine rejects as invalid
//! counts as "no match", not as an error, so chains written for richer
//! query engines degrade gracefully.

use std::sync::Arc;

use tracing::debug;

use crate::dom::{DocumentRoot, Element};

/// Split a target description into its candidate selectors, in priority
/// order, dropping empty entries.
pub fn candidates(target_spec: &str) -> impl Iterator<Item = &str> {
    target_spec
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolve a target description against a document root.
///
/// Returns the element matched by the first resolving candidate, or `None`
/// when the whole chain is exhausted. "Not found" is a normal outcome here;
/// the caller decides it means a failed step.
pub fn resolve(target_spec: &str, scope: &dyn DocumentRoot) -> Option<Arc<dyn Element>> {
    for candidate in candidates(target_spec) {
        match scope.query(candidate) {
            Ok(Some(element)) => {
                debug!(candidate, element = %element.describe(), "candidate resolved");
                return Some(element);
            }
            Ok(None) => {
                debug!(candidate, "candidate matched nothing");
            }
            Err(error) => {
                // Invalid for this query engine; try the next candidate
                debug!(candidate, %error, "candidate rejected by query engine");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, MemoryElement};

    #[test]
    fn splits_and_trims_candidates() {
        let chain = "#login, .login , button[type=\"submit\"],,";
        let parts: Vec<&str> = candidates(chain).collect();
        assert_eq!(parts, vec!["#login", ".login", "button[type=\"submit\"]"]);
    }

    #[test]
    fn falls_back_past_missing_candidates() {
        let document = MemoryDocument::new();
        document.adopt(MemoryElement::new("div").with_class("present"));

        let element = resolve("#missing, .present", &document).unwrap();
        assert_eq!(element.describe(), "div");
    }

    #[test]
    fn first_listed_candidate_wins() {
        let document = MemoryDocument::new();
        document.adopt(MemoryElement::new("a").with_id("first"));
        document.adopt(MemoryElement::new("a").with_id("second"));

        let element = resolve("#first, #second", &document).unwrap();
        assert_eq!(element.describe(), "a#first");

        let element = resolve("#second, #first", &document).unwrap();
        assert_eq!(element.describe(), "a#second");
    }

    #[test]
    fn invalid_candidates_are_skipped_not_fatal() {
        let document = MemoryDocument::new();
        document.adopt(MemoryElement::new("button").with_id("login-btn"));

        let chain = "button:contains(\"Login\"), #login-btn";
        let element = resolve(chain, &document).unwrap();
        assert_eq!(element.describe(), "button#login-btn");
    }

    #[test]
    fn exhausted_chain_is_none() {
        let document = MemoryDocument::new();
        assert!(resolve("#a, .b, c", &document).is_none());
        assert!(resolve("", &document).is_none());
    }
}
