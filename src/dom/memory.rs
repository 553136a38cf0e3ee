//! In-memory document implementation
//!
//! Backs the CLI demo, the listener collaborator, and every test. Elements
//! record what was done to them (clicks, submissions, value edits, emitted
//! notifications) and carry an inline-style channel matching the
//! snapshot/append/restore moves the highlight protocol makes.
//!
//! The query engine supports the selector subset real scripts use: `tag`,
//! `#id`, `.class`, `[attr="v"]`, `[attr*="v"]` and compounds of those.
//! Anything else (pseudo-classes, combinators) is rejected as syntactically
//! invalid, which the resolver must skip over.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::Result;
use crate::dom::element::{DocumentRoot, Element, SelectorError, StyleSnapshot};

/// One parsed simple selector
#[derive(Debug, Default, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

/// One `[...]` clause of a simple selector
#[derive(Debug, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    operator: AttributeOperator,
}

#[derive(Debug, PartialEq, Eq)]
enum AttributeOperator {
    /// `[name]`
    Present,
    /// `[name="value"]`
    Equals(String),
    /// `[name*="value"]`
    Contains(String),
}

impl SimpleSelector {
    fn parse(selector: &str) -> std::result::Result<Self, SelectorError> {
        let invalid = |reason: &str| SelectorError::new(selector, reason);

        if selector.is_empty() {
            return Err(invalid("empty selector"));
        }
        if selector.contains(char::is_whitespace) {
            return Err(invalid("combinators are not supported"));
        }
        if selector.contains(':') {
            return Err(invalid("pseudo-classes are not supported"));
        }

        let mut parsed = SimpleSelector::default();
        let mut chars = selector.chars().peekable();

        // Optional leading tag name
        let tag = take_identifier(&mut chars);
        if !tag.is_empty() {
            parsed.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(&c) = chars.peek() {
            match c {
                '#' => {
                    chars.next();
                    let id = take_identifier(&mut chars);
                    if id.is_empty() {
                        return Err(invalid("missing id after '#'"));
                    }
                    parsed.id = Some(id);
                }
                '.' => {
                    chars.next();
                    let class = take_identifier(&mut chars);
                    if class.is_empty() {
                        return Err(invalid("missing class after '.'"));
                    }
                    parsed.classes.push(class);
                }
                '[' => {
                    chars.next();
                    let mut clause = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        clause.push(c);
                    }
                    if !closed {
                        return Err(invalid("unclosed attribute clause"));
                    }
                    parsed.attributes.push(parse_attribute(&clause, selector)?);
                }
                _ => return Err(invalid("unexpected token")),
            }
        }

        Ok(parsed)
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        if let Some(ref tag) = self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.classes.contains(c)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (&attr.operator, element.attributes.get(&attr.name)) {
                (AttributeOperator::Present, present) => present.is_some(),
                (AttributeOperator::Equals(value), Some(actual)) => actual == value,
                (AttributeOperator::Contains(value), Some(actual)) => actual.contains(value),
                (_, None) => false,
            }
        })
    }
}

fn take_identifier(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn parse_attribute(
    clause: &str,
    selector: &str,
) -> std::result::Result<AttributeMatch, SelectorError> {
    let (name, operator) = if let Some((name, value)) = clause.split_once("*=") {
        (name, AttributeOperator::Contains(unquote(value).to_string()))
    } else if let Some((name, value)) = clause.split_once('=') {
        (name, AttributeOperator::Equals(unquote(value).to_string()))
    } else {
        (clause, AttributeOperator::Present)
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(SelectorError::new(selector, "bad attribute name"));
    }

    Ok(AttributeMatch {
        name: name.to_string(),
        operator,
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

/// Mutable per-element state, behind one lock
#[derive(Debug, Default)]
struct ElementState {
    value: String,
    css_text: String,
    clicks: u32,
    submissions: u32,
    events: Vec<String>,
}

/// An element of the in-memory document
#[derive(Debug)]
pub struct MemoryElement {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    state: Mutex<ElementState>,
}

impl MemoryElement {
    /// Create an element with the given tag name
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            state: Mutex::new(ElementState::default()),
        }
    }

    /// Set the element id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Current control value
    pub fn value(&self) -> String {
        self.state.lock().unwrap().value.clone()
    }

    /// Current inline style text
    pub fn css_text(&self) -> String {
        self.state.lock().unwrap().css_text.clone()
    }

    /// Times the element was activated
    pub fn clicks(&self) -> u32 {
        self.state.lock().unwrap().clicks
    }

    /// Times the form was submitted
    pub fn submissions(&self) -> u32 {
        self.state.lock().unwrap().submissions
    }

    /// Notifications emitted so far, in order
    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }
}

impl Element for MemoryElement {
    fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("{}#{}", self.tag, id),
            None => self.tag.clone(),
        }
    }

    fn activate(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        state.events.push("click".to_string());
        Ok(())
    }

    fn is_text_input(&self) -> bool {
        self.tag == "input" || self.tag == "textarea"
    }

    fn set_text(&self, value: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.value = value.to_string();
        state.events.push("input".to_string());
        state.events.push("change".to_string());
        Ok(())
    }

    fn is_form(&self) -> bool {
        self.tag == "form"
    }

    fn submit(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.submissions += 1;
        state.events.push("submit".to_string());
        Ok(())
    }

    fn style_snapshot(&self) -> StyleSnapshot {
        StyleSnapshot(self.state.lock().unwrap().css_text.clone())
    }

    fn apply_highlight(&self, css: &str) {
        self.state.lock().unwrap().css_text.push_str(css);
    }

    fn restore_style(&self, snapshot: &StyleSnapshot) {
        self.state.lock().unwrap().css_text = snapshot.0.clone();
    }
}

/// An in-memory document: a flat list of elements in document order
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Mutex<Vec<Arc<MemoryElement>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the document, returning its live handle
    pub fn adopt(&self, element: MemoryElement) -> Arc<MemoryElement> {
        let element = Arc::new(element);
        self.elements.lock().unwrap().push(element.clone());
        element
    }

    /// The demo login page: a login link, username/password inputs, a submit
    /// button, and the form itself.
    pub fn login_page() -> Arc<Self> {
        let document = Self::new();
        document.adopt(
            MemoryElement::new("a")
                .with_id("login")
                .with_class("login")
                .with_attr("href", "/login"),
        );
        document.adopt(
            MemoryElement::new("input")
                .with_id("user")
                .with_class("username")
                .with_attr("name", "username")
                .with_attr("type", "email"),
        );
        document.adopt(
            MemoryElement::new("input")
                .with_id("pass")
                .with_class("password")
                .with_attr("name", "password")
                .with_attr("type", "password"),
        );
        document.adopt(
            MemoryElement::new("button")
                .with_id("login-btn")
                .with_class("login-btn")
                .with_attr("type", "submit"),
        );
        document.adopt(MemoryElement::new("form").with_id("form"));
        Arc::new(document)
    }
}

impl DocumentRoot for MemoryDocument {
    fn query(
        &self,
        selector: &str,
    ) -> std::result::Result<Option<Arc<dyn Element>>, SelectorError> {
        let parsed = SimpleSelector::parse(selector.trim())?;
        let elements = self.elements.lock().unwrap();
        Ok(elements
            .iter()
            .find(|e| parsed.matches(e))
            .map(|e| e.clone() as Arc<dyn Element>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> MemoryDocument {
        let document = MemoryDocument::new();
        document.adopt(
            MemoryElement::new("a")
                .with_id("login")
                .with_class("nav")
                .with_attr("href", "/account/login"),
        );
        document.adopt(
            MemoryElement::new("input")
                .with_id("user")
                .with_class("field")
                .with_attr("type", "email")
                .with_attr("name", "username"),
        );
        document
    }

    #[test]
    fn queries_by_id_class_tag_and_attribute() {
        let document = page();
        assert!(document.query("#login").unwrap().is_some());
        assert!(document.query(".field").unwrap().is_some());
        assert!(document.query("input").unwrap().is_some());
        assert!(document.query("input[name=\"username\"]").unwrap().is_some());
        assert!(document.query("a[href*=\"login\"]").unwrap().is_some());
        assert!(document.query("input[type=\"email\"]").unwrap().is_some());
        assert!(document.query("#missing").unwrap().is_none());
        assert!(document.query("input[type=\"password\"]").unwrap().is_none());
    }

    #[test]
    fn compound_selectors_require_every_component() {
        let document = page();
        assert!(document.query("a#login.nav").unwrap().is_some());
        assert!(document.query("a#login.other").unwrap().is_none());
        assert!(document.query("input#login").unwrap().is_none());
    }

    #[test]
    fn rejects_unsupported_syntax() {
        let document = page();
        assert!(document.query("button:contains(\"Login\")").is_err());
        assert!(document.query("div > a").is_err());
        assert!(document.query("").is_err());
        assert!(document.query("#").is_err());
        assert!(document.query("[=x]").is_err());
    }

    #[test]
    fn first_match_in_document_order_wins() {
        let document = MemoryDocument::new();
        let first = document.adopt(MemoryElement::new("button").with_id("a"));
        document.adopt(MemoryElement::new("button").with_id("b"));

        let found = document.query("button").unwrap().unwrap();
        assert_eq!(found.describe(), first.describe());
    }

    #[test]
    fn set_text_records_value_and_notifications() {
        let document = MemoryDocument::new();
        let input = document.adopt(MemoryElement::new("input").with_id("user"));

        input.set_text("alice").unwrap();
        assert_eq!(input.value(), "alice");
        assert_eq!(input.events(), vec!["input", "change"]);
    }

    #[test]
    fn highlight_appends_and_restore_reverts() {
        let element = MemoryElement::new("button");
        let snapshot = element.style_snapshot();
        element.apply_highlight("border: 3px solid red;");
        assert!(element.css_text().contains("red"));

        element.restore_style(&snapshot);
        assert_eq!(element.css_text(), "");
    }
}
