//! Shared types used across Frameact modules
//!
//! Contains the action/script data model, per-step log entries, and the
//! run report handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of UI interaction a step performs.
///
/// Closed set: adding a new kind is a compile-time-checked exhaustive match
/// everywhere actions are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Invoke the element's activation behavior
    Click,
    /// Set the value of a text-input-capable control
    Type,
    /// Trigger a form's submission behavior
    Submit,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Click => write!(f, "click"),
            ActionKind::Type => write!(f, "type"),
            ActionKind::Submit => write!(f, "submit"),
        }
    }
}

/// One scripted UI interaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// What to do
    pub kind: ActionKind,
    /// Comma-separated ordered list of selector candidates, most specific
    /// first. The whole chain is one logical target description.
    pub selector: String,
    /// Text to enter; only meaningful for `Type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Action {
    /// Create a click action
    pub fn click(selector: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Click,
            selector: selector.into(),
            value: None,
        }
    }

    /// Create a type action
    pub fn type_text(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Type,
            selector: selector.into(),
            value: Some(value.into()),
        }
    }

    /// Create a submit action
    pub fn submit(selector: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Submit,
            selector: selector.into(),
            value: None,
        }
    }
}

/// Ordered action list, produced externally and consumed by one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    actions: Vec<Action>,
}

impl Script {
    /// Create a script from an ordered action list
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Number of steps in the script
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the script has no steps
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The ordered actions
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl From<Vec<Action>> for Script {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

/// Outcome of one attempted step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

/// One append-only record per attempted step, written exactly once, in
/// step order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based step index
    pub step: usize,
    /// What the step tried to do
    pub action: ActionKind,
    /// The untouched fallback chain the step targeted
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Record an attempted step with the given outcome
    pub fn record(step: usize, action: &Action, outcome: Outcome) -> Self {
        Self {
            step,
            action: action.kind,
            selector: action.selector.clone(),
            value: action.value.clone(),
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// Everything one run produced, returned by the sequencer on completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// One entry per attempted step, in step order
    pub entries: Vec<LogEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Steps that completed successfully
    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Success)
            .count()
    }

    /// Steps that failed
    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Failed)
            .count()
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
