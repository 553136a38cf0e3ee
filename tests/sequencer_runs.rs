//! End-to-end sequencer runs over the direct channel
//!
//! Exercises full scripts against an in-memory document: log cardinality
//! and ordering, fallback resolution, failure isolation, and the restore
//! invariant.

use std::sync::Arc;

use frameact::{
    Action, ActionPerformer, Config, ContextBridge, Element, MemoryDocument, MemoryElement,
    Outcome, SameOriginFrame, Script, Sequencer,
};

fn sequencer_over(document: Arc<MemoryDocument>) -> Sequencer {
    let config = Config::immediate();
    let frame = Arc::new(SameOriginFrame::new(document));
    let bridge = ContextBridge::new(frame, ActionPerformer::new(&config));
    Sequencer::new(bridge, &config)
}

fn login_script() -> Script {
    Script::new(vec![
        Action::click("#login"),
        Action::type_text("#user", "alice"),
        Action::type_text("#pass", "secret"),
        Action::submit("#form"),
    ])
}

#[tokio::test]
async fn login_script_succeeds_end_to_end() {
    let document = Arc::new(MemoryDocument::new());
    let link = document.adopt(MemoryElement::new("a").with_id("login"));
    let user = document.adopt(MemoryElement::new("input").with_id("user"));
    let pass = document.adopt(MemoryElement::new("input").with_id("pass"));
    let form = document.adopt(MemoryElement::new("form").with_id("form"));

    let mut sequencer = sequencer_over(document);
    let report = sequencer.run(login_script()).await;

    assert_eq!(report.entries.len(), 4);
    for (index, entry) in report.entries.iter().enumerate() {
        assert_eq!(entry.step, index + 1);
        assert_eq!(entry.outcome, Outcome::Success);
    }

    assert_eq!(link.clicks(), 1);
    assert_eq!(user.value(), "alice");
    assert_eq!(pass.value(), "secret");
    assert_eq!(form.submissions(), 1);
}

#[tokio::test]
async fn a_missing_target_fails_its_step_but_not_the_run() {
    // Same page without the login link
    let document = Arc::new(MemoryDocument::new());
    let user = document.adopt(
        MemoryElement::new("input")
            .with_id("user")
            .with_attr("name", "username"),
    );
    document.adopt(
        MemoryElement::new("input")
            .with_id("pass")
            .with_attr("type", "password"),
    );
    let form = document.adopt(MemoryElement::new("form").with_id("form"));

    let mut sequencer = sequencer_over(document);
    let report = sequencer.run(login_script()).await;

    assert_eq!(report.entries.len(), 4);
    assert_eq!(report.entries[0].outcome, Outcome::Failed);
    assert_eq!(report.entries[1].outcome, Outcome::Success);
    assert_eq!(report.entries[2].outcome, Outcome::Success);
    assert_eq!(report.entries[3].outcome, Outcome::Success);

    // The later steps really ran
    assert_eq!(user.value(), "alice");
    assert_eq!(form.submissions(), 1);
}

#[tokio::test]
async fn every_step_is_logged_exactly_once_whatever_the_outcome() {
    let document = Arc::new(MemoryDocument::new());
    let banner = document.adopt(MemoryElement::new("div").with_id("banner"));
    document.adopt(MemoryElement::new("button").with_id("go"));

    let script = Script::new(vec![
        Action::click("#go"),
        // Resolution failure
        Action::click("#missing"),
        // Incompatible action on a resolved element
        Action::type_text("#banner", "ignored"),
        // Invalid first candidate, valid fallback
        Action::click("button:contains(\"Go\"), #go"),
        // Submit on a non-form
        Action::submit("#banner"),
    ]);

    let mut sequencer = sequencer_over(document);
    let report = sequencer.run(script).await;

    let steps: Vec<usize> = report.entries.iter().map(|e| e.step).collect();
    assert_eq!(steps, vec![1, 2, 3, 4, 5]);

    let outcomes: Vec<Outcome> = report.entries.iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Success,
            Outcome::Failed,
            Outcome::Failed,
            Outcome::Success,
            Outcome::Failed,
        ]
    );

    // The incompatible type never mutated the element
    assert_eq!(banner.value(), "");
}

#[tokio::test]
async fn styles_are_restored_after_success_and_failure_alike() {
    let document = Arc::new(MemoryDocument::new());
    let button = document.adopt(MemoryElement::new("button").with_id("go"));
    let banner = document.adopt(MemoryElement::new("div").with_id("banner"));
    button.apply_highlight("color: green;");
    let button_before = button.css_text();
    let banner_before = banner.css_text();

    let script = Script::new(vec![
        Action::click("#go"),
        Action::type_text("#banner", "nope"),
    ]);

    let mut sequencer = sequencer_over(document);
    let report = sequencer.run(script).await;

    assert_eq!(report.entries[0].outcome, Outcome::Success);
    assert_eq!(report.entries[1].outcome, Outcome::Failed);
    assert_eq!(button.css_text(), button_before);
    assert_eq!(banner.css_text(), banner_before);
}

#[tokio::test]
async fn selector_priority_is_left_to_right() {
    let document = Arc::new(MemoryDocument::new());
    let first = document.adopt(MemoryElement::new("button").with_id("first"));
    let second = document.adopt(MemoryElement::new("button").with_id("second"));

    let mut sequencer = sequencer_over(document);
    sequencer
        .run(Script::new(vec![Action::click("#first, #second")]))
        .await;

    assert_eq!(first.clicks(), 1);
    assert_eq!(second.clicks(), 0);
}
