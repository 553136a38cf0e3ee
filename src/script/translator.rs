//! Prompt-to-script stub translator
//!
//! Not a parser: a fixed lookup table of string-matching rules. Each rule
//! that fires contributes one action whose selector is a fallback chain
//! written most-specific-first. Some candidates use syntax only richer
//! query engines accept; the resolver skips those at run time. When no
//! rule recognizes anything, a non-empty default login script is returned.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::{Action, Script};

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)username[=:]\s*([^,\s]+)").unwrap())
}

fn password_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)password[=:]\s*([^,\s]+)").unwrap())
}

/// Translate a free-text instruction into a script via the rule table.
/// Always returns a non-empty script.
pub fn translate(prompt: &str) -> Script {
    let lower = prompt.to_lowercase();
    let mut actions = Vec::new();

    if lower.contains("click on login") || lower.contains("login navigation") {
        actions.push(Action::click(
            "a[href*=\"login\"], #login, .login, button:contains(\"Login\"), a:contains(\"Login\")",
        ));
    }

    if let Some(capture) = username_pattern().captures(prompt) {
        actions.push(Action::type_text(
            "input[name=\"username\"], input[name=\"email\"], input[type=\"email\"], #username, #email, .username, .email",
            &capture[1],
        ));
    }

    if let Some(capture) = password_pattern().captures(prompt) {
        actions.push(Action::type_text(
            "input[name=\"password\"], input[type=\"password\"], #password, .password",
            &capture[1],
        ));
    }

    if lower.contains("click login") || lower.contains("submit") {
        actions.push(Action::click(
            "button[type=\"submit\"], input[type=\"submit\"], button:contains(\"Login\"), button:contains(\"Sign in\"), .login-btn, #login-btn",
        ));
    }

    if actions.is_empty() {
        debug!("no rule matched, using the default script");
        return default_script();
    }

    Script::new(actions)
}

/// The script used when no rule recognizes the prompt
pub fn default_script() -> Script {
    Script::new(vec![
        Action::click("a[href*=\"login\"]"),
        Action::type_text("input[type=\"email\"]", "test@gmail.com"),
        Action::type_text("input[type=\"password\"]", "test"),
        Action::click("button[type=\"submit\"]"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionKind;

    #[test]
    fn login_flow_prompt_builds_the_full_sequence() {
        let script =
            translate("Click on login, enter username=alice and password: s3cret, then submit");
        let kinds: Vec<ActionKind> = script.actions().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Click,
                ActionKind::Type,
                ActionKind::Type,
                ActionKind::Click
            ]
        );
        assert_eq!(script.actions()[1].value.as_deref(), Some("alice"));
        assert_eq!(script.actions()[2].value.as_deref(), Some("s3cret"));
    }

    #[test]
    fn credentials_are_extracted_case_insensitively() {
        let script = translate("Username: bob");
        assert_eq!(script.len(), 1);
        assert_eq!(script.actions()[0].value.as_deref(), Some("bob"));
        assert!(script.actions()[0].selector.contains("input[name=\"username\"]"));
    }

    #[test]
    fn unrecognized_prompts_fall_back_to_the_default_script() {
        let script = translate("make me a sandwich");
        assert_eq!(script.len(), 4);
        assert_eq!(script.actions()[0].selector, "a[href*=\"login\"]");
    }

    #[test]
    fn empty_prompt_is_still_a_non_empty_script() {
        assert!(!translate("").is_empty());
    }

    #[test]
    fn selector_chains_keep_their_priority_order() {
        let script = translate("click on login");
        let chain = &script.actions()[0].selector;
        let first = chain.split(',').next().unwrap().trim();
        assert_eq!(first, "a[href*=\"login\"]");
    }
}
