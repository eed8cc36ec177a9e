// crates/aura-shield-core/tests/proptest_classifier.rs
// ============================================================================
// Module: Classifier Property-Based Tests
// Description: Property tests for classification invariants.
// Purpose: Ensure shield-level outcomes hold across wide text input ranges.
// ============================================================================

//! Property-based tests for classifier invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use aura_shield_core::Decision;
use aura_shield_core::Notification;
use aura_shield_core::Rule;
use aura_shield_core::ShieldLevel;
use aura_shield_core::TagId;
use aura_shield_core::Timestamp;
use aura_shield_core::classify;
use proptest::prelude::*;

fn rule_with(level: ShieldLevel, categories: BTreeSet<TagId>, keywords: BTreeSet<String>) -> Rule {
    Rule {
        package_name: "com.example.app".into(),
        profile_id: "FOCUS".into(),
        shield_level: level,
        active_categories: categories,
        custom_keywords: keywords,
        last_updated: Timestamp::Logical(0),
    }
}

fn notification(title: &str, content: &str) -> Notification {
    Notification::new("com.example.app", title, content, Timestamp::Logical(0))
}

fn tag_set() -> impl Strategy<Value = BTreeSet<TagId>> {
    prop::collection::btree_set("[a-z]{1,8}".prop_map(TagId::new), 0..5)
}

proptest! {
    /// Open allows every notification regardless of text or inferred tags.
    #[test]
    fn open_always_allows(title in any::<String>(), content in any::<String>(), tags in tag_set()) {
        let rule = rule_with(ShieldLevel::Open, BTreeSet::new(), BTreeSet::new());
        let verdict = classify(&notification(&title, &content), &rule, &tags);
        prop_assert_eq!(verdict.decision, Decision::Allow);
    }

    /// Fortress without keywords suppresses every notification.
    #[test]
    fn fortress_without_keywords_always_suppresses(
        title in any::<String>(),
        content in any::<String>(),
        tags in tag_set(),
    ) {
        let rule = rule_with(ShieldLevel::Fortress, BTreeSet::new(), BTreeSet::new());
        let verdict = classify(&notification(&title, &content), &rule, &tags);
        prop_assert_eq!(verdict.decision, Decision::Suppress);
    }

    /// Smart with empty categories and keywords suppresses everything.
    #[test]
    fn smart_blackhole_always_suppresses(
        title in any::<String>(),
        content in any::<String>(),
        tags in tag_set(),
    ) {
        let rule = rule_with(ShieldLevel::Smart, BTreeSet::new(), BTreeSet::new());
        let verdict = classify(&notification(&title, &content), &rule, &tags);
        prop_assert_eq!(verdict.decision, Decision::Suppress);
    }

    /// A keyword embedded in the content allows under Smart and Fortress.
    #[test]
    fn embedded_keyword_breaks_through(
        prefix in "[a-z ]{0,16}",
        keyword in "[a-zA-Z]{1,12}",
        suffix in "[a-z ]{0,16}",
        fortress in any::<bool>(),
    ) {
        let level = if fortress { ShieldLevel::Fortress } else { ShieldLevel::Smart };
        let keywords: BTreeSet<String> = [keyword.clone()].into_iter().collect();
        let rule = rule_with(level, BTreeSet::new(), keywords);
        let content = format!("{prefix}{keyword}{suffix}");
        let verdict = classify(&notification("", &content), &rule, &BTreeSet::new());
        prop_assert_eq!(verdict.decision, Decision::Allow);
    }

    /// Classification is a pure function: same inputs, same verdict.
    #[test]
    fn classification_is_deterministic(
        title in any::<String>(),
        content in any::<String>(),
        tags in tag_set(),
        keywords in prop::collection::btree_set("[a-zA-Z]{1,8}", 0..4),
    ) {
        let rule = rule_with(ShieldLevel::Smart, tags.clone(), keywords);
        let subject = notification(&title, &content);
        let first = classify(&subject, &rule, &tags);
        let second = classify(&subject, &rule, &tags);
        prop_assert_eq!(first, second);
    }
}
