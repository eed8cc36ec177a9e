// crates/aura-shield-core/tests/classifier.rs
// ============================================================================
// Module: Classifier Tests
// Description: Tests for the pure allow/suppress classification policy.
// Purpose: Validate shield-level precedence, keyword overrides, and tag matching.
// Dependencies: aura-shield-core
// ============================================================================
//! ## Overview
//! Validates the fixed precedence order: keywords first, then category
//! intersection under Smart, then the level's unconditional outcome.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

use std::collections::BTreeSet;

use aura_shield_core::Decision;
use aura_shield_core::Notification;
use aura_shield_core::Rule;
use aura_shield_core::ShieldLevel;
use aura_shield_core::TagId;
use aura_shield_core::Timestamp;
use aura_shield_core::VerdictReason;
use aura_shield_core::classify;
use aura_shield_core::matched_keyword;

fn sample_rule(level: ShieldLevel, categories: &[&str], keywords: &[&str]) -> Rule {
    Rule {
        package_name: "com.example.bank".into(),
        profile_id: "FOCUS".into(),
        shield_level: level,
        active_categories: categories.iter().map(|tag| TagId::new(*tag)).collect(),
        custom_keywords: keywords.iter().map(|kw| (*kw).to_string()).collect(),
        last_updated: Timestamp::Logical(0),
    }
}

fn sample_notification(title: &str, content: &str) -> Notification {
    Notification::new("com.example.bank", title, content, Timestamp::UnixMillis(1_700_000_000_000))
}

fn tags(ids: &[&str]) -> BTreeSet<TagId> {
    ids.iter().map(|id| TagId::new(*id)).collect()
}

// ============================================================================
// SECTION: Shield Levels
// ============================================================================

/// Open rules allow everything regardless of content or tags.
#[test]
fn open_allows_unconditionally() {
    let rule = sample_rule(ShieldLevel::Open, &[], &[]);
    let verdict = classify(&sample_notification("Mega sale", "90% off"), &rule, &tags(&[]));
    assert_eq!(verdict.decision, Decision::Allow);
    assert_eq!(verdict.reason, VerdictReason::OpenShield);
}

/// Fortress rules suppress everything when no keyword matches.
#[test]
fn fortress_suppresses_without_keyword() {
    let rule = sample_rule(ShieldLevel::Fortress, &["security"], &[]);
    let verdict =
        classify(&sample_notification("Security alert", "New sign-in"), &rule, &tags(&["security"]));
    assert_eq!(verdict.decision, Decision::Suppress);
    assert_eq!(verdict.reason, VerdictReason::FortressBlock);
}

/// Custom keywords break through Fortress.
#[test]
fn fortress_keyword_breakthrough() {
    let rule = sample_rule(ShieldLevel::Fortress, &[], &["OTP"]);
    let verdict = classify(&sample_notification("Bank", "Your OTP is 4821"), &rule, &tags(&[]));
    assert_eq!(verdict.decision, Decision::Allow);
    assert_eq!(
        verdict.reason,
        VerdictReason::KeywordOverride {
            keyword: "OTP".to_string(),
        }
    );
}

// ============================================================================
// SECTION: Smart Matching
// ============================================================================

/// Spec example: Smart rule with only an OTP keyword allows an OTP message.
#[test]
fn smart_keyword_match_allows() {
    let rule = sample_rule(ShieldLevel::Smart, &[], &["OTP"]);
    let verdict = classify(&sample_notification("Bank OTP", "Your OTP is 4821"), &rule, &tags(&[]));
    assert_eq!(verdict.decision, Decision::Allow);
}

/// Keyword matching is case-insensitive substring over title and content.
#[test]
fn smart_keyword_match_is_case_insensitive() {
    let rule = sample_rule(ShieldLevel::Smart, &[], &["payroll"]);
    let title_hit = sample_notification("PAYROLL processed", "");
    let content_hit = sample_notification("", "Your PayRoll arrived");
    assert_eq!(classify(&title_hit, &rule, &tags(&[])).decision, Decision::Allow);
    assert_eq!(classify(&content_hit, &rule, &tags(&[])).decision, Decision::Allow);
}

/// Keywords outrank category logic even when no category matches.
#[test]
fn smart_keyword_overrides_category_miss() {
    let rule = sample_rule(ShieldLevel::Smart, &["security"], &["invoice"]);
    let verdict =
        classify(&sample_notification("Invoice #42", "Due Friday"), &rule, &tags(&["promotions"]));
    assert_eq!(verdict.decision, Decision::Allow);
    assert!(matches!(verdict.reason, VerdictReason::KeywordOverride { .. }));
}

/// Category intersection allows and records the matched tags.
#[test]
fn smart_category_intersection_allows() {
    let rule = sample_rule(ShieldLevel::Smart, &["security", "finance"], &[]);
    let verdict = classify(
        &sample_notification("Payment done", "Card charged"),
        &rule,
        &tags(&["finance", "promotions"]),
    );
    assert_eq!(verdict.decision, Decision::Allow);
    assert_eq!(
        verdict.reason,
        VerdictReason::CategoryMatch {
            matched: tags(&["finance"]),
        }
    );
}

/// Disjoint tags suppress under Smart.
#[test]
fn smart_disjoint_tags_suppress() {
    let rule = sample_rule(ShieldLevel::Smart, &["security"], &[]);
    let verdict =
        classify(&sample_notification("Mega sale", "50% off"), &rule, &tags(&["promotions"]));
    assert_eq!(verdict.decision, Decision::Suppress);
    assert_eq!(verdict.reason, VerdictReason::NoMatch);
}

/// Smart with empty categories and keywords suppresses everything.
#[test]
fn smart_blackhole_suppresses_everything() {
    let rule = sample_rule(ShieldLevel::Smart, &[], &[]);
    let verdict = classify(
        &sample_notification("Security alert", "New sign-in"),
        &rule,
        &tags(&["security"]),
    );
    assert_eq!(verdict.decision, Decision::Suppress);
}

// ============================================================================
// SECTION: Keyword Helper
// ============================================================================

/// The matched keyword is reported in its configured casing.
#[test]
fn matched_keyword_reports_configured_form() {
    let rule = sample_rule(ShieldLevel::Smart, &[], &["OtP"]);
    let found = matched_keyword(&rule, &sample_notification("otp inside", ""));
    assert_eq!(found, Some("OtP".to_string()));
}

/// No keywords means no match work at all.
#[test]
fn matched_keyword_empty_set_is_none() {
    let rule = sample_rule(ShieldLevel::Smart, &["security"], &[]);
    assert_eq!(matched_keyword(&rule, &sample_notification("otp", "otp")), None);
}
