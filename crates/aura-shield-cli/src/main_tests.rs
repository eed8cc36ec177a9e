// crates/aura-shield-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and entry-point helpers.
// Purpose: Ensure CLI arguments map cleanly onto core types.
// Dependencies: aura-shield-cli main helpers
// ============================================================================

//! ## Overview
//! Validates argument parsing for the rule and classify commands and the
//! helper conversions the dispatcher relies on.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use aura_shield_core::Rule;
use aura_shield_core::ShieldLevel;
use aura_shield_core::TagId;
use aura_shield_core::TagRegistry;
use aura_shield_core::Timestamp;
use clap::Parser;

use super::Cli;
use super::Commands;
use super::LevelArg;
use super::RuleCommand;
use super::now;
use super::render_json;
use super::tag_set;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn level_arg_maps_onto_shield_levels() {
    assert_eq!(ShieldLevel::from(LevelArg::Open), ShieldLevel::Open);
    assert_eq!(ShieldLevel::from(LevelArg::Smart), ShieldLevel::Smart);
    assert_eq!(ShieldLevel::from(LevelArg::Fortress), ShieldLevel::Fortress);
}

#[test]
fn tag_set_deduplicates_repeated_categories() {
    let tags = tag_set(&["security".to_string(), "security".to_string(), "work".to_string()]);
    assert_eq!(tags.len(), 2);
    assert!(tags.contains(&TagId::new("security")));
    assert!(tags.contains(&TagId::new("work")));
}

#[test]
fn now_returns_unix_millis() {
    let stamp = now().expect("clock reads");
    match stamp {
        Timestamp::UnixMillis(millis) => assert!(millis > 0),
        Timestamp::Logical(_) => panic!("expected wall-clock timestamp"),
    }
}

#[test]
fn tag_catalog_renders_as_json() {
    let registry = TagRegistry::builtin();
    let rendered = render_json(registry.sections()).expect("catalog serializes");
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
    let sections = parsed.as_array().expect("array of sections");
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0]["section"], "Safety & Finance");
}

#[test]
fn absent_rule_renders_as_json_null() {
    let rendered = render_json(&None::<Rule>).expect("absent rule serializes");
    assert_eq!(rendered, "null");
}

#[test]
fn rule_set_command_parses() {
    let cli = Cli::try_parse_from([
        "aura-shield",
        "rule",
        "set",
        "--package",
        "com.example.bank",
        "--profile",
        "FOCUS",
        "--level",
        "smart",
        "--category",
        "security",
        "--keyword",
        "delivery",
    ])
    .expect("arguments parse");
    match cli.command {
        Commands::Rule {
            command: RuleCommand::Set(command),
        } => {
            assert_eq!(command.package, "com.example.bank");
            assert_eq!(command.profile, "FOCUS");
            assert_eq!(command.categories, vec!["security"]);
            assert_eq!(command.keywords, vec!["delivery"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn bulk_apply_requires_at_least_one_package() {
    let result = Cli::try_parse_from([
        "aura-shield",
        "bulk-apply",
        "--profile",
        "FOCUS",
        "--level",
        "fortress",
    ]);
    assert!(result.is_err());
}

#[test]
fn classify_defaults_title_and_content_to_empty() {
    let cli = Cli::try_parse_from([
        "aura-shield",
        "classify",
        "--package",
        "com.example.chat",
        "--profile",
        "FOCUS",
    ])
    .expect("arguments parse");
    match cli.command {
        Commands::Classify(command) => {
            assert!(command.title.is_empty());
            assert!(command.content.is_empty());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
