// crates/aura-shield-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Rule Store Tests
// Description: Integration tests for the durable SQLite rule store.
// Purpose: Validate persistence, keyed overwrites, and version gating.
// Dependencies: aura-shield-core, aura-shield-store-sqlite, tempfile
// ============================================================================

//! ## Overview
//! These tests run against real `SQLite` files in temporary directories and
//! cover round-trips, overwrite-by-key, profile listing, reopen persistence,
//! and fail-closed behavior on schema version mismatch.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::collections::BTreeSet;
use std::path::Path;

use aura_shield_core::PackageName;
use aura_shield_core::ProfileId;
use aura_shield_core::Rule;
use aura_shield_core::RuleStore;
use aura_shield_core::ShieldLevel;
use aura_shield_core::TagId;
use aura_shield_core::Timestamp;
use aura_shield_store_sqlite::SqliteRuleStore;
use aura_shield_store_sqlite::SqliteStoreConfig;
use aura_shield_store_sqlite::SqliteStoreError;
use aura_shield_store_sqlite::SqliteStoreMode;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn open_store(path: &Path) -> SqliteRuleStore {
    let config = SqliteStoreConfig::new(path);
    SqliteRuleStore::open(&config).expect("store opens")
}

fn sample_rule(package: &str, profile: &str, level: ShieldLevel) -> Rule {
    Rule {
        package_name: PackageName::new(package),
        profile_id: ProfileId::new(profile),
        shield_level: level,
        active_categories: [TagId::new("security"), TagId::new("finance")]
            .into_iter()
            .collect(),
        custom_keywords: ["delivery".to_string()].into_iter().collect(),
        last_updated: Timestamp::UnixMillis(1_700_000_000_000),
    }
}

// ============================================================================
// SECTION: Round-Trip
// ============================================================================

/// A saved rule reads back byte-for-byte under its key.
#[test]
fn upsert_then_get_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    let rule = sample_rule("com.example.bank", "FOCUS", ShieldLevel::Smart);
    store.upsert(&rule).expect("upsert succeeds");
    let loaded = store
        .get(&rule.package_name, &rule.profile_id)
        .expect("get succeeds")
        .expect("rule exists");
    assert_eq!(loaded, rule);
}

/// Absent keys load as `None` without error.
#[test]
fn get_missing_returns_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    let loaded = store
        .get(&PackageName::new("com.example.none"), &ProfileId::new("FOCUS"))
        .expect("get succeeds");
    assert!(loaded.is_none());
}

/// Upserting the same key overwrites the prior rule entirely.
#[test]
fn upsert_overwrites_by_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    let first = sample_rule("com.example.chat", "FOCUS", ShieldLevel::Open);
    store.upsert(&first).expect("first upsert");
    let mut second = sample_rule("com.example.chat", "FOCUS", ShieldLevel::Fortress);
    second.custom_keywords = BTreeSet::new();
    store.upsert(&second).expect("second upsert");
    let loaded = store
        .get(&second.package_name, &second.profile_id)
        .expect("get succeeds")
        .expect("rule exists");
    assert_eq!(loaded, second);
}

// ============================================================================
// SECTION: Delete and Listing
// ============================================================================

/// Deletion removes the key and is idempotent.
#[test]
fn delete_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    let rule = sample_rule("com.example.news", "RELAX", ShieldLevel::Smart);
    store.upsert(&rule).expect("upsert");
    store.delete(&rule.package_name, &rule.profile_id).expect("first delete");
    store.delete(&rule.package_name, &rule.profile_id).expect("second delete");
    assert!(store.get(&rule.package_name, &rule.profile_id).expect("get").is_none());
}

/// Listing returns only the requested profile, ordered by package name.
#[test]
fn list_by_profile_filters_and_orders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    store.upsert(&sample_rule("com.zeta.app", "FOCUS", ShieldLevel::Smart)).expect("upsert");
    store.upsert(&sample_rule("com.alpha.app", "FOCUS", ShieldLevel::Open)).expect("upsert");
    store.upsert(&sample_rule("com.alpha.app", "RELAX", ShieldLevel::Fortress)).expect("upsert");
    let rules = store.list_by_profile(&ProfileId::new("FOCUS")).expect("list succeeds");
    let packages: Vec<&str> = rules.iter().map(|rule| rule.package_name.as_str()).collect();
    assert_eq!(packages, vec!["com.alpha.app", "com.zeta.app"]);
}

/// The same package carries independent rules per profile.
#[test]
fn profiles_are_independent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    let focus = sample_rule("com.example.mail", "FOCUS", ShieldLevel::Fortress);
    let relax = sample_rule("com.example.mail", "RELAX", ShieldLevel::Open);
    store.upsert(&focus).expect("upsert focus");
    store.upsert(&relax).expect("upsert relax");
    let loaded_focus = store
        .get(&focus.package_name, &focus.profile_id)
        .expect("get focus")
        .expect("focus exists");
    let loaded_relax = store
        .get(&relax.package_name, &relax.profile_id)
        .expect("get relax")
        .expect("relax exists");
    assert_eq!(loaded_focus.shield_level, ShieldLevel::Fortress);
    assert_eq!(loaded_relax.shield_level, ShieldLevel::Open);
}

// ============================================================================
// SECTION: Durability and Version Gating
// ============================================================================

/// Rules survive closing and reopening the database.
#[test]
fn rules_persist_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rules.db");
    let rule = sample_rule("com.example.bank", "FOCUS", ShieldLevel::Smart);
    {
        let store = open_store(&path);
        store.upsert(&rule).expect("upsert");
    }
    let reopened = open_store(&path);
    let loaded = reopened
        .get(&rule.package_name, &rule.profile_id)
        .expect("get succeeds")
        .expect("rule exists");
    assert_eq!(loaded, rule);
}

/// Delete journal mode opens and round-trips like WAL.
#[test]
fn delete_journal_mode_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = SqliteStoreConfig::new(dir.path().join("rules.db"));
    config.journal_mode = SqliteStoreMode::Delete;
    let store = SqliteRuleStore::open(&config).expect("store opens");
    let rule = sample_rule("com.example.bank", "FOCUS", ShieldLevel::Smart);
    store.upsert(&rule).expect("upsert");
    let loaded = store
        .get(&rule.package_name, &rule.profile_id)
        .expect("get succeeds")
        .expect("rule exists");
    assert_eq!(loaded, rule);
}

/// Opening a database with a newer schema version fails closed.
#[test]
fn version_mismatch_fails_closed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rules.db");
    {
        let store = open_store(&path);
        store.readiness().expect("store ready");
    }
    {
        let connection = rusqlite::Connection::open(&path).expect("raw open");
        connection.execute("UPDATE store_meta SET version = 99", []).expect("bump version");
    }
    let config = SqliteStoreConfig::new(&path);
    let result = SqliteRuleStore::open(&config);
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
}

/// Readiness succeeds on a healthy store.
#[test]
fn readiness_reports_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir.path().join("rules.db"));
    store.readiness().expect("store ready");
}
