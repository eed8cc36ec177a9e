// crates/aura-shield-store-sqlite/src/lib.rs
// ============================================================================
// Module: Aura Shield SQLite Store Library
// Description: Public API surface for the SQLite rule store.
// Purpose: Expose the durable RuleStore implementation and its config.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! Durable [`aura_shield_core::RuleStore`] backed by `SQLite`. Rules are
//! stored one row per `(package, profile)` key with JSON-encoded tag and
//! keyword sets; upserts overwrite by key.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteRuleStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
