// crates/aura-shield-core/src/interfaces/mod.rs
// ============================================================================
// Module: Aura Shield Interfaces
// Description: Backend-agnostic interfaces for rule storage and tag inference.
// Purpose: Define the contract surfaces used by the Aura Shield runtime.
// Dependencies: thiserror, crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Aura Shield integrates with persistence and the
//! notification-to-tag inference capability without embedding backend
//! details. Store implementations must provide read-after-write consistency
//! within a single process; ordering per key is last-write-wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::Notification;
use crate::core::PackageName;
use crate::core::ProfileId;
use crate::core::Rule;
use crate::core::TagId;

// ============================================================================
// SECTION: Rule Store
// ============================================================================

/// Rule store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("rule store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails decoding.
    #[error("rule store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("rule store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("rule store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("rule store error: {0}")]
    Store(String),
}

/// Rule store keyed by `(package, profile)`.
pub trait RuleStore {
    /// Loads the rule for a key, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn get(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<Option<Rule>, StoreError>;

    /// Inserts or overwrites the rule for its natural key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when saving fails.
    fn upsert(&self, rule: &Rule) -> Result<(), StoreError>;

    /// Deletes the rule for a key. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when deletion fails.
    fn delete(&self, package_name: &PackageName, profile_id: &ProfileId)
    -> Result<(), StoreError>;

    /// Lists all rules configured under a profile, ordered by package name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Rule>, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Tag Classifier
// ============================================================================

/// Notification-to-tag inference capability.
///
/// Implementations map a notification's text to zero or more catalog tags.
/// Inference is best-effort and has no failure mode; an implementation that
/// cannot classify returns the empty set, which the policy treats as no
/// category match.
pub trait TagClassifier {
    /// Infers the category tags a notification belongs to.
    fn tags_for(&self, notification: &Notification) -> BTreeSet<TagId>;
}
