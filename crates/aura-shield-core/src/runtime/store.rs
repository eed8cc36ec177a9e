// crates/aura-shield-core/src/runtime/store.rs
// ============================================================================
// Module: Aura Shield In-Memory Store
// Description: Simple in-memory rule store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`RuleStore`]
//! for tests and local demos, plus shared `Arc` wrappers used to hand store
//! and classifier implementations to the engine. It is not intended for
//! production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Notification;
use crate::core::PackageName;
use crate::core::ProfileId;
use crate::core::Rule;
use crate::core::TagId;
use crate::interfaces::RuleStore;
use crate::interfaces::StoreError;
use crate::interfaces::TagClassifier;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory rule store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRuleStore {
    /// Rule map protected by a mutex.
    rules: Arc<Mutex<BTreeMap<String, Rule>>>,
}

impl InMemoryRuleStore {
    /// Creates a new in-memory rule store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl RuleStore for InMemoryRuleStore {
    fn get(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<Option<Rule>, StoreError> {
        let guard = self
            .rules
            .lock()
            .map_err(|_| StoreError::Store("rule store mutex poisoned".to_string()))?;
        Ok(guard.get(&rule_key(package_name, profile_id)).cloned())
    }

    fn upsert(&self, rule: &Rule) -> Result<(), StoreError> {
        let key = rule_key(&rule.package_name, &rule.profile_id);
        self.rules
            .lock()
            .map_err(|_| StoreError::Store("rule store mutex poisoned".to_string()))?
            .insert(key, rule.clone());
        Ok(())
    }

    fn delete(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<(), StoreError> {
        self.rules
            .lock()
            .map_err(|_| StoreError::Store("rule store mutex poisoned".to_string()))?
            .remove(&rule_key(package_name, profile_id));
        Ok(())
    }

    fn list_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Rule>, StoreError> {
        let guard = self
            .rules
            .lock()
            .map_err(|_| StoreError::Store("rule store mutex poisoned".to_string()))?;
        let mut rules: Vec<Rule> =
            guard.values().filter(|rule| rule.profile_id == *profile_id).cloned().collect();
        rules.sort_by(|a, b| a.package_name.cmp(&b.package_name));
        Ok(rules)
    }
}

// ============================================================================
// SECTION: Shared Wrappers
// ============================================================================

/// Shared rule store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedRuleStore {
    /// Inner store implementation.
    inner: Arc<dyn RuleStore + Send + Sync>,
}

impl SharedRuleStore {
    /// Wraps a rule store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl RuleStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn RuleStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl RuleStore for SharedRuleStore {
    fn get(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<Option<Rule>, StoreError> {
        self.inner.get(package_name, profile_id)
    }

    fn upsert(&self, rule: &Rule) -> Result<(), StoreError> {
        self.inner.upsert(rule)
    }

    fn delete(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<(), StoreError> {
        self.inner.delete(package_name, profile_id)
    }

    fn list_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Rule>, StoreError> {
        self.inner.list_by_profile(profile_id)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}

/// Shared tag classifier backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedTagClassifier {
    /// Inner classifier implementation.
    inner: Arc<dyn TagClassifier + Send + Sync>,
}

impl SharedTagClassifier {
    /// Wraps a tag classifier in a shared, clonable wrapper.
    #[must_use]
    pub fn from_classifier(classifier: impl TagClassifier + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(classifier),
        }
    }

    /// Wraps an existing shared classifier.
    #[must_use]
    pub const fn new(classifier: Arc<dyn TagClassifier + Send + Sync>) -> Self {
        Self {
            inner: classifier,
        }
    }
}

impl TagClassifier for SharedTagClassifier {
    fn tags_for(&self, notification: &Notification) -> BTreeSet<TagId> {
        self.inner.tags_for(notification)
    }
}

/// Builds a unique rule key for the in-memory store.
fn rule_key(package_name: &PackageName, profile_id: &ProfileId) -> String {
    format!("{package_name}/{profile_id}")
}
