// crates/aura-shield-core/src/runtime/engine.rs
// ============================================================================
// Module: Aura Shield Filter Engine
// Description: Orchestrates rule lookup, tag inference, and classification.
// Purpose: Provide the single entry point hosts call per notification.
// Dependencies: thiserror, tracing, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The filter engine binds a rule store, a tag classifier, and the default
//! policy into one decision surface. Rule mutations go through draft
//! validation; bulk application upserts each package independently and
//! reports partial failures instead of aborting the batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::DefaultPolicy;
use crate::core::Notification;
use crate::core::PackageName;
use crate::core::ProfileId;
use crate::core::Rule;
use crate::core::RuleDraft;
use crate::core::RuleValidationError;
use crate::core::ShieldLevel;
use crate::core::TagId;
use crate::core::Timestamp;
use crate::interfaces::RuleStore;
use crate::interfaces::StoreError;
use crate::interfaces::TagClassifier;
use crate::runtime::classifier::Decision;
use crate::runtime::classifier::Verdict;
use crate::runtime::classifier::classify;
use crate::runtime::store::SharedRuleStore;
use crate::runtime::store::SharedTagClassifier;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Filter engine errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rule store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Draft failed the save gate.
    #[error(transparent)]
    Validation(#[from] RuleValidationError),
}

// ============================================================================
// SECTION: Decision Records
// ============================================================================

/// Where the rule used for a decision came from.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// A rule configured for the `(package, profile)` key.
    Configured,
    /// The system-wide default policy; no rule existed for the key.
    DefaultPolicy,
}

/// Engine decision: the verdict plus the rule provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decided {
    /// Classification verdict.
    pub verdict: Verdict,
    /// Whether a configured rule or the default policy applied.
    pub rule_source: RuleSource,
}

// ============================================================================
// SECTION: Bulk Application
// ============================================================================

/// Identical configuration applied to a batch of packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Packages to configure.
    pub packages: Vec<PackageName>,
    /// Profile the rules apply under.
    pub profile_id: ProfileId,
    /// Shield level for every package.
    pub shield_level: ShieldLevel,
    /// Active categories for every package.
    pub active_categories: BTreeSet<TagId>,
    /// Custom keywords for every package.
    pub custom_keywords: BTreeSet<String>,
}

/// Per-package outcome report for a bulk application.
///
/// # Invariants
/// - `applied` and `failed` partition the request's package list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkApplyReport {
    /// Packages whose rules were written.
    pub applied: Vec<PackageName>,
    /// Packages that failed, with the failure message.
    pub failed: Vec<(PackageName, String)>,
}

// ============================================================================
// SECTION: Filter Engine
// ============================================================================

/// Decision surface over a rule store and an injected tag classifier.
pub struct FilterEngine {
    /// Rule persistence.
    store: SharedRuleStore,
    /// Notification-to-tag inference.
    classifier: SharedTagClassifier,
    /// Policy substituted for unconfigured apps.
    default_policy: DefaultPolicy,
}

impl FilterEngine {
    /// Creates an engine with the standard default policy.
    #[must_use]
    pub fn new(store: SharedRuleStore, classifier: SharedTagClassifier) -> Self {
        Self {
            store,
            classifier,
            default_policy: DefaultPolicy::default(),
        }
    }

    /// Replaces the default policy applied to unconfigured apps.
    #[must_use]
    pub fn with_default_policy(mut self, policy: DefaultPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Returns the active default policy.
    #[must_use]
    pub const fn default_policy(&self) -> &DefaultPolicy {
        &self.default_policy
    }

    /// Decides whether a notification is allowed through under a profile.
    ///
    /// Tag inference only runs when the effective rule is `Smart`; `Open` and
    /// `Fortress` outcomes never depend on it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the rule store fails.
    pub fn decide(
        &self,
        notification: &Notification,
        profile_id: &ProfileId,
    ) -> Result<Decided, EngineError> {
        let (rule, rule_source) =
            match self.store.get(&notification.package_name, profile_id)? {
                Some(rule) => (rule, RuleSource::Configured),
                None => (
                    self.default_policy.rule_for(&notification.package_name, profile_id),
                    RuleSource::DefaultPolicy,
                ),
            };
        let inferred_tags = if rule.shield_level == ShieldLevel::Smart {
            self.classifier.tags_for(notification)
        } else {
            BTreeSet::new()
        };
        let verdict = classify(notification, &rule, &inferred_tags);
        tracing::debug!(
            package = %notification.package_name,
            profile = %profile_id,
            level = rule.shield_level.as_str(),
            decision = ?verdict.decision,
            source = ?rule_source,
            "classified notification"
        );
        Ok(Decided {
            verdict,
            rule_source,
        })
    }

    /// Validates and persists a rule draft, stamping it with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on validation failure or store failure.
    pub fn upsert_rule(&self, draft: RuleDraft, now: Timestamp) -> Result<Rule, EngineError> {
        let rule = draft.validate(now)?;
        self.store.upsert(&rule)?;
        tracing::debug!(
            package = %rule.package_name,
            profile = %rule.profile_id,
            level = rule.shield_level.as_str(),
            "upserted rule"
        );
        Ok(rule)
    }

    /// Loads the configured rule for a key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the rule store fails.
    pub fn rule(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<Option<Rule>, EngineError> {
        Ok(self.store.get(package_name, profile_id)?)
    }

    /// Removes the rule for a key; the default policy applies afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the rule store fails.
    pub fn remove_rule(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<(), EngineError> {
        self.store.delete(package_name, profile_id)?;
        tracing::debug!(package = %package_name, profile = %profile_id, "removed rule");
        Ok(())
    }

    /// Lists all rules configured under a profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the rule store fails.
    pub fn rules_for_profile(&self, profile_id: &ProfileId) -> Result<Vec<Rule>, EngineError> {
        Ok(self.store.list_by_profile(profile_id)?)
    }

    /// Applies an identical configuration to every package in the request.
    ///
    /// Each package is upserted independently; a failure is recorded in the
    /// report and the batch continues. Partial application is expected
    /// behavior, not an error.
    #[must_use]
    pub fn apply_bulk_config(&self, request: &BulkConfig, now: Timestamp) -> BulkApplyReport {
        let mut report = BulkApplyReport::default();
        for package in &request.packages {
            let draft = RuleDraft {
                package_name: package.clone(),
                profile_id: request.profile_id.clone(),
                shield_level: request.shield_level,
                active_categories: request.active_categories.clone(),
                custom_keywords: request.custom_keywords.clone(),
            };
            match self.upsert_rule(draft, now) {
                Ok(_) => report.applied.push(package.clone()),
                Err(err) => {
                    tracing::warn!(package = %package, error = %err, "bulk apply item failed");
                    report.failed.push((package.clone(), err.to_string()));
                }
            }
        }
        report
    }

    /// Classifies a notification against an explicit rule, bypassing the store.
    ///
    /// Used by offline tooling to replay decisions.
    #[must_use]
    pub fn classify_with_rule(&self, notification: &Notification, rule: &Rule) -> Verdict {
        let inferred_tags = if rule.shield_level == ShieldLevel::Smart {
            self.classifier.tags_for(notification)
        } else {
            BTreeSet::new()
        };
        classify(notification, rule, &inferred_tags)
    }

    /// Reports readiness of the underlying store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store is unavailable.
    pub fn readiness(&self) -> Result<(), EngineError> {
        Ok(self.store.readiness()?)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns whether a decided outcome surfaces the notification.
#[must_use]
pub const fn is_allowed(decided: &Decided) -> bool {
    matches!(decided.verdict.decision, Decision::Allow)
}
