// crates/aura-shield-core/src/core/rule.rs
// ============================================================================
// Module: Aura Shield Rule Model
// Description: Shield levels, per-app rules, and draft validation.
// Purpose: Define the persisted rule shape and the save-gate validation.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! A rule configures filtering for one `(package, profile)` pair: a shield
//! level, the set of category tags allowed through under `Smart`, and a
//! custom keyword allow-list. The persisted model deliberately permits a
//! `Smart` rule with no categories and no keywords (it behaves like
//! `Fortress`); [`RuleDraft::validate`] rejects that shape before it is
//! saved, mirroring the product's save gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PackageName;
use crate::core::identifiers::ProfileId;
use crate::core::identifiers::TagId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of custom keywords per rule.
pub const MAX_CUSTOM_KEYWORDS: usize = 64;
/// Maximum length of a single custom keyword in bytes.
pub const MAX_KEYWORD_LENGTH: usize = 256;
/// Maximum number of active category tags per rule.
pub const MAX_ACTIVE_CATEGORIES: usize = 64;

// ============================================================================
// SECTION: Shield Level
// ============================================================================

/// Coarse filtering mode applied to one app under one profile.
///
/// # Invariants
/// - Exactly one level is active per `(package, profile)` pair at any time.
/// - Variants are stable for persistence and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldLevel {
    /// Allow every notification through.
    Open,
    /// Filter by active category tags and custom keywords.
    Smart,
    /// Block every notification (custom keywords still break through).
    Fortress,
}

impl ShieldLevel {
    /// Returns a stable label for the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Smart => "smart",
            Self::Fortress => "fortress",
        }
    }
}

// ============================================================================
// SECTION: Rule
// ============================================================================

/// Filtering rule for one `(package, profile)` pair.
///
/// # Invariants
/// - Natural key is `(package_name, profile_id)`; stores overwrite by key.
/// - `last_updated` is informational only and never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Package the rule applies to.
    pub package_name: PackageName,
    /// Profile the rule applies under.
    pub profile_id: ProfileId,
    /// Shield level in effect.
    pub shield_level: ShieldLevel,
    /// Category tags allowed through under `Smart`.
    pub active_categories: BTreeSet<TagId>,
    /// Keywords that force a notification through regardless of tags.
    pub custom_keywords: BTreeSet<String>,
    /// Time of the last rule mutation.
    pub last_updated: Timestamp,
}

impl Rule {
    /// Returns whether the rule suppresses everything under `Smart`.
    ///
    /// Such rules are valid data but rejected by the draft save gate.
    #[must_use]
    pub fn is_blackhole(&self) -> bool {
        self.shield_level == ShieldLevel::Smart
            && self.active_categories.is_empty()
            && self.custom_keywords.is_empty()
    }
}

// ============================================================================
// SECTION: Draft Validation
// ============================================================================

/// Rule validation errors raised by the save gate.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// Package identifier is empty.
    #[error("rule package name must not be empty")]
    EmptyPackageName,
    /// Profile identifier is empty.
    #[error("rule profile id must not be empty")]
    EmptyProfileId,
    /// `Smart` rule with no categories and no keywords.
    #[error("smart rule must select at least one category or keyword")]
    EmptySmartRule,
    /// A custom keyword is empty or whitespace-only.
    #[error("custom keywords must not be empty")]
    EmptyKeyword,
    /// A custom keyword exceeds the length limit.
    #[error("custom keyword exceeds {MAX_KEYWORD_LENGTH} bytes")]
    KeywordTooLong,
    /// Too many custom keywords.
    #[error("rule exceeds {MAX_CUSTOM_KEYWORDS} custom keywords")]
    TooManyKeywords,
    /// Too many active categories.
    #[error("rule exceeds {MAX_ACTIVE_CATEGORIES} active categories")]
    TooManyCategories,
}

/// Unvalidated rule input as captured from a configuration surface.
///
/// # Invariants
/// - Carries the same shape as [`Rule`]; only validation separates the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// Package the rule applies to.
    pub package_name: PackageName,
    /// Profile the rule applies under.
    pub profile_id: ProfileId,
    /// Requested shield level.
    pub shield_level: ShieldLevel,
    /// Requested category tags.
    pub active_categories: BTreeSet<TagId>,
    /// Requested custom keywords.
    pub custom_keywords: BTreeSet<String>,
}

impl RuleDraft {
    /// Validates the draft into a persistable rule stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleValidationError`] when the draft fails the save gate.
    pub fn validate(self, now: Timestamp) -> Result<Rule, RuleValidationError> {
        if self.package_name.is_empty() {
            return Err(RuleValidationError::EmptyPackageName);
        }
        if self.profile_id.is_empty() {
            return Err(RuleValidationError::EmptyProfileId);
        }
        if self.shield_level == ShieldLevel::Smart
            && self.active_categories.is_empty()
            && self.custom_keywords.is_empty()
        {
            return Err(RuleValidationError::EmptySmartRule);
        }
        if self.custom_keywords.len() > MAX_CUSTOM_KEYWORDS {
            return Err(RuleValidationError::TooManyKeywords);
        }
        if self.active_categories.len() > MAX_ACTIVE_CATEGORIES {
            return Err(RuleValidationError::TooManyCategories);
        }
        for keyword in &self.custom_keywords {
            if keyword.trim().is_empty() {
                return Err(RuleValidationError::EmptyKeyword);
            }
            if keyword.len() > MAX_KEYWORD_LENGTH {
                return Err(RuleValidationError::KeywordTooLong);
            }
        }
        Ok(Rule {
            package_name: self.package_name,
            profile_id: self.profile_id,
            shield_level: self.shield_level,
            active_categories: self.active_categories,
            custom_keywords: self.custom_keywords,
            last_updated: now,
        })
    }
}

// ============================================================================
// SECTION: Default Policy
// ============================================================================

/// Tag identifier used by the default policy.
pub const DEFAULT_POLICY_TAG: &str = "security";

/// Policy substituted when no rule exists for a `(package, profile)` pair.
///
/// # Invariants
/// - Never `Smart` with empty categories; construction enforces a usable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPolicy {
    /// Shield level applied to unconfigured apps.
    pub shield_level: ShieldLevel,
    /// Category tags allowed through for unconfigured apps.
    pub active_categories: BTreeSet<TagId>,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        let mut active_categories = BTreeSet::new();
        active_categories.insert(TagId::new(DEFAULT_POLICY_TAG));
        Self {
            shield_level: ShieldLevel::Smart,
            active_categories,
        }
    }
}

impl DefaultPolicy {
    /// Materializes the policy as a rule for the given key.
    ///
    /// The synthesized rule carries a logical zero timestamp because it was
    /// never written by a user action.
    #[must_use]
    pub fn rule_for(&self, package_name: &PackageName, profile_id: &ProfileId) -> Rule {
        Rule {
            package_name: package_name.clone(),
            profile_id: profile_id.clone(),
            shield_level: self.shield_level,
            active_categories: self.active_categories.clone(),
            custom_keywords: BTreeSet::new(),
            last_updated: Timestamp::Logical(0),
        }
    }
}
