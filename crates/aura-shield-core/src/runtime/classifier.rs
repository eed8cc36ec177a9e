// crates/aura-shield-core/src/runtime/classifier.rs
// ============================================================================
// Module: Aura Shield Classifier
// Description: Pure allow/suppress decision policy over rules and tags.
// Purpose: Evaluate one notification against one rule deterministically.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! Classification is a pure function with no I/O and no failure mode. The
//! precedence order is fixed: custom keywords first (they break through every
//! shield level, including `Fortress`), then category-tag intersection under
//! `Smart`, then the level's unconditional outcome. Matching is exact
//! case-insensitive substring and set membership; there is no scoring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::Notification;
use crate::core::Rule;
use crate::core::ShieldLevel;
use crate::core::TagId;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Classification outcome for one notification.
///
/// # Invariants
/// - Variants are stable and exhaustive for filtering outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Surface the notification through the normal display path.
    Allow,
    /// Never surface the notification.
    Suppress,
}

/// Reason a verdict was reached, for logs and traces.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictReason {
    /// Shield level is `Open`; everything passes.
    OpenShield,
    /// A custom keyword matched the notification text.
    KeywordOverride {
        /// Keyword that matched.
        keyword: String,
    },
    /// Inferred tags intersected the rule's active categories.
    CategoryMatch {
        /// Tags present in both sets.
        matched: BTreeSet<TagId>,
    },
    /// Shield level is `Fortress` and no keyword broke through.
    FortressBlock,
    /// `Smart` rule matched neither keywords nor categories.
    NoMatch,
}

/// Decision plus the reason it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Allow or suppress.
    pub decision: Decision,
    /// Why the decision was reached.
    pub reason: VerdictReason,
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies one notification against one rule and its inferred tags.
///
/// `inferred_tags` comes from the injected tag classifier; pass the empty set
/// when inference is unavailable. The function never reads anything beyond
/// its arguments, so replaying a decision reproduces it exactly.
#[must_use]
pub fn classify(
    notification: &Notification,
    rule: &Rule,
    inferred_tags: &BTreeSet<TagId>,
) -> Verdict {
    if rule.shield_level == ShieldLevel::Open {
        return Verdict {
            decision: Decision::Allow,
            reason: VerdictReason::OpenShield,
        };
    }

    // Keywords outrank every other signal, at Fortress included.
    if let Some(keyword) = matched_keyword(rule, notification) {
        return Verdict {
            decision: Decision::Allow,
            reason: VerdictReason::KeywordOverride {
                keyword,
            },
        };
    }

    if rule.shield_level == ShieldLevel::Fortress {
        return Verdict {
            decision: Decision::Suppress,
            reason: VerdictReason::FortressBlock,
        };
    }

    let matched: BTreeSet<TagId> =
        inferred_tags.intersection(&rule.active_categories).cloned().collect();
    if matched.is_empty() {
        Verdict {
            decision: Decision::Suppress,
            reason: VerdictReason::NoMatch,
        }
    } else {
        Verdict {
            decision: Decision::Allow,
            reason: VerdictReason::CategoryMatch {
                matched,
            },
        }
    }
}

/// Returns the first custom keyword matching the notification text, if any.
///
/// Matching is case-insensitive substring over title and content. Keywords
/// iterate in set order, so the returned keyword is deterministic.
#[must_use]
pub fn matched_keyword(rule: &Rule, notification: &Notification) -> Option<String> {
    if rule.custom_keywords.is_empty() {
        return None;
    }
    let title = notification.title.to_lowercase();
    let content = notification.content.to_lowercase();
    for keyword in &rule.custom_keywords {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if title.contains(&needle) || content.contains(&needle) {
            return Some(keyword.clone());
        }
    }
    None
}
