// crates/aura-shield-core/src/core/tags.rs
// ============================================================================
// Module: Aura Shield Category Tag Registry
// Description: Build-time catalog of category tags grouped by section.
// Purpose: Provide the read-only tag metadata surface used by rules and UIs.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! The tag catalog is defined at build time and never mutated: a fixed,
//! ordered sequence of category sections, each holding the tags a rule may
//! activate. The registry is constructed once at process start and held for
//! the process lifetime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::TagId;

// ============================================================================
// SECTION: Builtin Catalog
// ============================================================================

/// Build-time tag table: `(section, tag id, label, description)`.
const BUILTIN_TAGS: &[(&str, &str, &str, &str)] = &[
    (
        "Safety & Finance",
        "security",
        "Security",
        "One-time passcodes, sign-in alerts, and account warnings.",
    ),
    (
        "Safety & Finance",
        "finance",
        "Finance",
        "Bank transactions, payment confirmations, and balance alerts.",
    ),
    ("Personal", "personal", "Personal", "Direct messages and calls from people."),
    (
        "Personal",
        "reminders",
        "Reminders",
        "Calendar events, task deadlines, and medication alerts.",
    ),
    ("Work", "work", "Work", "Workplace mentions, assignments, and meeting changes."),
    ("Low Priority", "promotions", "Promotions", "Sales, coupons, and marketing campaigns."),
    ("Low Priority", "social", "Social", "Likes, follows, comments, and group activity."),
    ("Low Priority", "news", "News", "Headlines and editorial digests."),
];

// ============================================================================
// SECTION: Tag Metadata
// ============================================================================

/// Immutable metadata describing one category tag.
///
/// # Invariants
/// - Defined at build time; never user-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMetadata {
    /// Stable tag identifier.
    pub id: TagId,
    /// Human-readable label.
    pub label: String,
    /// Human-readable description.
    pub description: String,
    /// Section the tag is grouped under.
    pub section: String,
}

/// Ordered group of tags under one catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSection {
    /// Section heading.
    pub section: String,
    /// Tags in catalog order.
    pub tags: Vec<TagMetadata>,
}

// ============================================================================
// SECTION: Tag Registry
// ============================================================================

/// Read-only lookup over the build-time tag catalog.
///
/// # Invariants
/// - Section and tag order is fixed by the catalog table.
/// - Construction is infallible; the builtin table contains no duplicates.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    /// Sections in catalog order.
    sections: Vec<TagSection>,
    /// Metadata indexed by tag identifier.
    by_id: BTreeMap<TagId, TagMetadata>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagRegistry {
    /// Builds the registry from the builtin catalog table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut sections: Vec<TagSection> = Vec::new();
        let mut by_id = BTreeMap::new();
        for (section, id, label, description) in BUILTIN_TAGS {
            let metadata = TagMetadata {
                id: TagId::new(*id),
                label: (*label).to_string(),
                description: (*description).to_string(),
                section: (*section).to_string(),
            };
            by_id.insert(metadata.id.clone(), metadata.clone());
            match sections.iter_mut().find(|entry| entry.section == *section) {
                Some(entry) => entry.tags.push(metadata),
                None => sections.push(TagSection {
                    section: (*section).to_string(),
                    tags: vec![metadata],
                }),
            }
        }
        Self {
            sections,
            by_id,
        }
    }

    /// Returns the catalog sections in order.
    #[must_use]
    pub fn sections(&self) -> &[TagSection] {
        &self.sections
    }

    /// Looks up tag metadata by identifier.
    #[must_use]
    pub fn get(&self, id: &TagId) -> Option<&TagMetadata> {
        self.by_id.get(id)
    }

    /// Returns whether the catalog defines the tag.
    #[must_use]
    pub fn contains(&self, id: &TagId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns the number of tags in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
