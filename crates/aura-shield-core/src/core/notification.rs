// crates/aura-shield-core/src/core/notification.rs
// ============================================================================
// Module: Aura Shield Notification Model
// Description: Notification records delivered by the platform listener.
// Purpose: Provide the minimal notification shape the classifier reads.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! A notification is the unit of classification: the originating package plus
//! the text fields the platform listener exposes. The classifier only reads
//! text; the timestamp is carried for logs and is never part of a decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PackageName;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Notification Record
// ============================================================================

/// Notification delivered by the platform notification pipeline.
///
/// # Invariants
/// - `title` and `content` are untrusted free text supplied by the posting app.
/// - The classifier reads text fields only; `posted_at` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Package that posted the notification.
    pub package_name: PackageName,
    /// Notification title text.
    pub title: String,
    /// Notification body text.
    pub content: String,
    /// Time the notification was posted.
    pub posted_at: Timestamp,
}

impl Notification {
    /// Creates a notification record.
    #[must_use]
    pub fn new(
        package_name: impl Into<PackageName>,
        title: impl Into<String>,
        content: impl Into<String>,
        posted_at: Timestamp,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            title: title.into(),
            content: content.into(),
            posted_at,
        }
    }
}
