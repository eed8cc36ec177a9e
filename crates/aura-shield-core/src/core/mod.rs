// crates/aura-shield-core/src/core/mod.rs
// ============================================================================
// Module: Aura Shield Core Types
// Description: Data model shared across the Aura Shield runtime and stores.
// Purpose: Group identifier, time, notification, rule, and tag types.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain data with stable serde wire forms. They carry no
//! behavior beyond construction, accessors, and draft validation; policy
//! lives in the runtime module.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod notification;
pub mod rule;
pub mod tags;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::PackageName;
pub use identifiers::ProfileId;
pub use identifiers::TagId;
pub use notification::Notification;
pub use rule::DEFAULT_POLICY_TAG;
pub use rule::DefaultPolicy;
pub use rule::MAX_ACTIVE_CATEGORIES;
pub use rule::MAX_CUSTOM_KEYWORDS;
pub use rule::MAX_KEYWORD_LENGTH;
pub use rule::Rule;
pub use rule::RuleDraft;
pub use rule::RuleValidationError;
pub use rule::ShieldLevel;
pub use tags::TagMetadata;
pub use tags::TagRegistry;
pub use tags::TagSection;
pub use time::Timestamp;
