// crates/aura-shield-core/src/lib.rs
// ============================================================================
// Module: Aura Shield Core Library
// Description: Public API surface for the Aura Shield core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Aura Shield core provides deterministic notification classification over
//! per-app, per-profile rules: shield levels, category tags, and custom
//! keyword allow-lists. It is backend-agnostic and integrates through
//! explicit interfaces rather than embedding platform glue.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::RuleStore;
pub use interfaces::StoreError;
pub use interfaces::TagClassifier;
pub use runtime::BulkApplyReport;
pub use runtime::BulkConfig;
pub use runtime::Decided;
pub use runtime::Decision;
pub use runtime::EngineError;
pub use runtime::FilterEngine;
pub use runtime::HeuristicTagClassifier;
pub use runtime::InMemoryRuleStore;
pub use runtime::LexiconError;
pub use runtime::RuleSource;
pub use runtime::SharedRuleStore;
pub use runtime::SharedTagClassifier;
pub use runtime::Verdict;
pub use runtime::VerdictReason;
pub use runtime::classify;
pub use runtime::is_allowed;
pub use runtime::matched_keyword;
