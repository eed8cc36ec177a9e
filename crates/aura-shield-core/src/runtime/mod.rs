// crates/aura-shield-core/src/runtime/mod.rs
// ============================================================================
// Module: Aura Shield Runtime
// Description: Classification policy, heuristic inference, engine, and stores.
// Purpose: Group the runtime behavior built over the core data model.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime modules implement behavior over the core types: the pure
//! classification policy, the built-in heuristic tag classifier, the filter
//! engine, and the in-memory store used by tests and demos.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classifier;
pub mod engine;
pub mod heuristic;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classifier::Decision;
pub use classifier::Verdict;
pub use classifier::VerdictReason;
pub use classifier::classify;
pub use classifier::matched_keyword;
pub use engine::BulkApplyReport;
pub use engine::BulkConfig;
pub use engine::Decided;
pub use engine::EngineError;
pub use engine::FilterEngine;
pub use engine::RuleSource;
pub use engine::is_allowed;
pub use heuristic::HeuristicTagClassifier;
pub use heuristic::LexiconError;
pub use store::InMemoryRuleStore;
pub use store::SharedRuleStore;
pub use store::SharedTagClassifier;
