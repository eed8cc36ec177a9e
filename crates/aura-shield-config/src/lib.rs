// crates/aura-shield-config/src/lib.rs
// ============================================================================
// Module: Aura Shield Config Library
// Description: Public API surface for configuration loading.
// Purpose: Expose strict, fail-closed TOML configuration for Aura Shield.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration loading and validation for Aura Shield. Configuration comes
//! from a TOML file resolved from an explicit path, an environment variable,
//! or a default filename, in that order, and fails closed on any invalid
//! content.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::DefaultPolicyConfig;
pub use config::ShieldConfig;
pub use config::StoreConfig;
