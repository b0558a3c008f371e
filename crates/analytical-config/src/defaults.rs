//! Well-known setting names shared by the analytics integrations.
//!
//! # Design
//! - Centralize key names so lookups and test fixtures stay consistent.
//! - Prefixed keys are built with [`prefixed`] rather than ad-hoc formatting.

/// Allowlist of internal client addresses for every integration.
pub const ANALYTICAL_INTERNAL_IPS: &str = "ANALYTICAL_INTERNAL_IPS";
/// Framework-wide allowlist consulted when no analytics-specific list exists.
pub const INTERNAL_IPS: &str = "INTERNAL_IPS";
/// Suffix of the per-integration allowlist key (`{PREFIX}_INTERNAL_IPS`).
pub const INTERNAL_IPS_SUFFIX: &str = "INTERNAL_IPS";
/// Site domain shared by every integration.
pub const ANALYTICAL_DOMAIN: &str = "ANALYTICAL_DOMAIN";
/// Suffix of the per-integration domain key (`{PREFIX}_DOMAIN`).
pub const DOMAIN_SUFFIX: &str = "DOMAIN";
/// Toggle for deriving visitor identity from the authenticated user.
pub const ANALYTICAL_AUTO_IDENTIFY: &str = "ANALYTICAL_AUTO_IDENTIFY";

/// Build a namespaced key such as `TEST_INTERNAL_IPS`.
#[must_use]
pub fn prefixed(prefix: &str, suffix: &str) -> String {
    format!("{prefix}_{suffix}")
}
