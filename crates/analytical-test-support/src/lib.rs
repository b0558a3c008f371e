#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared test helpers used across integration suites.
//! Layout: overrides.rs (scoped setting overrides), fixtures.rs (tracing + store builders).

pub mod fixtures;
pub mod overrides;

pub use fixtures::{init_test_tracing, settings};
pub use overrides::{Overrides, SettingsOverride, override_settings, with_overrides};
