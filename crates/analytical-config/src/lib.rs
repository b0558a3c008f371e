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

//! Settings store and required-setting resolution for analytics integrations.
//!
//! Layout: `store.rs` (store trait, in-memory settings, JSON loading), `validate.rs`
//! (format patterns and value rendering), `resolve.rs` (required-setting lookup),
//! `defaults.rs` (well-known key names).

pub mod defaults;
pub mod error;
pub mod resolve;
pub mod store;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use resolve::{get_required_setting, get_required_str};
pub use store::{Setting, Settings, SettingsStore};
pub use validate::SettingFormat;
