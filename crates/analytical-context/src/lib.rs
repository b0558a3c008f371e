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

//! Request-aware helpers used while rendering analytics markup.
//!
//! Layout: `request.rs` (request metadata + rendering context), `internal_ip.rs`
//! (internal-traffic detection), `domain.rs` (site domain lookup), `identity.rs`
//! (visitor identity lookup).

pub mod domain;
pub mod identity;
pub mod internal_ip;
pub mod request;

pub use domain::get_domain;
pub use identity::{get_identity, get_identity_with};
pub use internal_ip::{InternalIps, internal_ips, is_internal_ip};
pub use request::{RequestContext, RequestMeta, User};
