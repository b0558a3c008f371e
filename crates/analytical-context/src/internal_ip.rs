//! Internal-traffic detection based on configured address allowlists.
//!
//! Allowlist keys are consulted in a fixed order: `{PREFIX}_INTERNAL_IPS`,
//! `ANALYTICAL_INTERNAL_IPS`, then the framework-wide `INTERNAL_IPS`. The first
//! key that is configured wins even when its list is empty; a `null` value
//! counts as unconfigured.

use std::borrow::Cow;

use analytical_config::SettingsStore;
use analytical_config::defaults::{
    ANALYTICAL_INTERNAL_IPS, INTERNAL_IPS, INTERNAL_IPS_SUFFIX, prefixed,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::request::RequestContext;

/// Allowlist selected for one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalIps<'s> {
    /// Setting key the list was read from; `None` when nothing is configured.
    pub source: Option<Cow<'static, str>>,
    /// Addresses treated as internal.
    pub addresses: Vec<&'s str>,
}

impl InternalIps<'_> {
    /// Whether `addr` exactly matches an allowlisted address.
    #[must_use]
    pub fn contains(&self, addr: &str) -> bool {
        self.addresses.iter().any(|candidate| *candidate == addr)
    }
}

/// Resolve the internal-address allowlist for an optional integration prefix.
///
/// Values that are neither a string nor an array read as an empty list; array
/// entries that are not strings are ignored.
#[must_use]
pub fn internal_ips<'s, S>(store: &'s S, prefix: Option<&str>) -> InternalIps<'s>
where
    S: SettingsStore + ?Sized,
{
    let prefixed_key = prefix
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| prefixed(prefix, INTERNAL_IPS_SUFFIX));
    let candidates = prefixed_key
        .into_iter()
        .map(Cow::Owned)
        .chain([
            Cow::Borrowed(ANALYTICAL_INTERNAL_IPS),
            Cow::Borrowed(INTERNAL_IPS),
        ]);

    for key in candidates {
        if let Some(value) = store.get(&key).filter(|value| !value.is_null()) {
            trace!(key = %key, "internal address allowlist resolved");
            return InternalIps {
                addresses: address_list(value),
                source: Some(key),
            };
        }
    }

    InternalIps {
        source: None,
        addresses: Vec::new(),
    }
}

/// Whether the context's request comes from an internal address.
///
/// The client address is the first forwarded-for hop when present, otherwise
/// the peer address. A context without a request, or a request without any
/// address evidence, is never internal.
#[must_use]
pub fn is_internal_ip<S>(store: &S, context: &RequestContext, prefix: Option<&str>) -> bool
where
    S: SettingsStore + ?Sized,
{
    let Some(addr) = context.request().and_then(|request| request.client_addr()) else {
        return false;
    };

    let allowlist = internal_ips(store, prefix);
    let internal = allowlist.contains(addr);
    debug!(
        client = addr,
        source = allowlist.source.as_deref().unwrap_or("<none>"),
        internal,
        "classified client address"
    );
    internal
}

fn address_list(value: &Value) -> Vec<&str> {
    match value {
        Value::String(addr) => vec![addr.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => Vec::new(),
    }
}
