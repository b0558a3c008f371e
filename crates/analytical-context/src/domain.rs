//! Site domain lookup for integrations that need it in their payloads.

use analytical_config::SettingsStore;
use analytical_config::defaults::{ANALYTICAL_DOMAIN, DOMAIN_SUFFIX, prefixed};

use crate::request::RequestContext;

/// Domain for an integration: `{PREFIX}_DOMAIN`, then `ANALYTICAL_DOMAIN`, then
/// the request's host. Unset or empty settings fall through to the next source.
#[must_use]
pub fn get_domain<'a, S>(
    store: &'a S,
    context: &'a RequestContext,
    prefix: Option<&str>,
) -> Option<&'a str>
where
    S: SettingsStore + ?Sized,
{
    let configured = |key: &str| {
        store
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|domain| !domain.is_empty())
    };

    prefix
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| configured(&prefixed(prefix, DOMAIN_SUFFIX)))
        .or_else(|| configured(ANALYTICAL_DOMAIN))
        .or_else(|| context.request().and_then(|request| request.host()))
}
