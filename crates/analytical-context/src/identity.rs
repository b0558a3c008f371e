//! Visitor identity lookup shared by integrations that tag sessions.

use analytical_config::SettingsStore;
use analytical_config::defaults::ANALYTICAL_AUTO_IDENTIFY;
use serde_json::Value;

use crate::request::{RequestContext, User};

/// Context variable consulted for every integration.
pub const ANALYTICAL_IDENTITY_VAR: &str = "analytical_identity";

/// Identity for the current visitor, using the username for signed-in users.
///
/// See [`get_identity_with`] for the lookup order.
#[must_use]
pub fn get_identity<S>(store: &S, context: &RequestContext, prefix: Option<&str>) -> Option<String>
where
    S: SettingsStore + ?Sized,
{
    get_identity_with(store, context, prefix, |user| user.username().to_string())
}

/// Identity for the current visitor.
///
/// Order: the `{prefix}_identity` context variable (prefix lowercased), the
/// `analytical_identity` variable, then `identify(user)` for a signed-in user
/// unless `ANALYTICAL_AUTO_IDENTIFY` is configured to a false value.
#[must_use]
pub fn get_identity_with<S, F>(
    store: &S,
    context: &RequestContext,
    prefix: Option<&str>,
    identify: F,
) -> Option<String>
where
    S: SettingsStore + ?Sized,
    F: FnOnce(&User) -> String,
{
    let explicit = prefix
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| context.get(&format!("{}_identity", prefix.to_lowercase())))
        .or_else(|| context.get(ANALYTICAL_IDENTITY_VAR));
    if let Some(identity) = explicit {
        return Some(identity.to_string());
    }

    if !auto_identify(store) {
        return None;
    }
    context
        .current_user()
        .filter(|user| user.is_authenticated())
        .map(identify)
}

fn auto_identify<S: SettingsStore + ?Sized>(store: &S) -> bool {
    match store.get(ANALYTICAL_AUTO_IDENTIFY) {
        None => true,
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::Null) => false,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n.abs() > f64::EPSILON),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
