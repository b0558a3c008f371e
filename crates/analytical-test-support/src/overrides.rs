//! Scoped setting overrides for tests.
//!
//! # Design
//! - `Overrides::apply` returns a guard that borrows the store mutably and derefs to it,
//!   so nested overrides borrow through the outer guard and must be dropped first.
//! - The guard records each key's prior slot (value, deletion marker, or never set)
//!   and restores it on drop, including while unwinding from a panic.

use std::ops::{Deref, DerefMut};

use analytical_config::{Setting, SettingsStore};
use serde_json::Value;
use tracing::trace;

/// Set of replacements to apply for the duration of a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(String, Setting)>,
}

impl Overrides {
    /// Empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `name` with `value` while the override is active.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.push(name, Setting::Value(value.into()));
        self
    }

    /// Make `name` read as not found while the override is active.
    #[must_use]
    pub fn delete(mut self, name: &str) -> Self {
        self.push(name, Setting::Deleted);
        self
    }

    /// Keys touched by this override set, in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Apply the replacements to `store`; dropping the guard restores prior state.
    pub fn apply<S>(self, store: &mut S) -> SettingsOverride<'_, S>
    where
        S: SettingsStore + ?Sized,
    {
        let mut saved = Vec::with_capacity(self.entries.len());
        for (name, replacement) in self.entries {
            trace!(
                setting = %name,
                deleted = replacement.is_deleted(),
                "applying setting override"
            );
            let prior = store.replace_slot(&name, Some(replacement));
            saved.push((name, prior));
        }
        SettingsOverride { store, saved }
    }

    fn push(&mut self, name: &str, setting: Setting) {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| existing == name) {
            entry.1 = setting;
        } else {
            self.entries.push((name.to_string(), setting));
        }
    }
}

/// Active override over a settings store.
///
/// Reads and writes go through to the underlying store; on drop every
/// overridden key returns to the state it had before [`Overrides::apply`].
#[must_use = "dropping the guard immediately restores the overridden settings"]
pub struct SettingsOverride<'s, S>
where
    S: SettingsStore + ?Sized,
{
    store: &'s mut S,
    saved: Vec<(String, Option<Setting>)>,
}

impl<S> SettingsOverride<'_, S>
where
    S: SettingsStore + ?Sized,
{
    /// Layer another override set on top of this one.
    pub fn nest(&mut self, overrides: Overrides) -> SettingsOverride<'_, S> {
        overrides.apply(&mut *self.store)
    }
}

impl<S> Deref for SettingsOverride<'_, S>
where
    S: SettingsStore + ?Sized,
{
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S> DerefMut for SettingsOverride<'_, S>
where
    S: SettingsStore + ?Sized,
{
    fn deref_mut(&mut self) -> &mut S {
        self.store
    }
}

impl<S> Drop for SettingsOverride<'_, S>
where
    S: SettingsStore + ?Sized,
{
    fn drop(&mut self) {
        while let Some((name, prior)) = self.saved.pop() {
            trace!(setting = %name, restored = prior.is_some(), "restoring setting override");
            self.store.replace_slot(&name, prior);
        }
    }
}

/// Apply `overrides` to `store`; shorthand for [`Overrides::apply`].
pub fn override_settings<S>(store: &mut S, overrides: Overrides) -> SettingsOverride<'_, S>
where
    S: SettingsStore + ?Sized,
{
    overrides.apply(store)
}

/// Run `scope` with `overrides` applied, restoring the store afterwards.
///
/// The scope's return value (including any `Result`) is passed through
/// unchanged once the store has been restored.
pub fn with_overrides<S, T>(
    store: &mut S,
    overrides: Overrides,
    scope: impl FnOnce(&mut S) -> T,
) -> T
where
    S: SettingsStore + ?Sized,
{
    let mut guard = overrides.apply(store);
    scope(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytical_config::{ConfigError, Settings};
    use serde_json::json;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn deleted_setting_raises_not_found() {
        let mut settings = Settings::new().with("USER_ID", json!(1));
        let guard = Overrides::new().delete("USER_ID").apply(&mut settings);
        assert!(matches!(
            guard.setting("USER_ID"),
            Err(ConfigError::SettingNotFound { .. })
        ));
        drop(guard);
        assert_eq!(settings.setting("USER_ID").ok(), Some(&json!(1)));
    }

    #[test]
    fn unset_keys_are_removed_on_exit() {
        let mut settings = Settings::new();
        {
            let guard = Overrides::new().set("NEW_KEY", "value").apply(&mut settings);
            assert_eq!(guard.get("NEW_KEY"), Some(&json!("value")));
        }
        assert!(settings.slot("NEW_KEY").is_none());
    }

    #[test]
    fn nested_overrides_restore_in_lifo_order() {
        let mut settings = Settings::new().with("K", json!("original"));
        {
            let mut outer = Overrides::new().set("K", "A").apply(&mut settings);
            {
                let inner = outer.nest(Overrides::new().set("K", "B"));
                assert_eq!(inner.get("K"), Some(&json!("B")));
            }
            assert_eq!(outer.get("K"), Some(&json!("A")));
        }
        assert_eq!(settings.get("K"), Some(&json!("original")));
    }

    #[test]
    fn nested_deletion_reveals_outer_override() {
        let mut settings = Settings::new();
        let mut outer = Overrides::new().set("USER_ID", 1).apply(&mut settings);
        {
            let inner = outer.nest(Overrides::new().delete("USER_ID"));
            assert!(!inner.contains("USER_ID"));
        }
        assert_eq!(outer.get("USER_ID"), Some(&json!(1)));
        drop(outer);
        assert!(settings.slot("USER_ID").is_none());
    }

    #[test]
    fn restores_while_unwinding() {
        let mut settings = Settings::new().with("K", json!("original"));
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            with_overrides(&mut settings, Overrides::new().delete("K"), |_| {
                panic!("scope failed");
            })
        }));
        assert!(outcome.is_err());
        assert_eq!(settings.get("K"), Some(&json!("original")));
    }

    #[test]
    fn with_overrides_passes_results_through() {
        let mut settings = Settings::new();
        let result: Result<(), &str> =
            with_overrides(&mut settings, Overrides::new().set("K", "v"), |store| {
                assert!(store.contains("K"));
                Err("scope error")
            });
        assert_eq!(result, Err("scope error"));
        assert!(!settings.contains("K"));
    }

    #[test]
    fn repeated_key_keeps_last_replacement() {
        let overrides = Overrides::new().set("K", "first").delete("K");
        assert_eq!(overrides.names().collect::<Vec<_>>(), vec!["K"]);

        let mut settings = Settings::new().with("K", json!("original"));
        {
            let guard = overrides.apply(&mut settings);
            assert!(!guard.contains("K"));
        }
        assert_eq!(settings.get("K"), Some(&json!("original")));
    }
}
