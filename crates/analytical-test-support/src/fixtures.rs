//! Test fixtures and environment helpers.

use analytical_config::Settings;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_TEST_LOG_LEVEL: &str = "warn";

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output goes through the test harness writer so it is
/// captured per test. A subscriber installed elsewhere is left in place.
pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_LOG_LEVEL));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer().with_target(false))
            .try_init();
    });
}

/// Build a settings store from `(name, value)` pairs.
#[must_use]
pub fn settings<I, K>(entries: I) -> Settings
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    entries.into_iter().collect()
}
