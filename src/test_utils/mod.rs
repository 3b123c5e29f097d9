//! Test utilities for librepub
//!
//! Shared by the unit tests and, through the `test-utils` feature, by the
//! integration test suite: logging setup and fixtures for manifests,
//! template directories and publications.

pub mod fixtures;

pub use fixtures::{ManifestFixture, TemplateDirFixture, sample_publication};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` when set, otherwise leaves
/// logging off. Only the first call has any effect.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// librepub::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
