//! Test logging utilities for wireup
//!
//! The engine logs through `tracing`; with its `log` feature enabled those
//! events reach whatever `log` backend is installed, here `env_logger`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Safe to call from every test; only the first call installs the logger.
/// Set `RUST_LOG=wireup_di=trace` to see per-slot resolution events.
///
/// # Examples
///
/// ```
/// use wireup_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
		tracing::trace!("test logging initialised");
	});
}
