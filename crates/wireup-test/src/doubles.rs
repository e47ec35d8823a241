//! Test doubles for the leaf `Repository` interface.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockall::automock;
use wireup_di::{Instance, MockFactory, TypeKey};

/// Leaf interface every shape fixture bottoms out in.
#[automock]
pub trait Repository: Send + Sync {
	fn get_data(&self) -> String;
}

/// Value returned by doubles from [`repository_double`].
pub const STUB_DATA: &str = "stubbed";

/// A relaxed double: `get_data` may be called any number of times.
pub fn repository_double() -> MockRepository {
	let mut double = MockRepository::new();
	double
		.expect_get_data()
		.return_const(STUB_DATA.to_string());
	double
}

/// [`MockFactory`] producing [`repository_double`]s for `dyn Repository`.
///
/// Counts how many doubles it has handed out so tests can check that doubles
/// are created before a pass and never during one.
#[derive(Debug, Default)]
pub struct DoubleFactory {
	created: AtomicUsize,
}

impl DoubleFactory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Doubles created so far.
	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}
}

impl MockFactory for DoubleFactory {
	fn create(&self, key: TypeKey) -> Option<Instance> {
		if key != TypeKey::of::<dyn Repository>() {
			return None;
		}
		self.created.fetch_add(1, Ordering::SeqCst);
		let double: Arc<dyn Repository> = Arc::new(repository_double());
		Some(Instance::from_arc(double))
	}
}
