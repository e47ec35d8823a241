//! Pass-scoped type registry and external bindings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Instance, TypeCatalog, TypeKey};

/// Maps each type to the most recently resolved instance assignable to it.
///
/// A registry lives for exactly one injection pass over one target. Binding
/// an instance makes it visible under its own type and under every type the
/// catalog says it can stand in for, replacing earlier bindings of those types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
	bindings: HashMap<TypeKey, Instance>,
}

impl TypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `instance` under its type and every type it is assignable to.
	pub fn bind(&mut self, instance: &Instance, catalog: &TypeCatalog) {
		for key in catalog.assignable_keys(instance.key()) {
			if let Some(view) = catalog.upcast(instance, key) {
				self.bindings.insert(key, view);
			}
		}
	}

	/// The instance currently satisfying `key`, if any.
	pub fn lookup(&self, key: TypeKey) -> Option<&Instance> {
		self.bindings.get(&key)
	}

	pub fn contains(&self, key: TypeKey) -> bool {
		self.bindings.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

/// Instances supplied from outside the target, such as test doubles for
/// leaf types that have no slot of their own.
///
/// Bindings seed each pass's registry before any slot resolves and are never
/// modified by the engine.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
	instances: Vec<Instance>,
}

impl Bindings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a shared value, keyed by `T`.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use wireup_di::{Bindings, TypeKey};
	///
	/// trait Clock: Send + Sync {}
	/// struct Fixed;
	/// impl Clock for Fixed {}
	///
	/// let bindings = Bindings::new().with::<dyn Clock>(Arc::new(Fixed));
	/// assert_eq!(bindings.len(), 1);
	/// assert_eq!(bindings.iter().next().unwrap().key(), TypeKey::of::<dyn Clock>());
	/// ```
	pub fn with<T: ?Sized + Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
		self.insert(Instance::from_arc(value));
		self
	}

	pub fn insert(&mut self, instance: Instance) {
		self.instances.push(instance);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Instance> {
		self.instances.iter()
	}

	pub fn len(&self) -> usize {
		self.instances.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}
}
