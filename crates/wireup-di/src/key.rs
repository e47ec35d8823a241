//! Type identity and type-erased instances.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a type taking part in injection.
///
/// Works for unsized types too, so trait objects such as `dyn Repository`
/// can be declared as slot types and constructor parameters. Equality and
/// hashing only look at the [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Returns the key of `T`.
	///
	/// # Examples
	///
	/// ```
	/// use wireup_di::TypeKey;
	///
	/// trait Repository {}
	///
	/// let key = TypeKey::of::<dyn Repository>();
	/// assert_eq!(key.short_name(), "dyn Repository");
	/// assert_eq!(key, TypeKey::of::<dyn Repository>());
	/// ```
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	/// The underlying [`TypeId`].
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Fully qualified type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Type name with every module path stripped, e.g. `Arc<dyn Repository>`.
	pub fn short_name(&self) -> String {
		let mut out = String::with_capacity(self.name.len());
		let mut segment_start = 0;
		let mut chars = self.name.chars().peekable();
		while let Some(c) = chars.next() {
			if c == ':' && chars.peek() == Some(&':') {
				chars.next();
				out.truncate(segment_start);
				continue;
			}
			out.push(c);
			if !(c.is_alphanumeric() || c == '_') {
				segment_start = out.len();
			}
		}
		out
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeKey({})", self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.short_name())
	}
}

/// Type-erased handle to a shared value.
///
/// Holds an `Arc<T>` for the `T` named by [`Instance::key`]. Clones share
/// the same value, and so do instances upcast from one another through the
/// catalog; [`Instance::same`] compares the underlying allocation.
#[derive(Clone)]
pub struct Instance {
	key: TypeKey,
	addr: usize,
	value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
	/// Wraps a freshly owned value.
	pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
		Self::from_arc(Arc::new(value))
	}

	/// Wraps an existing shared value, keeping its identity.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use wireup_di::Instance;
	///
	/// let shared = Arc::new(7u32);
	/// let a = Instance::from_arc(shared.clone());
	/// let b = Instance::from_arc(shared);
	/// assert!(Instance::same(&a, &b));
	/// assert_eq!(*a.downcast::<u32>().unwrap(), 7);
	/// ```
	pub fn from_arc<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
		let addr = Arc::as_ptr(&value) as *const () as usize;
		Self {
			key: TypeKey::of::<T>(),
			addr,
			value: Arc::new(value),
		}
	}

	/// The type this instance is stored as.
	pub fn key(&self) -> TypeKey {
		self.key
	}

	/// Returns the shared value if this instance is stored as `T`.
	pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
		self.value.downcast_ref::<Arc<T>>().cloned()
	}

	/// Whether both handles point at the same value.
	pub fn same(a: &Self, b: &Self) -> bool {
		a.addr == b.addr
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("key", &self.key)
			.field("addr", &format_args!("{:#x}", self.addr))
			.finish()
	}
}
