//! Constructor signatures and type assignability.
//!
//! The [`TypeCatalog`] is the explicit metadata registry the engine consults
//! instead of runtime reflection. It is built once, then shared read-only
//! (usually behind an `Arc`) by any number of concurrent injection passes.
//!
//! Types get into the catalog in two ways:
//!
//! - explicit registration on a [`TypeCatalogBuilder`]
//! - compile-time submission through [`register_injectable!`](crate::register_injectable),
//!   folded in by [`TypeCatalogBuilder::with_registered`]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::injectable::{Arguments, Injectable};
use crate::{DiError, DiResult, Instance, TypeKey};

type Factory = Arc<dyn Fn(&mut Arguments<'_>) -> DiResult<Instance> + Send + Sync>;
type Upcast = Arc<dyn Fn(&Instance) -> Option<Instance> + Send + Sync>;

/// One constructor of a type: its parameter types and the factory behind it.
#[derive(Clone)]
pub struct Constructor {
	produces: TypeKey,
	params: Vec<TypeKey>,
	factory: Factory,
	primary: bool,
	from_injectable: bool,
}

impl Constructor {
	/// Describes a constructor of `T` taking `params` in order.
	///
	/// # Examples
	///
	/// ```
	/// use wireup_di::{Constructor, TypeKey};
	///
	/// struct Port(u16);
	///
	/// let ctor = Constructor::new(vec![TypeKey::of::<u16>()], |args| {
	/// 	Ok(Port(*args.next::<u16>()?))
	/// });
	/// assert_eq!(ctor.produces(), TypeKey::of::<Port>());
	/// assert_eq!(ctor.params(), &[TypeKey::of::<u16>()]);
	/// ```
	pub fn new<T, F>(params: Vec<TypeKey>, build: F) -> Self
	where
		T: Send + Sync + 'static,
		F: Fn(&mut Arguments<'_>) -> DiResult<T> + Send + Sync + 'static,
	{
		Self {
			produces: TypeKey::of::<T>(),
			params,
			factory: Arc::new(move |args: &mut Arguments<'_>| build(args).map(Instance::new)),
			primary: false,
			from_injectable: false,
		}
	}

	/// The constructor described by `T`'s [`Injectable`] implementation.
	pub fn of<T: Injectable>() -> Self {
		Self {
			from_injectable: true,
			..Self::new(T::dependencies(), T::construct)
		}
	}

	/// Marks this constructor as the one to use when a type has several.
	pub fn primary(mut self) -> Self {
		self.primary = true;
		self
	}

	pub fn produces(&self) -> TypeKey {
		self.produces
	}

	pub fn params(&self) -> &[TypeKey] {
		&self.params
	}

	pub fn is_primary(&self) -> bool {
		self.primary
	}

	pub(crate) fn invoke(&self, values: &[Instance]) -> DiResult<Instance> {
		let mut args = Arguments::new(self.produces, values);
		(self.factory)(&mut args)
	}
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Constructor")
			.field("produces", &self.produces)
			.field("params", &self.params)
			.field("primary", &self.primary)
			.finish()
	}
}

#[derive(Clone)]
struct TypeMetadata {
	constructors: Vec<Constructor>,
	assignable_to: Vec<(TypeKey, Upcast)>,
}

impl TypeMetadata {
	fn new() -> Self {
		Self {
			constructors: Vec::new(),
			assignable_to: Vec::new(),
		}
	}
}

/// Read-only registry of constructor signatures and assignability.
#[derive(Clone, Default)]
pub struct TypeCatalog {
	types: HashMap<TypeKey, TypeMetadata>,
}

impl TypeCatalog {
	/// Starts an empty catalog builder.
	pub fn builder() -> TypeCatalogBuilder {
		TypeCatalogBuilder::new()
	}

	/// Number of known types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Whether the catalog knows anything about `key`.
	pub fn contains(&self, key: TypeKey) -> bool {
		self.types.contains_key(&key)
	}

	/// The constructor used to build `key`.
	///
	/// Returns `Ok(None)` when the type has no registered constructor. With
	/// several constructors exactly one must be marked primary, otherwise the
	/// type is ambiguous.
	pub fn primary_constructor(&self, key: TypeKey) -> DiResult<Option<&Constructor>> {
		let Some(metadata) = self.types.get(&key) else {
			return Ok(None);
		};
		match metadata.constructors.as_slice() {
			[] => Ok(None),
			[only] => Ok(Some(only)),
			several => {
				let mut primaries = several.iter().filter(|c| c.primary);
				match (primaries.next(), primaries.next()) {
					(Some(primary), None) => Ok(Some(primary)),
					_ => Err(DiError::AmbiguousConstructor {
						type_name: key.to_string(),
						candidates: several.len(),
					}),
				}
			}
		}
	}

	/// Parameter types of `key`'s primary constructor, in declaration order.
	///
	/// `Ok(Some(&[]))` means a parameterless constructor, `Ok(None)` means the
	/// type cannot be constructed at all.
	pub fn constructor_parameters(&self, key: TypeKey) -> DiResult<Option<&[TypeKey]>> {
		Ok(self.primary_constructor(key)?.map(Constructor::params))
	}

	/// `key` itself followed by every type a `key` value can stand in for.
	pub fn assignable_keys(&self, key: TypeKey) -> Vec<TypeKey> {
		let mut keys = vec![key];
		if let Some(metadata) = self.types.get(&key) {
			keys.extend(metadata.assignable_to.iter().map(|(to, _)| *to));
		}
		keys
	}

	/// Whether a value of type `from` satisfies a parameter of type `to`.
	pub fn is_assignable(&self, from: TypeKey, to: TypeKey) -> bool {
		from == to
			|| self
				.types
				.get(&from)
				.is_some_and(|metadata| metadata.assignable_to.iter().any(|(key, _)| *key == to))
	}

	/// Views `instance` as a value of type `to`, sharing the same allocation.
	pub fn upcast(&self, instance: &Instance, to: TypeKey) -> Option<Instance> {
		if instance.key() == to {
			return Some(instance.clone());
		}
		let metadata = self.types.get(&instance.key())?;
		let (_, upcast) = metadata.assignable_to.iter().find(|(key, _)| *key == to)?;
		upcast(instance)
	}
}

impl fmt::Debug for TypeCatalog {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeCatalog")
			.field("types", &self.types.len())
			.finish()
	}
}

/// Builder for [`TypeCatalog`].
#[derive(Default)]
pub struct TypeCatalogBuilder {
	types: HashMap<TypeKey, TypeMetadata>,
}

impl TypeCatalogBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `T` with its [`Injectable`] constructor as the primary one.
	///
	/// Registering the same type again replaces the earlier `Injectable`
	/// constructor instead of adding a second one.
	pub fn register<T: Injectable>(mut self) -> Self {
		self.insert_injectable::<T>();
		self
	}

	/// Adds an explicit constructor for the type it produces.
	pub fn constructor(mut self, constructor: Constructor) -> Self {
		self.insert_constructor(constructor);
		self
	}

	/// Declares that a `T` value satisfies parameters of type `U`.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use wireup_di::{TypeCatalog, TypeKey};
	///
	/// trait Repository: Send + Sync {}
	/// struct InMemory;
	/// impl Repository for InMemory {}
	///
	/// let catalog = TypeCatalog::builder()
	/// 	.assignable::<InMemory, dyn Repository, _>(|value| value as Arc<dyn Repository>)
	/// 	.build();
	/// assert!(catalog.is_assignable(TypeKey::of::<InMemory>(), TypeKey::of::<dyn Repository>()));
	/// ```
	pub fn assignable<T, U, F>(mut self, upcast: F) -> Self
	where
		T: Send + Sync + 'static,
		U: ?Sized + Send + Sync + 'static,
		F: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
	{
		let to = TypeKey::of::<U>();
		let erased: Upcast = Arc::new(move |instance: &Instance| {
			instance
				.downcast::<T>()
				.map(|value| Instance::from_arc(upcast(value)))
		});
		let metadata = self.entry(TypeKey::of::<T>());
		metadata.assignable_to.retain(|(key, _)| *key != to);
		metadata.assignable_to.push((to, erased));
		self
	}

	/// Folds in every type submitted with [`register_injectable!`](crate::register_injectable).
	pub fn with_registered(mut self) -> Self {
		for registration in inventory::iter::<InjectableRegistration> {
			(registration.register)(&mut self);
		}
		self
	}

	/// In-place form of [`register`](Self::register).
	pub fn insert_injectable<T: Injectable>(&mut self) {
		let metadata = self.entry(TypeKey::of::<T>());
		metadata.constructors.retain(|c| !c.from_injectable);
		metadata.constructors.push(Constructor::of::<T>().primary());
	}

	/// In-place form of [`constructor`](Self::constructor).
	pub fn insert_constructor(&mut self, constructor: Constructor) {
		self.entry(constructor.produces)
			.constructors
			.push(constructor);
	}

	pub fn build(self) -> TypeCatalog {
		TypeCatalog { types: self.types }
	}

	fn entry(&mut self, key: TypeKey) -> &mut TypeMetadata {
		self.types.entry(key).or_insert_with(TypeMetadata::new)
	}
}

/// A compile-time registration collected by [`TypeCatalogBuilder::with_registered`].
pub struct InjectableRegistration {
	register: fn(&mut TypeCatalogBuilder),
}

impl InjectableRegistration {
	pub const fn new(register: fn(&mut TypeCatalogBuilder)) -> Self {
		Self { register }
	}
}

inventory::collect!(InjectableRegistration);

/// Submits [`Injectable`] types for [`TypeCatalogBuilder::with_registered`].
///
/// ```ignore
/// wireup_di::register_injectable!(UserService, AuditLog);
///
/// let catalog = TypeCatalog::builder().with_registered().build();
/// ```
#[macro_export]
macro_rules! register_injectable {
	($($ty:ty),+ $(,)?) => {
		$(
			$crate::inventory::submit! {
				$crate::catalog::InjectableRegistration::new(|builder| {
					builder.insert_injectable::<$ty>();
				})
			}
		)+
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	trait Store: Send + Sync {
		fn name(&self) -> &'static str;
	}

	struct MemoryStore;

	impl Store for MemoryStore {
		fn name(&self) -> &'static str {
			"memory"
		}
	}

	struct Service {
		store: Arc<dyn Store>,
	}

	impl Injectable for Service {
		fn dependencies() -> Vec<TypeKey> {
			vec![TypeKey::of::<dyn Store>()]
		}

		fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
			Ok(Self {
				store: args.next::<dyn Store>()?,
			})
		}
	}

	struct Empty;

	impl Injectable for Empty {
		fn dependencies() -> Vec<TypeKey> {
			Vec::new()
		}

		fn construct(_args: &mut Arguments<'_>) -> DiResult<Self> {
			Ok(Empty)
		}
	}

	#[fixture]
	fn catalog() -> TypeCatalog {
		TypeCatalog::builder()
			.register::<Service>()
			.register::<Empty>()
			.assignable::<MemoryStore, dyn Store, _>(|store| store as Arc<dyn Store>)
			.build()
	}

	#[rstest]
	fn reports_parameters_in_declaration_order(catalog: TypeCatalog) {
		// Act
		let params = catalog
			.constructor_parameters(TypeKey::of::<Service>())
			.unwrap();

		// Assert
		assert_eq!(params, Some(&[TypeKey::of::<dyn Store>()][..]));
	}

	#[rstest]
	fn parameterless_constructor_is_empty_not_missing(catalog: TypeCatalog) {
		let params = catalog.constructor_parameters(TypeKey::of::<Empty>()).unwrap();

		assert_eq!(params, Some(&[][..]));
	}

	#[rstest]
	fn unknown_type_has_no_constructor(catalog: TypeCatalog) {
		let params = catalog.constructor_parameters(TypeKey::of::<u32>()).unwrap();

		assert!(params.is_none());
		assert!(!catalog.contains(TypeKey::of::<u32>()));
	}

	#[rstest]
	fn inspection_is_repeatable(catalog: TypeCatalog) {
		let first = catalog
			.constructor_parameters(TypeKey::of::<Service>())
			.unwrap()
			.map(<[TypeKey]>::to_vec);
		let second = catalog
			.constructor_parameters(TypeKey::of::<Service>())
			.unwrap()
			.map(<[TypeKey]>::to_vec);

		assert_eq!(first, second);
	}

	#[rstest]
	fn registering_twice_keeps_one_constructor() {
		// Arrange
		let catalog = TypeCatalog::builder()
			.register::<Service>()
			.register::<Service>()
			.build();

		// Act
		let result = catalog.primary_constructor(TypeKey::of::<Service>());

		// Assert
		assert!(result.unwrap().is_some());
	}

	#[rstest]
	fn several_unmarked_constructors_are_ambiguous() {
		// Arrange
		let catalog = TypeCatalog::builder()
			.constructor(Constructor::new(Vec::new(), |_| Ok(Empty)))
			.constructor(Constructor::new(vec![TypeKey::of::<u8>()], |_| Ok(Empty)))
			.build();

		// Act
		let result = catalog.constructor_parameters(TypeKey::of::<Empty>());

		// Assert
		assert_eq!(
			result.unwrap_err(),
			DiError::AmbiguousConstructor {
				type_name: "Empty".to_string(),
				candidates: 2,
			}
		);
	}

	#[rstest]
	fn two_primaries_are_still_ambiguous() {
		let catalog = TypeCatalog::builder()
			.constructor(Constructor::new(Vec::new(), |_| Ok(Empty)).primary())
			.constructor(Constructor::new(vec![TypeKey::of::<u8>()], |_| Ok(Empty)).primary())
			.build();

		let result = catalog.primary_constructor(TypeKey::of::<Empty>());

		assert!(matches!(
			result,
			Err(DiError::AmbiguousConstructor { candidates: 2, .. })
		));
	}

	#[rstest]
	fn single_primary_wins_among_several() {
		let catalog = TypeCatalog::builder()
			.constructor(Constructor::new(Vec::new(), |_| Ok(Empty)))
			.constructor(Constructor::new(vec![TypeKey::of::<u8>()], |_| Ok(Empty)).primary())
			.build();

		let params = catalog.constructor_parameters(TypeKey::of::<Empty>()).unwrap();

		assert_eq!(params, Some(&[TypeKey::of::<u8>()][..]));
	}

	#[rstest]
	fn assignable_keys_start_with_the_type_itself(catalog: TypeCatalog) {
		let keys = catalog.assignable_keys(TypeKey::of::<MemoryStore>());

		assert_eq!(
			keys,
			vec![TypeKey::of::<MemoryStore>(), TypeKey::of::<dyn Store>()]
		);
		assert!(catalog.is_assignable(TypeKey::of::<MemoryStore>(), TypeKey::of::<dyn Store>()));
		assert!(!catalog.is_assignable(TypeKey::of::<dyn Store>(), TypeKey::of::<MemoryStore>()));
	}

	#[rstest]
	fn upcast_shares_the_allocation(catalog: TypeCatalog) {
		// Arrange
		let instance = Instance::new(MemoryStore);

		// Act
		let upcast = catalog
			.upcast(&instance, TypeKey::of::<dyn Store>())
			.unwrap();

		// Assert
		assert!(Instance::same(&instance, &upcast));
		assert_eq!(upcast.downcast::<dyn Store>().unwrap().name(), "memory");
	}

	#[rstest]
	fn constructor_builds_from_arguments(catalog: TypeCatalog) {
		// Arrange
		let store: Arc<dyn Store> = Arc::new(MemoryStore);
		let ctor = catalog
			.primary_constructor(TypeKey::of::<Service>())
			.unwrap()
			.unwrap();

		// Act
		let built = ctor.invoke(&[Instance::from_arc(store)]).unwrap();

		// Assert
		let service = built.downcast::<Service>().unwrap();
		assert_eq!(service.store.name(), "memory");
	}
}
