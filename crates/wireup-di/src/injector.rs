//! Injection passes over a target.
//!
//! A pass plans the slot order, seeds a fresh [`TypeRegistry`] with external
//! bindings and every slot that already holds a value (pre-supplied doubles
//! included), then resolves the remaining slots in order.
//! Constructor parameters come from the registry first and are otherwise
//! constructed on demand; on-demand intermediates are registered too, which is
//! what makes converging branches share one instance.
//!
//! Values are staged and written to the target only once every slot has
//! resolved. A failed pass leaves the target exactly as it found it.

use std::sync::Arc;

use crate::cycle_detection::ResolutionStack;
use crate::{
	Bindings, Constructor, DiError, DiResult, InjectionConfig, Instance, OrderingStrategy, Target,
	TypeCatalog, TypeKey, TypeRegistry,
};

/// Runs injection passes against a shared [`TypeCatalog`].
///
/// An injector holds no per-pass state, so one instance can serve any number
/// of passes, including concurrent passes over different targets.
#[derive(Debug, Clone)]
pub struct Injector {
	catalog: Arc<TypeCatalog>,
	bindings: Bindings,
}

impl Injector {
	pub fn new(catalog: Arc<TypeCatalog>) -> Self {
		Self {
			catalog,
			bindings: Bindings::new(),
		}
	}

	/// External instances seeded into every pass before any slot resolves.
	pub fn with_bindings(mut self, bindings: Bindings) -> Self {
		self.bindings = bindings;
		self
	}

	pub fn catalog(&self) -> &TypeCatalog {
		&self.catalog
	}

	pub fn bindings(&self) -> &Bindings {
		&self.bindings
	}

	/// Injects every slot of `target` in declaration order.
	pub fn init_without_dependency_order(&self, target: &mut Target) -> DiResult<InjectionReport> {
		self.inject(target, OrderingStrategy::DeclarationOrder)
	}

	/// Injects every slot of `target` in stable topological order.
	pub fn init_with_dependency_order(&self, target: &mut Target) -> DiResult<InjectionReport> {
		self.inject(target, OrderingStrategy::DependencyOrder)
	}

	/// Injects with the strategy selected by `config`.
	pub fn init(&self, target: &mut Target, config: &InjectionConfig) -> DiResult<InjectionReport> {
		self.inject(target, config.strategy())
	}

	/// Runs one injection pass over `target`.
	///
	/// # Errors
	///
	/// - [`DiError::MissingDouble`] if a pre-supplied slot is still empty
	/// - [`DiError::CyclicDependency`] for a slot cycle under dependency order,
	///   or a type re-entering its own construction under either strategy
	/// - [`DiError::UnresolvableDependency`] when a type can neither be found
	///   in the registry nor constructed
	/// - [`DiError::AmbiguousConstructor`] and [`DiError::ArgumentMismatch`]
	///   from the catalog and constructors
	///
	/// On error no slot of `target` is modified.
	pub fn inject(
		&self,
		target: &mut Target,
		strategy: OrderingStrategy,
	) -> DiResult<InjectionReport> {
		tracing::debug!(
			target_type = %target.name(),
			%strategy,
			slots = target.len(),
			"starting injection pass"
		);

		match self.run(target, strategy) {
			Ok((staged, report)) => {
				target.commit(staged);
				tracing::debug!(
					target_type = %target.name(),
					%strategy,
					constructed = report.constructed.len(),
					"injection pass complete"
				);
				Ok(report)
			}
			Err(err) => {
				tracing::debug!(
					target_type = %target.name(),
					%strategy,
					error = %err,
					"injection pass failed"
				);
				Err(err)
			}
		}
	}

	fn run(
		&self,
		target: &Target,
		strategy: OrderingStrategy,
	) -> DiResult<(Vec<(usize, Instance)>, InjectionReport)> {
		let catalog = self.catalog.as_ref();

		for slot in target.slots() {
			if slot.is_pre_supplied() && !slot.is_resolved() {
				return Err(DiError::MissingDouble {
					slot: slot.name().to_string(),
					type_name: slot.declared().to_string(),
				});
			}
		}

		let order = strategy.plan(target, catalog)?;

		let mut pass = Pass::new(catalog);
		for instance in self.bindings.iter() {
			pass.registry.bind(instance, catalog);
		}
		for existing in target.slots().iter().filter_map(|slot| slot.value()) {
			pass.registry.bind(existing, catalog);
		}

		let stack = ResolutionStack::with_limit(catalog.len());
		let mut staged = Vec::new();
		let mut realised = Vec::with_capacity(order.len());

		for index in order {
			let slot = &target.slots()[index];
			realised.push(slot.name().to_string());

			if slot.is_resolved() {
				tracing::trace!(slot = slot.name(), "slot already populated");
				continue;
			}

			let declared = slot.declared();
			let constructor = catalog.primary_constructor(declared)?.ok_or_else(|| {
				DiError::UnresolvableDependency {
					type_name: declared.to_string(),
					required_by: target.name().to_string(),
					slot: slot.name().to_string(),
				}
			})?;
			tracing::trace!(slot = slot.name(), slot_type = %declared, "constructing slot");
			let instance = pass.build(constructor, slot.name(), &stack)?;
			pass.registry.bind(&instance, catalog);
			staged.push((index, instance));
		}

		let report = InjectionReport {
			order: realised,
			constructed: pass.constructed,
		};
		Ok((staged, report))
	}
}

/// State owned by a single pass.
struct Pass<'a> {
	catalog: &'a TypeCatalog,
	registry: TypeRegistry,
	constructed: Vec<TypeKey>,
}

impl<'a> Pass<'a> {
	fn new(catalog: &'a TypeCatalog) -> Self {
		Self {
			catalog,
			registry: TypeRegistry::new(),
			constructed: Vec::new(),
		}
	}

	fn build(
		&mut self,
		constructor: &'a Constructor,
		slot: &str,
		stack: &ResolutionStack,
	) -> DiResult<Instance> {
		let owner = constructor.produces();
		let _guard = stack.enter(owner)?;

		let mut values = Vec::with_capacity(constructor.params().len());
		for &param in constructor.params() {
			values.push(self.resolve(param, owner, slot, stack)?);
		}

		let instance = constructor.invoke(&values)?;
		self.constructed.push(owner);
		Ok(instance)
	}

	fn resolve(
		&mut self,
		key: TypeKey,
		owner: TypeKey,
		slot: &str,
		stack: &ResolutionStack,
	) -> DiResult<Instance> {
		if let Some(found) = self.registry.lookup(key) {
			return Ok(found.clone());
		}

		let catalog = self.catalog;
		let Some(constructor) = catalog.primary_constructor(key)? else {
			tracing::debug!(
				slot,
				dependency = %key,
				required_by = %owner,
				"no binding or constructor for dependency"
			);
			return Err(DiError::UnresolvableDependency {
				type_name: key.to_string(),
				required_by: owner.to_string(),
				slot: slot.to_string(),
			});
		};

		tracing::trace!(
			slot,
			dependency = %key,
			required_by = %owner,
			depth = stack.depth(),
			"constructing dependency on demand"
		);
		let instance = self.build(constructor, slot, stack)?;
		self.registry.bind(&instance, catalog);
		Ok(instance)
	}
}

/// What a successful pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
	order: Vec<String>,
	constructed: Vec<TypeKey>,
}

impl InjectionReport {
	/// Slot names in the order they were resolved.
	pub fn order(&self) -> &[String] {
		&self.order
	}

	/// Every construction performed, slots and on-demand intermediates alike,
	/// in completion order.
	pub fn constructed(&self) -> &[TypeKey] {
		&self.constructed
	}

	/// How many times `key` was constructed.
	pub fn constructions_of(&self, key: TypeKey) -> usize {
		self.constructed.iter().filter(|k| **k == key).count()
	}
}
