//! Injection targets and their slots.
//!
//! A [`Target`] is the object under injection: an ordered list of named
//! slots. Slot order is declaration order and is the tie-break baseline for
//! every ordering strategy. Whatever builds the target plays the role of the
//! slot discovery collaborator; the engine never inspects struct fields.

use std::sync::Arc;

use crate::{DiError, DiResult, Instance, TypeKey};

/// How a slot gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
	/// Filled before the pass, typically with a test double.
	PreSupplied,
	/// Built by the engine from its constructor dependencies.
	Constructed,
}

/// One field on a target awaiting a value.
#[derive(Debug, Clone)]
pub struct InjectionSlot {
	name: String,
	declared: TypeKey,
	origin: SlotOrigin,
	value: Option<Instance>,
}

impl InjectionSlot {
	pub fn new(name: impl Into<String>, declared: TypeKey, origin: SlotOrigin) -> Self {
		Self {
			name: name.into(),
			declared,
			origin,
			value: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The slot's declared type.
	pub fn declared(&self) -> TypeKey {
		self.declared
	}

	pub fn origin(&self) -> SlotOrigin {
		self.origin
	}

	pub fn value(&self) -> Option<&Instance> {
		self.value.as_ref()
	}

	pub fn is_pre_supplied(&self) -> bool {
		self.origin == SlotOrigin::PreSupplied
	}

	/// Whether the slot already holds a value.
	pub fn is_resolved(&self) -> bool {
		self.value.is_some()
	}
}

/// Creates test doubles for leaf types.
///
/// Called only before a pass (see [`Target::seed_doubles`]), never during one.
pub trait MockFactory {
	/// A fresh double of `key`, or `None` if this factory cannot make one.
	fn create(&self, key: TypeKey) -> Option<Instance>;
}

/// The object under injection.
#[derive(Debug, Clone)]
pub struct Target {
	name: String,
	slots: Vec<InjectionSlot>,
}

impl Target {
	/// Starts describing a target.
	///
	/// # Examples
	///
	/// ```
	/// use wireup_di::{SlotOrigin, Target};
	///
	/// trait Repository: Send + Sync {}
	/// struct Service;
	///
	/// let target = Target::builder("ServiceTest")
	/// 	.mock::<dyn Repository>("repository")
	/// 	.inject::<Service>("service")
	/// 	.build();
	/// assert_eq!(target.len(), 2);
	/// assert_eq!(target.slots()[0].origin(), SlotOrigin::PreSupplied);
	/// ```
	pub fn builder(name: impl Into<String>) -> TargetBuilder {
		TargetBuilder {
			name: name.into(),
			slots: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Slots in declaration order.
	pub fn slots(&self) -> &[InjectionSlot] {
		&self.slots
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	pub fn slot(&self, name: &str) -> Option<&InjectionSlot> {
		self.slots.iter().find(|slot| slot.name == name)
	}

	/// Declaration index of the slot called `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.slots.iter().position(|slot| slot.name == name)
	}

	/// The value of slot `name` as `Arc<T>`.
	pub fn get<T: ?Sized + 'static>(&self, name: &str) -> Option<Arc<T>> {
		self.slot(name)?.value.as_ref()?.downcast::<T>()
	}

	/// Whether every slot holds a value.
	pub fn is_fully_populated(&self) -> bool {
		self.slots.iter().all(InjectionSlot::is_resolved)
	}

	/// Puts a ready-made value into slot `name`.
	///
	/// The value must be stored as the slot's declared type exactly; catalog
	/// assignability is not consulted here. For a `dyn Trait` slot, pass an
	/// `Arc<dyn Trait>` (or name the type, `supply::<dyn Trait>(..)`, and let
	/// the concrete `Arc` coerce).
	///
	/// # Errors
	///
	/// [`DiError::UnknownSlot`] when the target has no such slot and
	/// [`DiError::IncompatibleValue`] when the value is stored as another type.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use wireup_di::{DiError, Target};
	///
	/// trait Repository: Send + Sync {}
	/// struct InMemory;
	/// impl Repository for InMemory {}
	///
	/// let mut target = Target::builder("T").mock::<dyn Repository>("repository").build();
	///
	/// let concrete = target.supply("repository", Arc::new(InMemory));
	/// assert!(matches!(concrete, Err(DiError::IncompatibleValue { .. })));
	///
	/// target.supply::<dyn Repository>("repository", Arc::new(InMemory)).unwrap();
	/// assert!(target.is_fully_populated());
	/// ```
	pub fn supply<T: ?Sized + Send + Sync + 'static>(
		&mut self,
		name: &str,
		value: Arc<T>,
	) -> DiResult<()> {
		self.supply_instance(name, Instance::from_arc(value))
	}

	/// Untyped form of [`supply`](Self::supply).
	pub fn supply_instance(&mut self, name: &str, value: Instance) -> DiResult<()> {
		let target = &self.name;
		let slot = self
			.slots
			.iter_mut()
			.find(|slot| slot.name == name)
			.ok_or_else(|| DiError::UnknownSlot {
				target: target.clone(),
				slot: name.to_string(),
			})?;
		check_value(slot, &value)?;
		slot.value = Some(value);
		Ok(())
	}

	/// Fills every empty pre-supplied slot with a double from `factory`.
	///
	/// Slots the factory cannot serve stay empty. Returns how many slots were
	/// filled.
	pub fn seed_doubles(&mut self, factory: &dyn MockFactory) -> DiResult<usize> {
		let mut seeded = 0;
		for slot in &mut self.slots {
			if !slot.is_pre_supplied() || slot.is_resolved() {
				continue;
			}
			if let Some(double) = factory.create(slot.declared) {
				check_value(slot, &double)?;
				slot.value = Some(double);
				seeded += 1;
			}
		}
		tracing::trace!(target_type = %self.name, seeded, "seeded test doubles");
		Ok(seeded)
	}

	pub(crate) fn commit(&mut self, values: Vec<(usize, Instance)>) {
		for (index, value) in values {
			if let Some(slot) = self.slots.get_mut(index) {
				slot.value = Some(value);
			}
		}
	}
}

fn check_value(slot: &InjectionSlot, value: &Instance) -> DiResult<()> {
	if value.key() == slot.declared {
		Ok(())
	} else {
		Err(DiError::IncompatibleValue {
			slot: slot.name.clone(),
			expected: slot.declared.to_string(),
			found: value.key().to_string(),
		})
	}
}

/// Builder for [`Target`]; slots keep the order they are added in.
#[derive(Debug)]
pub struct TargetBuilder {
	name: String,
	slots: Vec<InjectionSlot>,
}

impl TargetBuilder {
	/// Adds a slot filled before the pass with a double of `T`.
	pub fn mock<T: ?Sized + 'static>(self, name: impl Into<String>) -> Self {
		self.slot(InjectionSlot::new(name, TypeKey::of::<T>(), SlotOrigin::PreSupplied))
	}

	/// Adds a slot the engine constructs as a `T`.
	pub fn inject<T: ?Sized + 'static>(self, name: impl Into<String>) -> Self {
		self.slot(InjectionSlot::new(name, TypeKey::of::<T>(), SlotOrigin::Constructed))
	}

	pub fn slot(mut self, slot: InjectionSlot) -> Self {
		self.slots.push(slot);
		self
	}

	pub fn build(self) -> Target {
		Target {
			name: self.name,
			slots: self.slots,
		}
	}
}
