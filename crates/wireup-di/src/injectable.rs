//! Injectable trait for constructible types

use std::sync::Arc;

use crate::{DiError, DiResult, Instance, TypeKey};

/// A type the engine can construct from already resolved dependencies.
///
/// `dependencies` lists the parameters of the type's primary constructor in
/// declaration order, and `construct` consumes them in the same order through
/// [`Arguments`]. Register implementors with
/// [`TypeCatalogBuilder::register`](crate::TypeCatalogBuilder::register) or
/// [`register_injectable!`](crate::register_injectable).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wireup_di::{Arguments, DiResult, Injectable, TypeKey};
///
/// pub trait Clock: Send + Sync {}
///
/// struct Scheduler {
/// 	clock: Arc<dyn Clock>,
/// }
///
/// impl Injectable for Scheduler {
/// 	fn dependencies() -> Vec<TypeKey> {
/// 		vec![TypeKey::of::<dyn Clock>()]
/// 	}
///
/// 	fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
/// 		Ok(Scheduler { clock: args.next::<dyn Clock>()? })
/// 	}
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
	/// Parameter types of the primary constructor, in declaration order.
	fn dependencies() -> Vec<TypeKey>;

	/// Builds an instance from positional arguments.
	fn construct(args: &mut Arguments<'_>) -> DiResult<Self>;
}

/// Positional constructor arguments handed to a factory.
#[derive(Debug)]
pub struct Arguments<'a> {
	owner: TypeKey,
	values: &'a [Instance],
	position: usize,
}

impl<'a> Arguments<'a> {
	pub(crate) fn new(owner: TypeKey, values: &'a [Instance]) -> Self {
		Self {
			owner,
			values,
			position: 0,
		}
	}

	/// Takes the next argument as `Arc<T>`.
	pub fn next<T: ?Sized + Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
		let position = self.position;
		let value = self
			.values
			.get(position)
			.and_then(|instance| instance.downcast::<T>())
			.ok_or_else(|| DiError::ArgumentMismatch {
				type_name: self.owner.to_string(),
				position,
				expected: TypeKey::of::<T>().to_string(),
			})?;
		self.position += 1;
		Ok(value)
	}

	/// Type being constructed.
	pub fn owner(&self) -> TypeKey {
		self.owner
	}

	/// Arguments not yet taken.
	pub fn remaining(&self) -> usize {
		self.values.len().saturating_sub(self.position)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Owner;

	#[rstest]
	fn next_walks_arguments_in_order() {
		// Arrange
		let values = vec![Instance::new(1u8), Instance::new("two")];
		let mut args = Arguments::new(TypeKey::of::<Owner>(), &values);

		// Act
		let first = args.next::<u8>().unwrap();
		let second = args.next::<&'static str>().unwrap();

		// Assert
		assert_eq!(*first, 1);
		assert_eq!(*second, "two");
		assert_eq!(args.remaining(), 0);
	}

	#[rstest]
	fn wrong_type_reports_position() {
		let values = vec![Instance::new(1u8)];
		let mut args = Arguments::new(TypeKey::of::<Owner>(), &values);

		let err = args.next::<u16>().unwrap_err();

		assert_eq!(
			err,
			DiError::ArgumentMismatch {
				type_name: "Owner".to_string(),
				position: 0,
				expected: "u16".to_string(),
			}
		);
	}

	#[rstest]
	fn reading_past_the_end_is_a_mismatch() {
		let values: Vec<Instance> = Vec::new();
		let mut args = Arguments::new(TypeKey::of::<Owner>(), &values);

		let result = args.next::<u8>();

		assert!(matches!(result, Err(DiError::ArgumentMismatch { position: 0, .. })));
		assert!(args.is_empty());
	}
}
