//! Shape fixtures and rstest fixtures for injection tests.

use std::sync::Arc;

use rstest::*;
use wireup_di::{DiError, Injector, Target, TypeCatalog};

use crate::doubles::{DoubleFactory, MockRepository, Repository};

pub mod components;
pub mod shapes;

pub use shapes::{SUPPORTED_SIZES, Shape, reversed_linear_target};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
	#[error("Unsupported size: {size} for shape {shape}")]
	UnsupportedSize { shape: Shape, size: usize },
	#[error("Unsupported shape: {0}")]
	UnknownShape(String),
	#[error(transparent)]
	Injection(#[from] DiError),
}

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Catalog knowing every component of every shape.
///
/// A concrete [`MockRepository`] is declared assignable to `dyn Repository`,
/// so it can be bound directly as well as through [`DoubleFactory`].
pub fn fixture_catalog() -> TypeCatalog {
	let mut builder = TypeCatalog::builder()
		.assignable::<MockRepository, dyn Repository, _>(|mock| mock as Arc<dyn Repository>);
	components::register_components(&mut builder);
	builder.build()
}

/// A target of `shape` and `size` with its repository double already seeded.
pub fn seeded_target(shape: Shape, size: usize, factory: &DoubleFactory) -> FixtureResult<Target> {
	let mut target = shape.target(size)?;
	target.seed_doubles(factory)?;
	Ok(target)
}

/// Fixture providing the shared fixture catalog
#[fixture]
pub fn catalog() -> Arc<TypeCatalog> {
	Arc::new(fixture_catalog())
}

/// Fixture providing an injector over [`catalog`]
#[fixture]
pub fn injector(catalog: Arc<TypeCatalog>) -> Injector {
	Injector::new(catalog)
}

/// Fixture providing a fresh double factory
#[fixture]
pub fn double_factory() -> DoubleFactory {
	DoubleFactory::new()
}

#[cfg(test)]
mod tests {
	use super::*;
	use wireup_di::TypeKey;

	#[rstest]
	fn catalog_knows_every_slot_type(catalog: Arc<TypeCatalog>) {
		for shape in Shape::ALL {
			for size in SUPPORTED_SIZES {
				let target = shape.target(size).unwrap();
				for slot in &target.slots()[1..] {
					assert!(
						catalog
							.constructor_parameters(slot.declared())
							.unwrap()
							.is_some(),
						"{} has no constructor",
						slot.declared()
					);
				}
			}
		}
	}

	#[rstest]
	fn wide_root_takes_nineteen_parameters(catalog: Arc<TypeCatalog>) {
		let params = catalog
			.constructor_parameters(TypeKey::of::<components::WideRoot20>())
			.unwrap()
			.unwrap();

		assert_eq!(params.len(), 19);
		assert_eq!(params[0], TypeKey::of::<components::Wide01>());
		assert_eq!(params[18], TypeKey::of::<components::Wide19>());
	}

	#[rstest]
	fn seeded_target_has_its_double(double_factory: DoubleFactory) {
		// Act
		let target = seeded_target(Shape::Wide, 5, &double_factory).unwrap();

		// Assert
		assert_eq!(double_factory.created(), 1);
		assert!(target.get::<dyn Repository>("repository").is_some());
	}
}
