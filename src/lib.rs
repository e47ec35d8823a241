//! # Wireup
//!
//! Field injection for test targets, ordered by the dependencies between
//! their slots.
//!
//! A target declares named slots. Some hold doubles supplied up front, the
//! rest are built from the types' primary constructors. The injector either
//! walks slots in declaration order, building missing dependencies on demand,
//! or first plans a dependency order so that every slot a constructor needs
//! is already populated when it runs.
//!
//! ## Feature Flags
//!
//! - `di` (default) - The injection engine, re-exported as [`di`]
//! - `test` - Doubles, shape fixtures and test logging, re-exported as `test`
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wireup::di::Injector;
//! use wireup::test::{DoubleFactory, Shape, fixture_catalog, seeded_target};
//!
//! let injector = Injector::new(Arc::new(fixture_catalog()));
//! let mut target = seeded_target(Shape::Wide, 20, &DoubleFactory::new())?;
//! let report = injector.init_with_dependency_order(&mut target)?;
//! assert_eq!(report.order().last().map(String::as_str), Some("root"));
//! ```

#[cfg(feature = "di")]
pub mod di;

// Re-export the injection entry points
#[cfg(feature = "di")]
pub use wireup_di::{
	DiError, DiResult, InjectionConfig, InjectionReport, Injector, OrderingStrategy, Target,
	TypeCatalog,
};
