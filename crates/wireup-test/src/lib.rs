//! # Wireup Test
//!
//! Testing utilities for wireup.
//!
//! ## Features
//!
//! - **Doubles**: the `Repository` leaf interface, its mockall double and a
//!   counting [`MockFactory`](wireup_di::MockFactory)
//! - **Shape fixtures**: independent, wide, linear and diamond targets at
//!   sizes 5 and 20, plus a catalog that can build all of them
//! - **rstest fixtures**: `catalog`, `injector` and `double_factory`
//! - **Logging**: one-time `env_logger` setup for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use wireup_di::Injector;
//! use wireup_test::doubles::DoubleFactory;
//! use wireup_test::fixtures::{Shape, fixture_catalog, seeded_target};
//!
//! let injector = Injector::new(Arc::new(fixture_catalog()));
//! let mut target = seeded_target(Shape::Diamond, 5, &DoubleFactory::new()).unwrap();
//!
//! injector.init_with_dependency_order(&mut target).unwrap();
//! assert!(target.is_fully_populated());
//! ```

pub mod doubles;
pub mod fixtures;
pub mod logging;

pub use doubles::{DoubleFactory, MockRepository, Repository, repository_double};
pub use fixtures::{FixtureError, FixtureResult, Shape, fixture_catalog, seeded_target};
pub use logging::init_test_logging;
