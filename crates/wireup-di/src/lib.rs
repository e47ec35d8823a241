//! # Wireup Dependency Injection
//!
//! Dependency-ordered field injection for test targets.
//!
//! A [`Target`] declares named slots. Some are pre-supplied with test doubles,
//! the rest are built by the engine from constructor signatures recorded in a
//! [`TypeCatalog`]. An [`Injector`] resolves every slot in one pass, either in
//! declaration order or in stable topological order of the slot
//! [`DependencyGraph`].
//!
//! ## Features
//!
//! - **No reflection**: constructor signatures live in an explicit catalog,
//!   filled by hand or through [`register_injectable!`]
//! - **Pass-scoped**: each pass owns its [`TypeRegistry`]; passes share only the
//!   read-only catalog and can run concurrently
//! - **Shared sub-dependencies**: converging branches receive the same instance
//! - **All or nothing**: a failed pass never leaves a target half populated
//! - **Deterministic**: ties in dependency order go to the slot declared first
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wireup_di::prelude::*;
//!
//! pub trait Repository: Send + Sync {
//! 	fn data(&self) -> String;
//! }
//!
//! struct StubRepository;
//!
//! impl Repository for StubRepository {
//! 	fn data(&self) -> String {
//! 		"stub".to_string()
//! 	}
//! }
//!
//! struct UserService {
//! 	repository: Arc<dyn Repository>,
//! }
//!
//! impl Injectable for UserService {
//! 	fn dependencies() -> Vec<TypeKey> {
//! 		vec![TypeKey::of::<dyn Repository>()]
//! 	}
//!
//! 	fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
//! 		Ok(Self { repository: args.next::<dyn Repository>()? })
//! 	}
//! }
//!
//! let catalog = TypeCatalog::builder().register::<UserService>().build();
//! let injector = Injector::new(Arc::new(catalog));
//!
//! let mut target = Target::builder("UserServiceTest")
//! 	.mock::<dyn Repository>("repository")
//! 	.inject::<UserService>("service")
//! 	.build();
//! let stub: Arc<dyn Repository> = Arc::new(StubRepository);
//! target.supply("repository", stub).unwrap();
//!
//! injector.init_with_dependency_order(&mut target).unwrap();
//!
//! let service = target.get::<UserService>("service").unwrap();
//! assert_eq!(service.repository.data(), "stub");
//! ```
//!
//! ## Logging
//!
//! Passes emit `tracing` events: `debug` at pass start, end and failure,
//! `trace` per slot and per on-demand construction. No subscriber is installed
//! by this crate.

pub mod catalog;
pub mod config;
pub mod cycle_detection;
pub mod error;
pub mod graph;
pub mod injectable;
pub mod injector;
pub mod key;
pub mod ordering;
pub mod registry;
pub mod target;

pub use catalog::{Constructor, InjectableRegistration, TypeCatalog, TypeCatalogBuilder};
pub use config::InjectionConfig;
pub use cycle_detection::{MAX_RESOLUTION_DEPTH, ResolutionGuard, ResolutionStack};
pub use error::{DiError, DiResult};
pub use graph::DependencyGraph;
pub use injectable::{Arguments, Injectable};
pub use injector::{InjectionReport, Injector};
pub use key::{Instance, TypeKey};
pub use ordering::OrderingStrategy;
pub use registry::{Bindings, TypeRegistry};
pub use target::{InjectionSlot, MockFactory, SlotOrigin, Target, TargetBuilder};

// Re-export inventory for register_injectable!
pub use inventory;

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::{
		Arguments, Bindings, Constructor, DependencyGraph, DiError, DiResult, Injectable,
		InjectionConfig, InjectionReport, Injector, Instance, MockFactory, OrderingStrategy,
		SlotOrigin, Target, TypeCatalog, TypeKey,
	};
	pub use crate::register_injectable;
}
