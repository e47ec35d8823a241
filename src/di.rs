//! Dependency-ordered field injection.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wireup::di::{Injector, OrderingStrategy, Target, TypeCatalog};
//! ```

#[cfg(feature = "di")]
pub use wireup_di::*;
