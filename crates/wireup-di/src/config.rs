//! Injection pass configuration.
//!
//! The only recognised option selects the ordering strategy:
//!
//! ```toml
//! use_dependency_order = true
//! ```
//!
//! `useDependencyOrder` is accepted as an alias.

use serde::{Deserialize, Serialize};

use crate::{DiResult, OrderingStrategy};

/// Options for an injection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InjectionConfig {
	/// Resolve slots in dependency order instead of declaration order.
	#[serde(alias = "useDependencyOrder")]
	pub use_dependency_order: bool,
}

impl InjectionConfig {
	/// Configuration selecting dependency order.
	pub fn dependency_order() -> Self {
		Self {
			use_dependency_order: true,
		}
	}

	/// Parses a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use wireup_di::{InjectionConfig, OrderingStrategy};
	///
	/// let config = InjectionConfig::from_toml_str("useDependencyOrder = true").unwrap();
	/// assert_eq!(config.strategy(), OrderingStrategy::DependencyOrder);
	/// ```
	pub fn from_toml_str(source: &str) -> DiResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn strategy(&self) -> OrderingStrategy {
		if self.use_dependency_order {
			OrderingStrategy::DependencyOrder
		} else {
			OrderingStrategy::DeclarationOrder
		}
	}
}

impl From<OrderingStrategy> for InjectionConfig {
	fn from(strategy: OrderingStrategy) -> Self {
		Self {
			use_dependency_order: strategy == OrderingStrategy::DependencyOrder,
		}
	}
}
