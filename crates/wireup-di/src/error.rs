//! Injection error types.
//!
//! Every variant describes a failure of test setup rather than a transient
//! condition, so nothing here is retried. Each error carries the offending
//! type and the slot or owner that needed it.

use thiserror::Error;

/// Result type for injection operations.
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised while planning or running an injection pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiError {
	/// A constructor parameter has no satisfying slot, registry entry or external binding.
	#[error("cannot resolve dependency {type_name} required by {required_by} (slot '{slot}')")]
	UnresolvableDependency {
		/// The type that could not be satisfied.
		type_name: String,
		/// The type (or slot) whose constructor asked for it.
		required_by: String,
		/// The slot being resolved when the failure happened.
		slot: String,
	},

	/// The slots (or types) form a dependency cycle.
	#[error("circular dependency detected: {}", format_cycle(.cycle))]
	CyclicDependency {
		/// Cycle members in edge order; the first member closes the cycle.
		cycle: Vec<String>,
	},

	/// A type exposes several constructors and none is marked primary.
	#[error("type {type_name} has {candidates} constructors and no single primary constructor")]
	AmbiguousConstructor {
		/// The type with conflicting constructors.
		type_name: String,
		/// Number of registered constructors.
		candidates: usize,
	},

	/// A constructor pulled an argument of the wrong type or past the end of its arguments.
	#[error("constructor of {type_name} expected {expected} at parameter {position}")]
	ArgumentMismatch {
		/// The type being constructed.
		type_name: String,
		/// Zero-based parameter position.
		position: usize,
		/// The type the constructor asked for.
		expected: String,
	},

	/// A pre-supplied slot has no test double when the pass starts.
	#[error("slot '{slot}' expects a test double of {type_name} but none was supplied")]
	MissingDouble {
		/// Slot name.
		slot: String,
		/// Declared slot type.
		type_name: String,
	},

	/// A supplied value is not of the slot's declared type.
	#[error("slot '{slot}' is declared as {expected} but was given {found}")]
	IncompatibleValue {
		/// Slot name.
		slot: String,
		/// Declared slot type.
		expected: String,
		/// Type of the supplied value.
		found: String,
	},

	/// The target has no slot with the given name.
	#[error("target '{target}' has no slot named '{slot}'")]
	UnknownSlot {
		/// Target name.
		target: String,
		/// Requested slot name.
		slot: String,
	},

	/// Recursive construction went deeper than the resolution limit.
	#[error(
		"maximum resolution depth exceeded: {0}\nThis likely indicates an extremely deep or circular dependency chain."
	)]
	MaxDepthExceeded(usize),

	/// The injection configuration could not be parsed.
	#[error("invalid injection configuration: {0}")]
	InvalidConfig(String),
}

impl From<toml::de::Error> for DiError {
	fn from(err: toml::de::Error) -> Self {
		Self::InvalidConfig(err.to_string())
	}
}

fn format_cycle(cycle: &[String]) -> String {
	match cycle.first() {
		Some(first) => format!("{} -> {}", cycle.join(" -> "), first),
		None => String::from("<empty cycle>"),
	}
}
