//! Pass-scoped detection of recursive construction cycles
//!
//! On-demand construction recurses through constructor parameters. A
//! [`ResolutionStack`] records which types are currently being built so that
//! a type re-entering its own construction is reported instead of recursing
//! forever.
//!
//! ## Features
//!
//! - **O(1) Circular Detection**: lookup in a `HashSet<TypeKey>`
//! - **Pass-scoped**: one stack per injection pass, never shared between threads
//! - **Depth Limiting**: a per-stack limit, [`MAX_RESOLUTION_DEPTH`] unless set
//!   with [`ResolutionStack::with_limit`]
//! - **RAII**: [`ResolutionGuard`] pops its frame when dropped, on success and error alike

use std::cell::RefCell;
use std::collections::HashSet;

use crate::{DiError, DiResult, TypeKey};

/// Default maximum resolution depth of [`ResolutionStack::new`]
pub const MAX_RESOLUTION_DEPTH: usize = 100;

#[derive(Debug, Default)]
struct Frames {
	active: HashSet<TypeKey>,
	path: Vec<TypeKey>,
}

/// Types under construction in the current pass, outermost first.
#[derive(Debug)]
pub struct ResolutionStack {
	frames: RefCell<Frames>,
	limit: usize,
}

impl Default for ResolutionStack {
	fn default() -> Self {
		Self::with_limit(MAX_RESOLUTION_DEPTH)
	}
}

impl ResolutionStack {
	/// A stack limited to [`MAX_RESOLUTION_DEPTH`] nested constructions.
	pub fn new() -> Self {
		Self::default()
	}

	/// A stack limited to `limit` nested constructions.
	///
	/// Injection passes use the number of types in the catalog, which bounds
	/// every acyclic construction chain.
	pub fn with_limit(limit: usize) -> Self {
		Self {
			frames: RefCell::new(Frames::default()),
			limit,
		}
	}

	/// Deepest nesting this stack accepts.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Records the start of constructing `key`.
	///
	/// Fails with [`DiError::CyclicDependency`] when `key` is already being
	/// constructed further up the stack, and with [`DiError::MaxDepthExceeded`]
	/// when the stack is already at its [`limit`](Self::limit).
	///
	/// # Examples
	///
	/// ```
	/// use wireup_di::{DiError, ResolutionStack, TypeKey};
	///
	/// struct A;
	/// struct B;
	///
	/// let stack = ResolutionStack::new();
	/// let _a = stack.enter(TypeKey::of::<A>()).unwrap();
	/// let _b = stack.enter(TypeKey::of::<B>()).unwrap();
	///
	/// let err = stack.enter(TypeKey::of::<A>()).unwrap_err();
	/// assert_eq!(err.to_string(), "circular dependency detected: A -> B -> A");
	/// ```
	pub fn enter(&self, key: TypeKey) -> DiResult<ResolutionGuard<'_>> {
		let mut frames = self.frames.borrow_mut();
		let depth = frames.path.len() + 1;
		if depth > self.limit {
			return Err(DiError::MaxDepthExceeded(depth));
		}
		if frames.active.contains(&key) {
			return Err(DiError::CyclicDependency {
				cycle: cycle_from(&frames.path, key),
			});
		}
		frames.active.insert(key);
		frames.path.push(key);
		Ok(ResolutionGuard { stack: self, key })
	}

	/// Current nesting depth.
	pub fn depth(&self) -> usize {
		self.frames.borrow().path.len()
	}

	/// Types under construction, outermost first.
	pub fn path(&self) -> Vec<TypeKey> {
		self.frames.borrow().path.clone()
	}

	pub fn is_resolving(&self, key: TypeKey) -> bool {
		self.frames.borrow().active.contains(&key)
	}

	fn exit(&self, key: TypeKey) {
		let mut frames = self.frames.borrow_mut();
		frames.active.remove(&key);
		if let Some(pos) = frames.path.iter().rposition(|k| *k == key) {
			frames.path.remove(pos);
		}
	}
}

/// Cycle members from the first occurrence of `key` to the top of the stack.
fn cycle_from(path: &[TypeKey], key: TypeKey) -> Vec<String> {
	let start = path.iter().position(|k| *k == key).unwrap_or(0);
	path[start..].iter().map(TypeKey::to_string).collect()
}

/// RAII guard: pops its type from the stack on drop.
#[derive(Debug)]
pub struct ResolutionGuard<'a> {
	stack: &'a ResolutionStack,
	key: TypeKey,
}

impl ResolutionGuard<'_> {
	/// The type this guard tracks.
	pub fn key(&self) -> TypeKey {
		self.key
	}
}

impl Drop for ResolutionGuard<'_> {
	fn drop(&mut self) {
		self.stack.exit(self.key);
	}
}
