//! Slot ordering strategies.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DependencyGraph, DiError, DiResult, Target, TypeCatalog};

/// Policy deciding the order in which a pass resolves slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
	/// Slots in the order they were declared on the target. No graph is built.
	#[default]
	DeclarationOrder,
	/// Stable topological order of the slot dependency graph.
	DependencyOrder,
}

impl OrderingStrategy {
	/// Slot indices of `target` in resolution order.
	///
	/// # Errors
	///
	/// Under [`DependencyOrder`](Self::DependencyOrder), a cycle among slots
	/// fails with [`DiError::CyclicDependency`] naming the slots involved.
	pub fn plan(self, target: &Target, catalog: &TypeCatalog) -> DiResult<Vec<usize>> {
		match self {
			Self::DeclarationOrder => Ok(declaration_order(target)),
			Self::DependencyOrder => {
				let graph = DependencyGraph::build(target, catalog)?;
				topological_order(&graph)
			}
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::DeclarationOrder => "declaration_order",
			Self::DependencyOrder => "dependency_order",
		}
	}
}

impl fmt::Display for OrderingStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// `0..target.len()`.
pub fn declaration_order(target: &Target) -> Vec<usize> {
	(0..target.len()).collect()
}

/// Kahn's algorithm with a min-heap on declaration index.
///
/// Among slots whose dependencies are all placed, the one declared first goes
/// next, so identical inputs always produce identical orders.
///
/// # Examples
///
/// ```
/// use wireup_di::{DependencyGraph, Target, TypeCatalog};
/// use wireup_di::ordering::topological_order;
///
/// let target = Target::builder("T").inject::<u8>("a").inject::<u16>("b").build();
/// let graph = DependencyGraph::build(&target, &TypeCatalog::default()).unwrap();
///
/// assert_eq!(topological_order(&graph).unwrap(), vec![0, 1]);
/// ```
pub fn topological_order(graph: &DependencyGraph) -> DiResult<Vec<usize>> {
	let n = graph.len();
	let mut in_degree: Vec<usize> = (0..n).map(|i| graph.dependencies(i).len()).collect();
	let mut ready: BinaryHeap<Reverse<usize>> = in_degree
		.iter()
		.enumerate()
		.filter(|(_, degree)| **degree == 0)
		.map(|(i, _)| Reverse(i))
		.collect();
	let mut order = Vec::with_capacity(n);

	while let Some(Reverse(next)) = ready.pop() {
		order.push(next);
		for &dependent in graph.dependents(next) {
			in_degree[dependent] -= 1;
			if in_degree[dependent] == 0 {
				ready.push(Reverse(dependent));
			}
		}
	}

	if order.len() < n {
		let placed: Vec<bool> = {
			let mut placed = vec![false; n];
			for &i in &order {
				placed[i] = true;
			}
			placed
		};
		let cycle = find_cycle(graph, &placed)
			.into_iter()
			.filter_map(|i| graph.slot_name(i).map(str::to_string))
			.collect();
		return Err(DiError::CyclicDependency { cycle });
	}

	Ok(order)
}

/// One cycle among the slots left unplaced by the sort, in edge order,
/// starting from its lowest index.
///
/// Every unplaced slot still has an unplaced dependency, so walking backwards
/// along dependencies from any of them must revisit a slot.
fn find_cycle(graph: &DependencyGraph, placed: &[bool]) -> Vec<usize> {
	let Some(start) = placed.iter().position(|done| !done) else {
		return Vec::new();
	};
	let mut seen_at = vec![None; placed.len()];
	let mut walk = Vec::new();
	let mut current = start;

	let loop_start = loop {
		if let Some(at) = seen_at[current] {
			break at;
		}
		seen_at[current] = Some(walk.len());
		walk.push(current);
		match graph
			.dependencies(current)
			.iter()
			.copied()
			.find(|&dep| !placed[dep])
		{
			Some(dep) => current = dep,
			None => return Vec::new(),
		}
	};

	let mut cycle = walk.split_off(loop_start);
	cycle.reverse();
	if let Some(lowest) = cycle
		.iter()
		.enumerate()
		.min_by_key(|(_, index)| **index)
		.map(|(pos, _)| pos)
	{
		cycle.rotate_left(lowest);
	}
	cycle
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Arguments, Injectable, TypeKey};
	use rstest::*;

	macro_rules! node {
		($name:ident $(, $dep:ident)*) => {
			struct $name;

			impl Injectable for $name {
				fn dependencies() -> Vec<TypeKey> {
					vec![$(TypeKey::of::<$dep>()),*]
				}

				fn construct(_args: &mut Arguments<'_>) -> DiResult<Self> {
					$(_args.next::<$dep>()?;)*
					Ok($name)
				}
			}
		};
	}

	node!(A);
	node!(B, A);
	node!(C, A);
	node!(D, B, C);
	node!(X, Y);
	node!(Y, Z);
	node!(Z, X);

	#[fixture]
	fn catalog() -> TypeCatalog {
		TypeCatalog::builder()
			.register::<A>()
			.register::<B>()
			.register::<C>()
			.register::<D>()
			.register::<X>()
			.register::<Y>()
			.register::<Z>()
			.build()
	}

	#[rstest]
	fn declaration_order_ignores_dependencies(catalog: TypeCatalog) {
		let target = Target::builder("T").inject::<D>("d").inject::<A>("a").build();

		let order = OrderingStrategy::DeclarationOrder.plan(&target, &catalog).unwrap();

		assert_eq!(order, vec![0, 1]);
	}

	#[rstest]
	fn dependency_order_places_dependencies_first(catalog: TypeCatalog) {
		// Arrange: diamond declared in reverse
		let target = Target::builder("T")
			.inject::<D>("d")
			.inject::<C>("c")
			.inject::<B>("b")
			.inject::<A>("a")
			.build();

		// Act
		let order = OrderingStrategy::DependencyOrder.plan(&target, &catalog).unwrap();

		// Assert: b and c tie after a, declaration order puts c first
		assert_eq!(order, vec![3, 1, 2, 0]);
	}

	#[rstest]
	fn three_slot_cycle_is_reported(catalog: TypeCatalog) {
		// Arrange: a manufactured cycle x -> z -> y -> x
		let target = Target::builder("T")
			.inject::<X>("x")
			.inject::<Y>("y")
			.inject::<Z>("z")
			.build();

		// Act
		let result = OrderingStrategy::DependencyOrder.plan(&target, &catalog);

		// Assert: X needs Y, so y resolves before x; Z needs X; Y needs Z
		assert_eq!(
			result.unwrap_err(),
			DiError::CyclicDependency {
				cycle: vec!["x".to_string(), "z".to_string(), "y".to_string()],
			}
		);
	}

	#[rstest]
	fn slots_outside_the_cycle_do_not_appear_in_it(catalog: TypeCatalog) {
		let target = Target::builder("T")
			.inject::<A>("a")
			.inject::<X>("x")
			.inject::<Y>("y")
			.inject::<Z>("z")
			.build();

		let err = OrderingStrategy::DependencyOrder
			.plan(&target, &catalog)
			.unwrap_err();

		let DiError::CyclicDependency { cycle } = &err else {
			panic!("expected a cycle, got {err:?}");
		};
		assert!(!cycle.contains(&"a".to_string()));
		assert_eq!(cycle.len(), 3);
	}

	#[rstest]
	#[case(OrderingStrategy::DeclarationOrder, "declaration_order")]
	#[case(OrderingStrategy::DependencyOrder, "dependency_order")]
	fn strategy_names(#[case] strategy: OrderingStrategy, #[case] expected: &str) {
		assert_eq!(strategy.to_string(), expected);
	}

	#[rstest]
	fn default_is_declaration_order() {
		assert_eq!(OrderingStrategy::default(), OrderingStrategy::DeclarationOrder);
	}
}
