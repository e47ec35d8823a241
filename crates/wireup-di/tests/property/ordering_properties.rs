//! Property-based tests for slot ordering
//!
//! Random acyclic slot graphs, declared in random order, must satisfy:
//! 1. Edge order - every dependency resolves before its dependent
//! 2. Stable tie-break - the ready slot declared first always goes next
//! 3. Edge fidelity - the graph has an edge exactly where a parameter matches
//! 4. Completeness - both strategies populate every slot

use std::sync::Arc;

use proptest::prelude::*;
use wireup_di::{
	Constructor, DependencyGraph, InjectionSlot, Injector, OrderingStrategy, SlotOrigin, Target,
	TypeCatalog, TypeKey,
};

const MAX_NODES: usize = 12;

struct Node<const K: usize>;

macro_rules! nodes {
	($($k:literal),+) => {
		fn node_key(index: usize) -> TypeKey {
			match index {
				$($k => TypeKey::of::<Node<$k>>(),)+
				_ => unreachable!("node index out of range"),
			}
		}

		fn node_constructor(index: usize, params: Vec<TypeKey>) -> Constructor {
			match index {
				$($k => Constructor::new(params, |_| Ok(Node::<$k>)),)+
				_ => unreachable!("node index out of range"),
			}
		}
	};
}

nodes!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

/// A random DAG over node types, plus the order their slots are declared in.
///
/// Type `a` may only depend on types with a lower index, which keeps the
/// graph acyclic whatever the declaration order.
#[derive(Debug, Clone)]
struct RandomDag {
	declared: Vec<usize>,
	deps: Vec<Vec<usize>>,
}

impl RandomDag {
	fn catalog(&self) -> TypeCatalog {
		let mut builder = TypeCatalog::builder();
		for (node, deps) in self.deps.iter().enumerate() {
			let params = deps.iter().map(|&dep| node_key(dep)).collect();
			builder.insert_constructor(node_constructor(node, params));
		}
		builder.build()
	}

	fn target(&self) -> Target {
		self.declared
			.iter()
			.enumerate()
			.fold(Target::builder("Random"), |builder, (slot, &node)| {
				builder.slot(InjectionSlot::new(
					format!("s{slot}"),
					node_key(node),
					SlotOrigin::Constructed,
				))
			})
			.build()
	}
}

fn dags() -> impl Strategy<Value = RandomDag> {
	(1usize..=MAX_NODES)
		.prop_flat_map(|n| {
			(
				Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
				prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
			)
		})
		.prop_map(|(declared, bits)| {
			let deps = (0..declared.len())
				.map(|node| (0..node).filter(|&dep| bits[node][dep]).collect())
				.collect();
			RandomDag { declared, deps }
		})
}

fn positions(order: &[usize]) -> Vec<usize> {
	let mut positions = vec![0; order.len()];
	for (position, &slot) in order.iter().enumerate() {
		positions[slot] = position;
	}
	positions
}

proptest! {
	#[test]
	fn prop_dependencies_resolve_first(dag in dags()) {
		let catalog = dag.catalog();
		let target = dag.target();
		let graph = DependencyGraph::build(&target, &catalog).unwrap();

		let order = OrderingStrategy::DependencyOrder.plan(&target, &catalog).unwrap();

		let positions = positions(&order);
		for (from, to) in graph.edges() {
			prop_assert!(positions[from] < positions[to], "edge {from} -> {to} violated");
		}
	}

	#[test]
	fn prop_ready_slot_declared_first_goes_next(dag in dags()) {
		let catalog = dag.catalog();
		let target = dag.target();
		let graph = DependencyGraph::build(&target, &catalog).unwrap();

		let order = OrderingStrategy::DependencyOrder.plan(&target, &catalog).unwrap();

		let mut placed = vec![false; order.len()];
		for &next in &order {
			let lowest_ready = (0..placed.len())
				.find(|&slot| {
					!placed[slot] && graph.dependencies(slot).iter().all(|&dep| placed[dep])
				});
			prop_assert_eq!(Some(next), lowest_ready);
			placed[next] = true;
		}
	}

	#[test]
	fn prop_edges_follow_constructor_parameters(dag in dags()) {
		let catalog = dag.catalog();
		let target = dag.target();

		let graph = DependencyGraph::build(&target, &catalog).unwrap();

		for (from, &from_node) in dag.declared.iter().enumerate() {
			for (to, &to_node) in dag.declared.iter().enumerate() {
				let expected = dag.deps[to_node].contains(&from_node);
				prop_assert_eq!(graph.has_edge(from, to), expected);
			}
		}
	}

	#[test]
	fn prop_both_strategies_populate_every_slot(dag in dags()) {
		let injector = Injector::new(Arc::new(dag.catalog()));

		for strategy in [OrderingStrategy::DeclarationOrder, OrderingStrategy::DependencyOrder] {
			let mut target = dag.target();

			let report = injector.inject(&mut target, strategy).unwrap();

			prop_assert!(target.is_fully_populated());
			prop_assert_eq!(report.order().len(), dag.declared.len());
		}
	}

	#[test]
	fn prop_planning_is_deterministic(dag in dags()) {
		let catalog = dag.catalog();
		let target = dag.target();

		let first = OrderingStrategy::DependencyOrder.plan(&target, &catalog).unwrap();
		let second = OrderingStrategy::DependencyOrder.plan(&target, &catalog).unwrap();

		prop_assert_eq!(first, second);
	}
}
