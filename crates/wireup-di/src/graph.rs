//! Slot dependency graph
//!
//! An edge `X -> Y` means slot `X` must resolve before slot `Y` because a
//! constructor parameter of `Y`'s declared type is satisfied by `X`'s declared
//! type. Edges come purely from pairwise assignability, so fan-in, fan-out,
//! chains and diamonds all fall out without special cases. Constructor
//! parameters with no matching slot produce no edge; the injector resolves
//! those from the registry or by on-demand construction.
//!
//! ## Example
//!
//! ```rust
//! use wireup_di::{DependencyGraph, Target, TypeCatalog};
//!
//! let catalog = TypeCatalog::builder().build();
//! let target = Target::builder("Empty").build();
//!
//! let graph = DependencyGraph::build(&target, &catalog).unwrap();
//! assert!(graph.is_empty());
//! assert!(graph.to_dot().starts_with("digraph"));
//! ```

use crate::{DiResult, InjectionSlot, SlotOrigin, Target, TypeCatalog};

#[derive(Debug, Clone)]
struct Node {
	name: String,
	type_name: String,
	origin: SlotOrigin,
	dependencies: Vec<usize>,
	dependents: Vec<usize>,
}

/// Dependency edges between the slots of one target, indexed by declaration order.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
	nodes: Vec<Node>,
	edge_count: usize,
}

impl DependencyGraph {
	/// Builds the graph for `target`.
	///
	/// Pre-supplied slots and slots that already hold a value take no part in
	/// ordering: they are in the registry before the first slot resolves, so
	/// they get no edges at all. Fails only when a slot's type has an
	/// ambiguous constructor.
	pub fn build(target: &Target, catalog: &TypeCatalog) -> DiResult<Self> {
		let slots = target.slots();
		let mut nodes: Vec<Node> = slots
			.iter()
			.map(|slot| Node {
				name: slot.name().to_string(),
				type_name: slot.declared().to_string(),
				origin: slot.origin(),
				dependencies: Vec::new(),
				dependents: Vec::new(),
			})
			.collect();
		let mut edge_count = 0;

		for (to, slot) in slots.iter().enumerate() {
			if is_settled(slot) {
				continue;
			}
			let Some(params) = catalog.constructor_parameters(slot.declared())? else {
				continue;
			};
			for (from, candidate) in slots.iter().enumerate() {
				if from == to || is_settled(candidate) {
					continue;
				}
				let satisfies = params
					.iter()
					.any(|param| catalog.is_assignable(candidate.declared(), *param));
				if satisfies {
					nodes[to].dependencies.push(from);
					nodes[from].dependents.push(to);
					edge_count += 1;
				}
			}
		}

		tracing::trace!(
			target_type = %target.name(),
			slots = nodes.len(),
			edges = edge_count,
			"built dependency graph"
		);
		Ok(Self { nodes, edge_count })
	}

	/// Number of slots.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn slot_name(&self, index: usize) -> Option<&str> {
		self.nodes.get(index).map(|node| node.name.as_str())
	}

	/// Slots that must resolve after `index`, ascending.
	pub fn dependents(&self, index: usize) -> &[usize] {
		self.nodes
			.get(index)
			.map_or(&[], |node| node.dependents.as_slice())
	}

	/// Slots that must resolve before `index`, ascending.
	pub fn dependencies(&self, index: usize) -> &[usize] {
		self.nodes
			.get(index)
			.map_or(&[], |node| node.dependencies.as_slice())
	}

	/// Every edge as `(from, to)`, sorted.
	pub fn edges(&self) -> Vec<(usize, usize)> {
		let mut edges: Vec<_> = self
			.nodes
			.iter()
			.enumerate()
			.flat_map(|(from, node)| node.dependents.iter().map(move |&to| (from, to)))
			.collect();
		edges.sort_unstable();
		edges
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn has_edge(&self, from: usize, to: usize) -> bool {
		self.dependents(from).contains(&to)
	}

	/// Renders the graph in Graphviz DOT format.
	///
	/// Pre-supplied slots are drawn light blue, constructed slots light green.
	pub fn to_dot(&self) -> String {
		let mut output = String::from("digraph DependencyGraph {\n");
		output.push_str("  rankdir=LR;\n");
		output.push_str("  node [shape=box, style=rounded];\n\n");

		for node in &self.nodes {
			let color = match node.origin {
				SlotOrigin::PreSupplied => "lightblue",
				SlotOrigin::Constructed => "lightgreen",
			};
			let name = escape_dot(&node.name);
			output.push_str(&format!(
				"  \"{}\" [label=\"{}\\n({})\", fillcolor={}, style=filled];\n",
				name,
				name,
				escape_dot(&node.type_name),
				color
			));
		}

		output.push('\n');

		for (from, to) in self.edges() {
			output.push_str(&format!(
				"  \"{}\" -> \"{}\";\n",
				escape_dot(&self.nodes[from].name),
				escape_dot(&self.nodes[to].name)
			));
		}

		output.push_str("}\n");
		output
	}
}

fn is_settled(slot: &InjectionSlot) -> bool {
	slot.is_pre_supplied() || slot.is_resolved()
}

/// Escapes `\` and `"` for use inside a quoted DOT identifier.
fn escape_dot(text: &str) -> String {
	text.replace('\\', "\\\\").replace('"', "\\\"")
}
