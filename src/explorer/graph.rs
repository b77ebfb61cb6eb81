//! Read-only graph model: node lookup, attributes, edges, and one-hop
//! neighborhoods.

use std::collections::{BTreeSet, HashMap};

use super::types::{AttrValue, Attributes, GraphData};
use crate::error::LoadError;

/// Attribute holding the display label of a node.
pub const LABEL_ATTRIBUTE: &str = "label";

/// Position of an edge in [`Graph::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A loaded node.
#[derive(Clone, Debug)]
pub struct Node {
	/// Unique key.
	pub id: String,
	/// Attribute map as read from the input.
	pub attributes: Attributes,
}

impl Node {
	/// The `label` attribute, falling back to the id.
	pub fn label(&self) -> &str {
		self.attributes
			.get(LABEL_ATTRIBUTE)
			.and_then(AttrValue::as_str)
			.unwrap_or(&self.id)
	}
}

#[derive(Clone, Debug)]
struct Edge {
	source: usize,
	target: usize,
}

/// Immutable graph built once at startup.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
	adjacency: Vec<BTreeSet<usize>>,
}

impl Graph {
	/// Build the graph, rejecting duplicate keys and dangling edges.
	pub fn from_data(data: GraphData) -> Result<Self, LoadError> {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());

		for node in data.nodes {
			if index.contains_key(&node.key) {
				return Err(LoadError::DuplicateNode(node.key));
			}
			index.insert(node.key.clone(), nodes.len());
			nodes.push(Node {
				id: node.key,
				attributes: node.attributes,
			});
		}

		let mut adjacency = vec![BTreeSet::new(); nodes.len()];
		let mut edges = Vec::with_capacity(data.edges.len());
		for link in data.edges {
			let source = *index
				.get(&link.source)
				.ok_or_else(|| LoadError::UnknownEndpoint(link.source.clone()))?;
			let target = *index
				.get(&link.target)
				.ok_or_else(|| LoadError::UnknownEndpoint(link.target.clone()))?;
			adjacency[source].insert(target);
			adjacency[target].insert(source);
			edges.push(Edge { source, target });
		}

		Ok(Self {
			nodes,
			index,
			edges,
			adjacency,
		})
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// All nodes in input order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Look up a node by key.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// A single attribute of a node. Unknown nodes have no attributes.
	pub fn attribute(&self, id: &str, key: &str) -> Option<&AttrValue> {
		self.node(id).and_then(|n| n.attributes.get(key))
	}

	/// All edge ids in input order.
	pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
		(0..self.edges.len()).map(EdgeId)
	}

	/// Source and target keys of an edge.
	pub fn extremities(&self, edge: EdgeId) -> Option<(&str, &str)> {
		self.edges.get(edge.0).map(|e| {
			(
				self.nodes[e.source].id.as_str(),
				self.nodes[e.target].id.as_str(),
			)
		})
	}

	/// One-hop neighbors of a node, regardless of edge direction.
	pub fn neighbors(&self, id: &str) -> BTreeSet<String> {
		self.index
			.get(id)
			.map(|&i| {
				self.adjacency[i]
					.iter()
					.map(|&j| self.nodes[j].id.clone())
					.collect()
			})
			.unwrap_or_default()
	}
}
