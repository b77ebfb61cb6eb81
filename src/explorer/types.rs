//! Serialized graph input.
//!
//! Mirrors graphology's JSON export so a dataset produced by the usual JS
//! tooling can be embedded in the page as-is.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// A single attribute value. Datasets only carry strings and numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
	/// Free text, tags, URLs.
	Text(String),
	/// Counts, years, coordinates.
	Number(f64),
}

impl AttrValue {
	/// Numeric view of the value. Text that parses as a number counts too.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			AttrValue::Number(n) => Some(*n),
			AttrValue::Text(s) => s.trim().parse().ok(),
		}
	}

	/// Borrowed text, if this is a text value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::Text(s) => Some(s),
			AttrValue::Number(_) => None,
		}
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrValue::Text(s) => f.write_str(s),
			// 2024 rather than 2024.0
			AttrValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
				write!(f, "{}", *n as i64)
			}
			AttrValue::Number(n) => write!(f, "{n}"),
		}
	}
}

/// Open attribute mapping of a node.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A node as it appears in the input file.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, referenced by edges.
	#[serde(alias = "id")]
	pub key: String,
	/// Everything else known about the node (`label`, `DOI`, `biocViews`, ...).
	#[serde(default)]
	pub attributes: Attributes,
}

/// An edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node key.
	pub source: String,
	/// Target node key.
	pub target: String,
}

/// Complete graph file: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// All edges.
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_graphology_export() {
		let json = r#"{
			"nodes": [
				{ "key": "limma", "attributes": { "label": "limma", "BioC_year": 2004, "DOI": "10.18129/B9.bioc.limma" } },
				{ "id": "Rcpp" }
			],
			"links": [{ "source": "limma", "target": "Rcpp" }]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].key, "Rcpp");
		assert!(data.nodes[1].attributes.is_empty());
		assert_eq!(
			data.nodes[0].attributes.get("BioC_year"),
			Some(&AttrValue::Number(2004.0))
		);
		assert_eq!(data.edges[0].target, "Rcpp");
	}

	#[test]
	fn integral_numbers_print_without_fraction() {
		assert_eq!(AttrValue::Number(2024.0).to_string(), "2024");
		assert_eq!(AttrValue::Number(3.5).to_string(), "3.5");
		assert_eq!(AttrValue::Text("3.20".into()).to_string(), "3.20");
	}
}
