//! Per-entity display overrides derived from the view state.
//!
//! The renderer calls these for every node and edge on every frame. They read
//! the state and the graph and never modify either.

use std::borrow::Cow;

use super::filter::{CATEGORY_ATTRIBUTE, CategoryFilter};
use super::graph::{EdgeId, Graph};
use super::types::AttrValue;
use super::view_state::ViewState;

/// How a node departs from its default appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeDisplay {
	/// Not drawn and not clickable.
	pub hidden: bool,
	/// Drawn muted and without label, still clickable.
	pub dimmed: bool,
	/// The selected node.
	pub highlighted: bool,
	/// Label drawn regardless of the density threshold.
	pub force_label: bool,
}

/// How an edge departs from its default appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDisplay {
	/// Not drawn.
	pub hidden: bool,
}

/// Display overrides for one node.
pub fn node_display(state: &ViewState, node: &str, graph: &Graph) -> NodeDisplay {
	let mut display = NodeDisplay::default();
	let selected = state.selected_node();

	if let Some(neighbors) = state.selected_neighbors() {
		if !neighbors.contains(node) && selected != Some(node) {
			display.dimmed = true;
		}
	}

	if selected == Some(node) {
		display.highlighted = true;
	} else if let Some(suggestions) = state.suggestions() {
		if suggestions.contains(node) {
			display.force_label = true;
		} else {
			display.dimmed = true;
		}
	}

	if let Some(filter) = state.category_filter.as_deref() {
		let categories = graph
			.attribute(node, CATEGORY_ATTRIBUTE)
			.map(|value| match value {
				AttrValue::Text(text) => Cow::Borrowed(text.as_str()),
				other => Cow::Owned(other.to_string()),
			});
		if CategoryFilter::parse(filter).hides(categories.as_deref()) {
			display.hidden = true;
		}
	}

	display
}

/// Display overrides for one edge. An edge stays inside the selected node's
/// neighborhood, or between two suggestions, or it is hidden.
pub fn edge_display(state: &ViewState, edge: EdgeId, graph: &Graph) -> EdgeDisplay {
	let mut display = EdgeDisplay::default();
	let Some((source, target)) = graph.extremities(edge) else {
		return display;
	};

	if let (Some(selected), Some(neighbors)) = (state.selected_node(), state.selected_neighbors()) {
		let inside = |n: &str| n == selected || neighbors.contains(n);
		if !(inside(source) && inside(target)) {
			display.hidden = true;
		}
	}

	if let Some(suggestions) = state.suggestions() {
		if !suggestions.contains(source) || !suggestions.contains(target) {
			display.hidden = true;
		}
	}

	display
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::filter::{ANY_CATEGORY, NO_CATEGORY};
	use crate::explorer::graph::tests::{graph, graph_with};
	use crate::explorer::search::SearchIndex;

	fn edge_between(g: &Graph, a: &str, b: &str) -> EdgeId {
		g.edges()
			.find(|&e| {
				g.extremities(e)
					.is_some_and(|(s, t)| (s == a && t == b) || (s == b && t == a))
			})
			.unwrap()
	}

	#[test]
	fn default_state_overrides_nothing() {
		let g = graph(&[("A", "Alpha"), ("B", "Beta")], &[("A", "B")]);
		let state = ViewState::new();
		assert_eq!(node_display(&state, "A", &g), NodeDisplay::default());
		assert_eq!(edge_display(&state, EdgeId(0), &g), EdgeDisplay::default());
	}

	#[test]
	fn selection_highlights_and_dims_outsiders() {
		let g = graph(
			&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma"), ("D", "Delta")],
			&[("A", "B"), ("C", "D"), ("B", "C")],
		);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);

		let a = node_display(&state, "A", &g);
		assert!(a.highlighted && !a.dimmed);
		assert!(!node_display(&state, "B", &g).dimmed);
		assert!(node_display(&state, "C", &g).dimmed);

		assert!(!edge_display(&state, edge_between(&g, "A", "B"), &g).hidden);
		assert!(edge_display(&state, edge_between(&g, "C", "D"), &g).hidden);
		// one endpoint outside the neighborhood
		assert!(edge_display(&state, edge_between(&g, "B", "C"), &g).hidden);
	}

	#[test]
	fn edges_between_neighbors_stay_visible() {
		let g = graph(
			&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")],
			&[("A", "B"), ("A", "C"), ("B", "C")],
		);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);

		assert!(g.edges().all(|e| !edge_display(&state, e, &g).hidden));
	}

	#[test]
	fn alpha_beta_selection_scenario() {
		let g = graph(&[("A", "Alpha"), ("B", "Beta")], &[("A", "B")]);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);

		assert!(!edge_display(&state, EdgeId(0), &g).hidden);
		assert!(!node_display(&state, "B", &g).dimmed);
	}

	#[test]
	fn no_match_dims_everything_and_hides_edges() {
		let g = graph(&[("A", "Alpha"), ("B", "Beta")], &[("A", "B")]);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("zzz", &g, &index);

		assert!(node_display(&state, "A", &g).dimmed);
		assert!(node_display(&state, "B", &g).dimmed);
		assert!(edge_display(&state, EdgeId(0), &g).hidden);
	}

	#[test]
	fn suggestions_force_labels_and_keep_internal_edges() {
		let g = graph(
			&[("A", "Alpha"), ("B", "Beta"), ("C", "Echo")],
			&[("A", "B"), ("B", "C")],
		);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("a", &g, &index);

		let a = node_display(&state, "A", &g);
		assert!(a.force_label && !a.dimmed && !a.highlighted);
		assert!(node_display(&state, "C", &g).dimmed);
		assert!(!edge_display(&state, edge_between(&g, "A", "B"), &g).hidden);
		assert!(edge_display(&state, edge_between(&g, "B", "C"), &g).hidden);
	}

	#[test]
	fn no_category_filter_hides_categorized_nodes() {
		let g = graph_with(
			vec![
				("Rcpp", vec![("label", "Rcpp")]),
				("limma", vec![("label", "limma"), (CATEGORY_ATTRIBUTE, "Software")]),
			],
			&[],
		);
		let mut state = ViewState::new();
		state.set_filter(NO_CATEGORY);

		assert!(!node_display(&state, "Rcpp", &g).hidden);
		assert!(node_display(&state, "limma", &g).hidden);

		state.set_filter(ANY_CATEGORY);
		assert!(node_display(&state, "Rcpp", &g).hidden);
		assert!(!node_display(&state, "limma", &g).hidden);

		state.set_filter("Soft");
		assert!(node_display(&state, "Rcpp", &g).hidden);
		assert!(!node_display(&state, "limma", &g).hidden);
	}

	#[test]
	fn filter_hides_even_the_selected_node() {
		let g = graph_with(
			vec![("A", vec![("label", "Alpha"), (CATEGORY_ATTRIBUTE, "Software")])],
			&[],
		);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);
		state.set_filter(NO_CATEGORY);

		let a = node_display(&state, "A", &g);
		assert!(a.highlighted && a.hidden);
	}

	#[test]
	fn numeric_category_value_still_counts_as_tagged() {
		let data = serde_json::from_str(
			r#"{ "nodes": [
				{ "key": "n", "attributes": { "biocViews": 2024 } },
				{ "key": "t", "attributes": { "biocViews": "Software, Microarray" } }
			] }"#,
		)
		.unwrap();
		let g = Graph::from_data(data).unwrap();
		let mut state = ViewState::new();

		state.set_filter(NO_CATEGORY);
		assert!(node_display(&state, "n", &g).hidden);
		state.set_filter("202");
		assert!(!node_display(&state, "n", &g).hidden);
		state.set_filter("Microarray");
		assert!(!node_display(&state, "t", &g).hidden);
		assert!(node_display(&state, "n", &g).hidden);
	}
}
