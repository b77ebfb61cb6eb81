//! The explorer's single mutable record and the operations that reconcile it
//! with user input.
//!
//! Every operation recomputes the derived fields from scratch, so the last
//! input always wins and repeating an input is a no-op.

use std::collections::BTreeSet;

use log::debug;

use super::filter::normalize_filter;
use super::graph::Graph;
use super::search::SearchIndex;

/// What the query currently resolves to. Selection and suggestions are
/// mutually exclusive render modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
	/// Nothing searched.
	#[default]
	None,
	/// A single node is selected together with its one-hop neighborhood.
	Selected {
		/// Selected node key.
		node: String,
		/// Keys of every node adjacent to `node`.
		neighbors: BTreeSet<String>,
	},
	/// The query was ambiguous; these nodes are offered as matches.
	Suggesting {
		/// Keys of the matching nodes, possibly empty.
		candidates: BTreeSet<String>,
	},
}

/// User-facing state shared by the search box, filter, canvas and sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	/// Raw text of the search box.
	pub query: String,
	/// Derived from `query`.
	pub focus: Focus,
	/// Active category filter. Independent of `focus`.
	pub category_filter: Option<String>,
}

impl ViewState {
	/// Initial state: empty query, no filter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Key of the selected node.
	pub fn selected_node(&self) -> Option<&str> {
		match &self.focus {
			Focus::Selected { node, .. } => Some(node),
			_ => None,
		}
	}

	/// Neighbors of the selected node.
	pub fn selected_neighbors(&self) -> Option<&BTreeSet<String>> {
		match &self.focus {
			Focus::Selected { neighbors, .. } => Some(neighbors),
			_ => None,
		}
	}

	/// Suggested nodes of an ambiguous query.
	pub fn suggestions(&self) -> Option<&BTreeSet<String>> {
		match &self.focus {
			Focus::Suggesting { candidates } => Some(candidates),
			_ => None,
		}
	}

	/// Resolve free text typed into the search box.
	pub fn set_query(&mut self, query: &str, graph: &Graph, index: &SearchIndex) {
		self.query = query.to_string();

		if query.is_empty() {
			self.focus = Focus::None;
			return;
		}

		let candidates = index.search(query);
		let resolved = if candidates.len() == 1 {
			Some(candidates[0].id.clone())
		} else {
			index.exact_match(query).map(|c| c.id.clone())
		};

		self.focus = match resolved {
			Some(node) => Focus::Selected {
				neighbors: graph.neighbors(&node),
				node,
			},
			None => Focus::Suggesting {
				candidates: candidates.into_iter().map(|c| c.id.clone()).collect(),
			},
		};
		debug!("query {:?} -> {:?}", self.query, self.focus);
	}

	/// Select a node by key, bypassing the search index. The search box holds
	/// the key afterwards. Unknown keys are treated as free text.
	pub fn select_node(&mut self, id: &str, graph: &Graph, index: &SearchIndex) {
		let Some(node) = graph.node(id) else {
			self.set_query(id, graph, index);
			return;
		};
		self.query = node.id.clone();
		self.focus = Focus::Selected {
			node: node.id.clone(),
			neighbors: graph.neighbors(&node.id),
		};
		debug!("selected {id}");
	}

	/// Drop the query and whatever it resolved to. The filter stays.
	pub fn clear_selection(&mut self) {
		self.query.clear();
		self.focus = Focus::None;
	}

	/// Abandon an ambiguous query. A selection and the filter survive.
	pub fn dismiss_suggestions(&mut self) {
		if matches!(self.focus, Focus::Suggesting { .. }) {
			self.clear_selection();
		}
	}

	/// Clicking the selected node deselects it; clicking any other node
	/// selects that one.
	pub fn toggle_node_click(&mut self, id: &str, graph: &Graph, index: &SearchIndex) {
		if self.selected_node() == Some(id) {
			self.clear_selection();
		} else {
			self.select_node(id, graph, index);
		}
	}

	/// Apply a raw value from the filter control.
	pub fn set_filter(&mut self, value: &str) {
		self.category_filter = normalize_filter(value);
		debug!("category filter -> {:?}", self.category_filter);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::filter::{NO_CATEGORY, NO_FILTER};
	use crate::explorer::graph::tests::graph;

	fn set(ids: &[&str]) -> BTreeSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn alpha_beta() -> (Graph, SearchIndex) {
		let g = graph(&[("A", "Alpha"), ("B", "Beta")], &[("A", "B")]);
		let index = SearchIndex::new(&g);
		(g, index)
	}

	#[test]
	fn exact_label_selects_node_and_neighbors() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);

		assert_eq!(state.query, "Alpha");
		assert_eq!(state.selected_node(), Some("A"));
		assert_eq!(state.selected_neighbors(), Some(&set(&["B"])));
		assert_eq!(state.suggestions(), None);
	}

	#[test]
	fn exact_label_wins_over_several_candidates() {
		let g = graph(
			&[("1", "limma"), ("2", "limmaGUI"), ("3", "Rcpp")],
			&[("2", "1"), ("3", "1")],
		);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();
		state.set_query("limma", &g, &index);

		assert_eq!(state.selected_node(), Some("1"));
		assert_eq!(state.selected_neighbors(), Some(&set(&["2", "3"])));
	}

	#[test]
	fn single_candidate_resolves_to_its_id() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_query("alp", &g, &index);

		assert_eq!(state.query, "alp");
		assert_eq!(state.selected_node(), Some("A"));
		assert_eq!(state.selected_neighbors(), Some(&set(&["B"])));
	}

	#[test]
	fn ambiguous_query_suggests_all_candidates() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_query("a", &g, &index);

		assert_eq!(state.selected_node(), None);
		assert_eq!(state.selected_neighbors(), None);
		assert_eq!(state.suggestions(), Some(&set(&["A", "B"])));
	}

	#[test]
	fn unmatched_query_suggests_nothing() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_query("zzz", &g, &index);

		assert_eq!(state.suggestions(), Some(&BTreeSet::new()));
		assert_eq!(state.selected_node(), None);
	}

	#[test]
	fn empty_query_clears_everything_but_the_filter() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_filter(NO_CATEGORY);

		state.set_query("Alpha", &g, &index);
		state.set_query("", &g, &index);
		assert_eq!(state.focus, Focus::None);

		state.set_query("a", &g, &index);
		state.set_query("", &g, &index);
		assert_eq!(state.focus, Focus::None);
		assert_eq!(state.category_filter.as_deref(), Some(NO_CATEGORY));
	}

	#[test]
	fn filter_and_focus_do_not_clear_each_other() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();

		state.set_query("Alpha", &g, &index);
		state.set_filter("Software");
		assert_eq!(state.selected_node(), Some("A"));
		assert_eq!(state.category_filter.as_deref(), Some("Software"));

		state.set_query("zzz", &g, &index);
		assert_eq!(state.category_filter.as_deref(), Some("Software"));

		state.set_filter(NO_FILTER);
		assert_eq!(state.category_filter, None);
		assert_eq!(state.suggestions(), Some(&BTreeSet::new()));
	}

	#[test]
	fn repeating_a_query_is_idempotent() {
		let (g, index) = alpha_beta();
		for query in ["Alpha", "a", "zzz", ""] {
			let mut state = ViewState::new();
			state.set_query(query, &g, &index);
			let first = state.clone();
			state.set_query(query, &g, &index);
			assert_eq!(state, first, "query {query:?}");
		}
	}

	#[test]
	fn clicking_toggles_selection() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();

		state.toggle_node_click("B", &g, &index);
		assert_eq!(state.selected_node(), Some("B"));
		assert_eq!(state.query, "B");
		assert_eq!(state.selected_neighbors(), Some(&set(&["A"])));

		state.toggle_node_click("A", &g, &index);
		assert_eq!(state.selected_node(), Some("A"));

		state.toggle_node_click("A", &g, &index);
		assert_eq!(state.focus, Focus::None);
		assert!(state.query.is_empty());
	}

	#[test]
	fn clicked_node_key_lands_in_the_query() {
		let g = graph(&[("x1", "dup"), ("x2", "dup")], &[]);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();

		state.toggle_node_click("x2", &g, &index);
		assert_eq!(state.query, "x2");
		assert_eq!(state.selected_node(), Some("x2"));
	}

	#[test]
	fn leaving_the_search_box_keeps_selection_and_filter() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();
		state.set_query("Alpha", &g, &index);
		state.set_filter("Software");

		state.dismiss_suggestions();
		assert_eq!(state.selected_node(), Some("A"));
		assert_eq!(state.query, "Alpha");
		assert_eq!(state.category_filter.as_deref(), Some("Software"));

		state.set_query("a", &g, &index);
		state.dismiss_suggestions();
		assert_eq!(state.focus, Focus::None);
		assert!(state.query.is_empty());
		assert_eq!(state.category_filter.as_deref(), Some("Software"));
	}

	#[test]
	fn direct_selection_bypasses_fuzzy_search() {
		// "a" alone would be ambiguous as free text
		let g = graph(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")], &[]);
		let index = SearchIndex::new(&g);
		let mut state = ViewState::new();

		state.select_node("a", &g, &index);
		assert_eq!(state.selected_node(), Some("a"));
		assert!(state.selected_neighbors().is_some_and(BTreeSet::is_empty));
	}

	#[test]
	fn unknown_id_falls_back_to_search() {
		let (g, index) = alpha_beta();
		let mut state = ViewState::new();

		state.select_node("zzz", &g, &index);
		assert_eq!(state.query, "zzz");
		assert_eq!(state.suggestions(), Some(&BTreeSet::new()));
	}
}
