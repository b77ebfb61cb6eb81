//! Fuzzy label search over the loaded graph.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::graph::Graph;

/// Read-only projection of a node used for searching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCandidate {
	/// Node key.
	pub id: String,
	/// Display label.
	pub label: String,
}

/// Label index built once at load time.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
	candidates: Vec<SearchCandidate>,
}

impl SearchIndex {
	/// Index every node's label.
	pub fn new(graph: &Graph) -> Self {
		let candidates = graph
			.nodes()
			.map(|node| SearchCandidate {
				id: node.id.clone(),
				label: node.label().to_string(),
			})
			.collect();
		Self { candidates }
	}

	/// All indexed candidates, in graph order. Feeds the autocomplete list.
	pub fn candidates(&self) -> &[SearchCandidate] {
		&self.candidates
	}

	/// Candidates whose label fuzzily matches `query`, best match first.
	pub fn search(&self, query: &str) -> Vec<&SearchCandidate> {
		if query.is_empty() {
			return Vec::new();
		}
		let matcher = SkimMatcherV2::default().ignore_case();
		let mut scored: Vec<(i64, &SearchCandidate)> = self
			.candidates
			.iter()
			.filter_map(|c| matcher.fuzzy_match(&c.label, query).map(|s| (s, c)))
			.collect();
		// stable: equal scores keep graph order
		scored.sort_by(|a, b| b.0.cmp(&a.0));
		scored.into_iter().map(|(_, c)| c).collect()
	}

	/// The first candidate whose label equals `query` verbatim.
	pub fn exact_match(&self, query: &str) -> Option<&SearchCandidate> {
		self.candidates.iter().find(|c| c.label == query)
	}
}
