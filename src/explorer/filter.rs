//! Category filtering on the `biocViews` tag attribute.

use std::collections::BTreeSet;

use super::graph::Graph;

/// Attribute carrying a node's comma-separated category tags.
pub const CATEGORY_ATTRIBUTE: &str = "biocViews";

/// Separator option of the filter control; selecting it removes the filter.
pub const NO_FILTER: &str = "---";

/// Keeps only nodes without any category.
pub const NO_CATEGORY: &str = "No biocViews";

/// Keeps only nodes with at least some category.
pub const ANY_CATEGORY: &str = "Any biocViews";

/// Interpretation of a stored filter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryFilter<'a> {
	/// Show nodes lacking the category attribute.
	Uncategorized,
	/// Show nodes carrying the category attribute.
	Categorized,
	/// Show nodes whose categories contain this substring.
	Containing(&'a str),
}

impl<'a> CategoryFilter<'a> {
	/// Read a stored filter value.
	pub fn parse(value: &'a str) -> Self {
		match value {
			NO_CATEGORY => Self::Uncategorized,
			ANY_CATEGORY => Self::Categorized,
			other => Self::Containing(other),
		}
	}

	/// Whether a node with these categories is filtered out.
	pub fn hides(&self, categories: Option<&str>) -> bool {
		match (self, categories) {
			(Self::Uncategorized, categories) => categories.is_some(),
			(Self::Categorized, categories) => categories.is_none(),
			(Self::Containing(needle), Some(haystack)) => !haystack.contains(needle),
			(Self::Containing(_), None) => true,
		}
	}
}

/// Map a raw control value to the stored filter.
pub fn normalize_filter(value: &str) -> Option<String> {
	match value {
		"" | NO_FILTER => None,
		other => Some(other.to_string()),
	}
}

/// Options for the filter control: sentinel, the two special values, then
/// every distinct category term in the graph.
pub fn filter_options(graph: &Graph) -> Vec<String> {
	let terms: BTreeSet<String> = graph
		.nodes()
		.filter_map(|n| n.attributes.get(CATEGORY_ATTRIBUTE))
		.flat_map(|v| {
			v.to_string()
				.split(',')
				.map(|t| t.trim().to_string())
				.filter(|t| !t.is_empty())
				.collect::<Vec<_>>()
		})
		.collect();

	[NO_FILTER, NO_CATEGORY, ANY_CATEGORY]
		.into_iter()
		.map(String::from)
		.chain(terms)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::graph::tests::graph_with;

	#[test]
	fn special_values_check_presence() {
		let none = CategoryFilter::parse(NO_CATEGORY);
		assert!(!none.hides(None));
		assert!(none.hides(Some("Software")));

		let any = CategoryFilter::parse(ANY_CATEGORY);
		assert!(any.hides(None));
		assert!(!any.hides(Some("")));
	}

	#[test]
	fn other_values_match_substrings() {
		let f = CategoryFilter::parse("Sequencing");
		assert!(!f.hides(Some("Software, RNASequencing, GeneExpression")));
		assert!(f.hides(Some("Software, Microarray")));
		assert!(f.hides(None));
	}

	#[test]
	fn sentinel_clears_filter() {
		assert_eq!(normalize_filter(NO_FILTER), None);
		assert_eq!(normalize_filter(""), None);
		assert_eq!(normalize_filter(NO_CATEGORY).as_deref(), Some(NO_CATEGORY));
	}

	#[test]
	fn options_list_distinct_terms_after_specials() {
		let g = graph_with(
			vec![
				("limma", vec![(CATEGORY_ATTRIBUTE, "Software, Microarray")]),
				("edgeR", vec![(CATEGORY_ATTRIBUTE, "Software,RNASeq")]),
				("Rcpp", vec![]),
			],
			&[],
		);
		assert_eq!(
			filter_options(&g),
			vec![
				NO_FILTER,
				NO_CATEGORY,
				ANY_CATEGORY,
				"Microarray",
				"RNASeq",
				"Software"
			]
		);
	}
}
