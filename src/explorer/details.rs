//! Sidebar content for the selected node.

use super::graph::Graph;

/// Attribute whose presence marks a fully described Bioconductor package.
pub const DOI_ATTRIBUTE: &str = "DOI";

/// Attributes listed for a described package, in display order.
pub const DETAIL_FIELDS: [&str; 9] = [
	"Version",
	"BioC_version",
	"BioC_year",
	"Description",
	"Unique_IPs_2024",
	"biocViews",
	"URL",
	DOI_ATTRIBUTE,
	"Authors",
];

/// What the sidebar shows for a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeDetails {
	/// A Bioconductor package with its metadata.
	Package {
		/// Display label.
		label: String,
		/// `(attribute, value)` for each of [`DETAIL_FIELDS`].
		fields: Vec<(&'static str, Option<String>)>,
	},
	/// Anything else, most likely a CRAN package.
	Stub {
		/// Display label.
		label: String,
		/// External page about the package.
		more_info_url: String,
	},
}

impl NodeDetails {
	/// Heading of the sidebar.
	pub fn label(&self) -> &str {
		match self {
			NodeDetails::Package { label, .. } | NodeDetails::Stub { label, .. } => label,
		}
	}
}

/// Sidebar content for `id`, or `None` if the node does not exist.
pub fn node_details(graph: &Graph, id: &str) -> Option<NodeDetails> {
	let node = graph.node(id)?;
	let label = node.label().to_string();

	if !node.attributes.contains_key(DOI_ATTRIBUTE) {
		return Some(NodeDetails::Stub {
			more_info_url: format!("http://rdocumentation.org/packages/{label}"),
			label,
		});
	}

	let fields = DETAIL_FIELDS
		.iter()
		.map(|&key| (key, node.attributes.get(key).map(ToString::to_string)))
		.collect();
	Some(NodeDetails::Package { label, fields })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::graph::tests::graph_with;

	#[test]
	fn doi_marks_a_described_package() {
		let g = graph_with(
			vec![(
				"limma",
				vec![
					("label", "limma"),
					("Version", "3.60.0"),
					(DOI_ATTRIBUTE, "10.18129/B9.bioc.limma"),
				],
			)],
			&[],
		);
		let Some(NodeDetails::Package { label, fields }) = node_details(&g, "limma") else {
			panic!("expected a package");
		};
		assert_eq!(label, "limma");
		assert_eq!(fields.len(), DETAIL_FIELDS.len());
		assert_eq!(fields[0], ("Version", Some("3.60.0".to_string())));
		assert_eq!(fields[1], ("BioC_version", None));
	}

	#[test]
	fn missing_doi_falls_back_to_stub() {
		let g = graph_with(vec![("7", vec![("label", "Rcpp")])], &[]);
		assert_eq!(
			node_details(&g, "7"),
			Some(NodeDetails::Stub {
				label: "Rcpp".into(),
				more_info_url: "http://rdocumentation.org/packages/Rcpp".into(),
			})
		);
		assert_eq!(node_details(&g, "missing"), None);
	}
}
