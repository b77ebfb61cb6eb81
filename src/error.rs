//! Startup failures. Any of these leaves the explorer without a graph.

/// Why the graph could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// No `window` or `document`, e.g. when running outside a browser.
	#[error("no browser document available")]
	NoDocument,
	/// The page lacks the element carrying the data.
	#[error("missing `#{0}` element")]
	MissingElement(&'static str),
	/// The element exists but is not a `<script>`.
	#[error("`#{0}` is not a script element")]
	NotAScript(&'static str),
	/// The embedded JSON did not match the expected shape.
	#[error("failed to parse graph data: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share a key.
	#[error("duplicate node `{0}`")]
	DuplicateNode(String),
	/// An edge points at a node that does not exist.
	#[error("edge references unknown node `{0}`")]
	UnknownEndpoint(String),
}
