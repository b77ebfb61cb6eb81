//! Browser-independent core of the explorer.
//!
//! Holds the loaded graph, its search index, and the view state together
//! with the rules that turn that state into per-node and per-edge display
//! overrides. Nothing in here touches the DOM.

pub mod details;
pub mod display;
pub mod filter;
pub mod graph;
pub mod search;
pub mod settings;
pub mod types;
pub mod view_state;

use log::info;

use crate::error::LoadError;
use graph::Graph;
use search::SearchIndex;
use settings::ExplorerSettings;
use types::GraphData;

/// Everything that stays fixed after startup.
#[derive(Clone, Debug)]
pub struct Explorer {
	/// The loaded graph.
	pub graph: Graph,
	/// Label index over `graph`.
	pub index: SearchIndex,
	/// Renderer and camera settings.
	pub settings: ExplorerSettings,
}

impl Explorer {
	/// Build the graph and its index.
	pub fn new(data: GraphData, settings: ExplorerSettings) -> Result<Self, LoadError> {
		let graph = Graph::from_data(data)?;
		let index = SearchIndex::new(&graph);
		info!(
			"bioc-graph: loaded {} nodes, {} edges",
			graph.node_count(),
			graph.edge_count()
		);
		Ok(Self {
			graph,
			index,
			settings,
		})
	}
}
