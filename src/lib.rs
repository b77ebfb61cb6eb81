//! bioc-graph: interactive explorer for the Bioconductor package graph.
//!
//! This crate provides a WASM-based single-page application that renders the
//! package graph on a canvas, with label search, a `biocViews` category
//! filter, click-to-select neighborhoods, and a detail sidebar.

use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod error;
pub mod explorer;

pub use components::force_graph::{CameraCommand, GraphCanvas};
pub use error::LoadError;
pub use explorer::Explorer;
pub use explorer::types::{GraphData, GraphLink, GraphNode};

use components::controls::{FilterSelect, LabelThreshold, SearchBox, ZoomControls};
use components::sidebar::Sidebar;
use explorer::settings::ExplorerSettings;
use explorer::view_state::ViewState;

/// Element carrying the graph as graphology-style JSON.
const GRAPH_DATA_ID: &str = "graph-data";
/// Optional element carrying [`ExplorerSettings`] overrides.
const SETTINGS_ID: &str = "explorer-settings";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("bioc-graph: logging initialized");
}

fn script_text(id: &'static str) -> Result<String, LoadError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(LoadError::NoDocument)?;
	let element = document
		.get_element_by_id(id)
		.ok_or(LoadError::MissingElement(id))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| LoadError::NotAScript(id))?;
	Ok(script.text().unwrap_or_default())
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [{ key, attributes }], edges: [{ source, target }] }
fn load_graph_data() -> Result<GraphData, LoadError> {
	let json_text = script_text(GRAPH_DATA_ID)?;
	Ok(serde_json::from_str(&json_text)?)
}

/// Settings overrides are optional; anything unusable falls back to defaults.
fn load_settings() -> ExplorerSettings {
	let json_text = match script_text(SETTINGS_ID) {
		Ok(text) => text,
		Err(_) => return ExplorerSettings::default(),
	};
	serde_json::from_str(&json_text).unwrap_or_else(|e| {
		warn!("bioc-graph: ignoring invalid settings: {}", e);
		ExplorerSettings::default()
	})
}

/// Load the graph and settings from the DOM and build the explorer.
pub fn load_explorer() -> Result<Explorer, LoadError> {
	Explorer::new(load_graph_data()?, load_settings())
}

/// The explorer page once the graph is loaded.
#[component]
fn ExplorerView(explorer: Arc<Explorer>) -> impl IntoView {
	let view_state = RwSignal::new(ViewState::new());
	let threshold = RwSignal::new(explorer.settings.label_rendered_size_threshold);
	let (camera, set_camera) = signal(None::<CameraCommand>);

	let explorer_click = explorer.clone();
	let on_node_click = Callback::new(move |id: String| {
		view_state.update(|v| v.toggle_node_click(&id, &explorer_click.graph, &explorer_click.index));
	});

	// Lives as long as the page.
	let _escape = window_event_listener(ev::keyup, move |event| {
		if event.key() == "Escape" {
			view_state.update(ViewState::clear_selection);
		}
	});

	view! {
		<div class="fullscreen-graph">
			<GraphCanvas
				explorer=explorer.clone()
				view=view_state
				label_threshold=threshold
				camera=camera
				on_node_click=on_node_click
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Bioconductor packages"</h1>
				<SearchBox explorer=explorer.clone() view=view_state />
				<FilterSelect explorer=explorer.clone() view=view_state />
			</div>
			<div class="graph-controls">
				<ZoomControls camera=set_camera />
				<LabelThreshold threshold=threshold />
			</div>
			<Sidebar explorer=explorer view=view_state />
		</div>
	}
}

/// Main application component.
/// Loads the graph from the DOM and renders the explorer, or a notice when
/// the graph is unusable.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let body = match load_explorer() {
		Ok(explorer) => view! { <ExplorerView explorer=Arc::new(explorer) /> }.into_any(),
		Err(e) => {
			error!("bioc-graph: {}", e);
			view! {
				<div class="load-error">
					<h1>"The package graph could not be loaded"</h1>
					<p>{e.to_string()}</p>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Bioconductor package graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{body}
	}
}
