//! Toolbar controls: search box, category filter, zoom buttons, and label
//! density slider.

use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use super::force_graph::CameraCommand;
use crate::explorer::Explorer;
use crate::explorer::filter::filter_options;
use crate::explorer::view_state::ViewState;

/// Free-text search with autocomplete over every node label. Leaving the
/// field drops an ambiguous query but keeps a selection.
#[component]
pub fn SearchBox(explorer: Arc<Explorer>, view: RwSignal<ViewState>) -> impl IntoView {
	let options = explorer
		.index
		.candidates()
		.iter()
		.map(|c| view! { <option value=c.label.clone()></option> })
		.collect_view();

	let on_input = move |ev| {
		let query = event_target_value(&ev);
		view.update(|v| v.set_query(&query, &explorer.graph, &explorer.index));
	};

	view! {
		<input
			id="search-input"
			type="search"
			list="suggestions"
			placeholder="Search packages..."
			autocomplete="off"
			prop:value=move || view.with(|v| v.query.clone())
			on:input=on_input
			on:blur=move |_| view.update(ViewState::dismiss_suggestions)
		/>
		<datalist id="suggestions">{options}</datalist>
	}
}

/// Category filter over the `biocViews` tags.
#[component]
pub fn FilterSelect(explorer: Arc<Explorer>, view: RwSignal<ViewState>) -> impl IntoView {
	let options = filter_options(&explorer.graph)
		.into_iter()
		.map(|option| view! { <option value=option.clone()>{option.clone()}</option> })
		.collect_view();

	view! {
		<select
			id="filter-select"
			on:change=move |ev| {
				let value = event_target_value(&ev);
				view.update(|v| v.set_filter(&value));
			}
		>
			{options}
		</select>
	}
}

/// Zoom in, zoom out, and reset buttons.
#[component]
pub fn ZoomControls(camera: WriteSignal<Option<CameraCommand>>) -> impl IntoView {
	view! {
		<div class="zoom-controls">
			<button id="zoom-in" title="Zoom in" on:click=move |_| camera.set(Some(CameraCommand::ZoomIn))>
				"+"
			</button>
			<button id="zoom-out" title="Zoom out" on:click=move |_| camera.set(Some(CameraCommand::ZoomOut))>
				"-"
			</button>
			<button id="zoom-reset" title="Reset zoom" on:click=move |_| camera.set(Some(CameraCommand::Reset))>
				"Reset"
			</button>
		</div>
	}
}

/// Slider for the minimum on-screen node size that still gets a label.
#[component]
pub fn LabelThreshold(threshold: RwSignal<f64>) -> impl IntoView {
	view! {
		<label class="labels-threshold">
			"Labels threshold"
			<input
				id="labels-threshold"
				type="range"
				min="0"
				max="15"
				step="0.5"
				prop:value=move || threshold.get().to_string()
				on:input=move |ev| {
					let raw = event_target_value(&ev);
					match raw.parse::<f64>() {
						Ok(value) => threshold.set(value),
						Err(e) => warn!("bioc-graph: ignoring label threshold {raw:?}: {e}"),
					}
				}
			/>
		</label>
	}
}
