//! Detail panel for the selected node.

use std::sync::Arc;

use leptos::prelude::*;

use crate::explorer::Explorer;
use crate::explorer::details::{NodeDetails, node_details};
use crate::explorer::view_state::ViewState;

fn details_view(details: NodeDetails) -> AnyView {
	match details {
		NodeDetails::Package { label, fields } => view! {
			<h2>{label}</h2>
			<ul>
				{fields
					.into_iter()
					.map(|(key, value)| {
						view! {
							<li>
								<strong>{key}":"</strong>
								" "
								{value.unwrap_or_default()}
							</li>
						}
					})
					.collect_view()}
			</ul>
		}
		.into_any(),
		NodeDetails::Stub {
			label,
			more_info_url,
		} => view! {
			<h2>{label}</h2>
			<p>
				"Probably an R package. "
				<a target="_blank" rel="noopener noreferrer" href=more_info_url>
					"More info"
				</a>
			</p>
		}
		.into_any(),
	}
}

/// Shown while a node is selected. Closing it clears the selection.
#[component]
pub fn Sidebar(explorer: Arc<Explorer>, view: RwSignal<ViewState>) -> impl IntoView {
	let details = Memo::new(move |_| {
		view.with(|v| {
			v.selected_node()
				.and_then(|id| node_details(&explorer.graph, id))
		})
	});

	view! {
		<Show when=move || details.with(Option::is_some)>
			<aside id="node-sidebar" class="sidebar">
				<button
					class="sidebar-close"
					title="Close"
					on:click=move |_| view.update(ViewState::clear_selection)
				>
					"x"
				</button>
				{move || details.get().map(details_view)}
			</aside>
		</Show>
	}
}
