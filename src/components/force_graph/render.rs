//! Canvas rendering for the graph.
//!
//! Every frame re-evaluates the display overrides for each node and edge, so
//! a view-state change shows up on the next frame without rebuilding the
//! layout. Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Visible edges (world space)
//! 3. Dimmed nodes, then regular nodes, then the selected node on top
//! 4. Labels above everything

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, Node};
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;
use crate::explorer::display::{NodeDisplay, edge_display, node_display};
use crate::explorer::graph::Graph;
use crate::explorer::view_state::ViewState;

/// Everything outside the canvas state that a frame depends on.
pub struct Frame<'a> {
	pub view: &'a ViewState,
	pub graph: &'a Graph,
	/// Minimum on-screen node radius (px) for a label to be drawn.
	pub label_threshold: f64,
}

/// Node display overrides for the current frame, keyed by layout index.
fn node_overrides(state: &ForceGraphState, frame: &Frame) -> HashMap<DefaultNodeIdx, NodeDisplay> {
	let mut overrides = HashMap::new();
	state.graph.visit_nodes(|node| {
		overrides.insert(
			node.index(),
			node_display(frame.view, &node.data.user_data.id, frame.graph),
		);
	});
	overrides
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	frame: &Frame,
) {
	let transform = state.camera.transform;
	let scale = ScaledValues::new(config, transform.k);
	let overrides = node_overrides(state, frame);
	let display = |idx: DefaultNodeIdx| overrides.get(&idx).copied().unwrap_or_default();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	draw_edges(state, ctx, &scale, theme, frame, &display);
	draw_nodes(state, ctx, &scale, theme, &display);
	draw_labels(state, ctx, &scale, theme, frame, &display);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	let gradient = bg
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &bg.color.to_css());
			let _ = gradient.add_color_stop(1.0, &bg.color_secondary.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&bg.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	frame: &Frame,
	display: &impl Fn(DefaultNodeIdx) -> NodeDisplay,
) {
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_line_width);

	state.graph.visit_edges(|n1, n2, edge| {
		if display(n1.index()).hidden || display(n2.index()).hidden {
			return;
		}
		if edge_display(frame.view, edge.user_data, frame.graph).hidden {
			return;
		}
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	display: &impl Fn(DefaultNodeIdx) -> NodeDisplay,
) {
	// Pass 1: dimmed nodes underneath
	state.graph.visit_nodes(|node| {
		let d = display(node.index());
		if !d.hidden && d.dimmed {
			draw_node(ctx, node, scale, theme, d);
		}
	});

	// Pass 2: regular nodes
	state.graph.visit_nodes(|node| {
		let d = display(node.index());
		if !d.hidden && !d.dimmed && !d.highlighted {
			draw_node(ctx, node, scale, theme, d);
		}
	});

	// Pass 3: the selected node on top, with its ring
	state.graph.visit_nodes(|node| {
		let d = display(node.index());
		if d.hidden || !d.highlighted {
			return;
		}
		draw_node(ctx, node, scale, theme, d);

		let radius = scale.radius(node.data.user_data.size);
		ctx.begin_path();
		let _ = ctx.arc(
			node.x() as f64,
			node.y() as f64,
			radius + scale.ring_offset,
			0.0,
			2.0 * PI,
		);
		ctx.set_stroke_style_str(&theme.node.highlight_color.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	display: NodeDisplay,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.radius(node.data.user_data.size);
	let color = if display.dimmed {
		theme.node.dimmed_color
	} else {
		node.data.user_data.color
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = (theme.node.use_gradient && !display.dimmed)
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &color.to_css());
			let _ = gradient.add_color_stop(1.0, &color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&color.to_css()),
	}
	ctx.fill();
}

fn draw_labels(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	frame: &Frame,
	display: &impl Fn(DefaultNodeIdx) -> NodeDisplay,
) {
	ctx.set_font(&scale.label_font);

	state.graph.visit_nodes(|node| {
		let d = display(node.index());
		let size = node.data.user_data.size;
		let dense_enough = scale.screen_radius(size) >= frame.label_threshold;
		if d.hidden || d.dimmed || !(d.highlighted || d.force_label || dense_enough) {
			return;
		}

		let label = &node.data.user_data.label;
		let radius = scale.radius(size);
		let (x, y) = (
			node.x() as f64 + radius + 3.0 / scale.k,
			node.y() as f64 + scale.label_size / 3.0,
		);

		if d.highlighted {
			if let Ok(metrics) = ctx.measure_text(label) {
				let pad = 2.0 / scale.k;
				ctx.set_fill_style_str(&theme.label.highlight_background.to_css());
				ctx.fill_rect(
					x - pad,
					y - scale.label_size,
					metrics.width() + pad * 2.0,
					scale.label_size * 1.3,
				);
			}
		}

		ctx.set_fill_style_str(&theme.label.color.to_css());
		let _ = ctx.fill_text(label, x, y);
	});
}
