//! Canvas-side graph state: layout, camera, and pointer interaction.
//!
//! Nodes carrying numeric `x`/`y` attributes keep their pre-computed layout
//! and are anchored; the rest are placed by the `force_graph` simulation.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::camera::Camera;
use super::scale::ScaledValues;
use super::theme::{Color, Theme};
use crate::explorer::filter::CATEGORY_ATTRIBUTE;
use crate::explorer::graph::{EdgeId, Graph};
use crate::explorer::settings::ExplorerSettings;
use crate::explorer::types::AttrValue;

/// Press-and-release within this many pixels counts as a click.
const CLICK_TOLERANCE: f64 = 4.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Key of the node in the explorer graph.
	pub id: String,
	pub label: String,
	pub color: Color,
	/// Size multiplier (1.0 = normal)
	pub size: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Pointer left the click tolerance since the press.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Layout plus interaction state, created once when the canvas mounts and
/// mutated by the animation loop and pointer handlers.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeId>,
	pub camera: Camera,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// Whether the physics simulation still needs ticking.
	pub animation_running: bool,
	/// Something visible changed since the last drawn frame.
	dirty: bool,
}

fn numeric(graph: &Graph, id: &str, key: &str) -> Option<f64> {
	graph.attribute(id, key).and_then(AttrValue::as_f64)
}

/// Fits pre-computed coordinates into the viewport around the origin.
struct Fit {
	cx: f64,
	cy: f64,
	scale: f64,
}

impl Fit {
	fn new(points: &[(f64, f64)], width: f64, height: f64) -> Option<Self> {
		let (first, rest) = points.split_first()?;
		let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.0, first.0, first.1, first.1);
		for &(x, y) in rest {
			min_x = min_x.min(x);
			max_x = max_x.max(x);
			min_y = min_y.min(y);
			max_y = max_y.max(y);
		}
		let extent = (max_x - min_x).max(max_y - min_y);
		let scale = if extent > 0.0 {
			width.min(height) * 0.9 / extent
		} else {
			1.0
		};
		Some(Self {
			cx: (min_x + max_x) / 2.0,
			cy: (min_y + max_y) / 2.0,
			scale,
		})
	}

	/// Data space has y pointing up; the canvas has it pointing down.
	fn apply(&self, x: f64, y: f64) -> (f32, f32) {
		(
			((x - self.cx) * self.scale) as f32,
			(-(y - self.cy) * self.scale) as f32,
		)
	}
}

impl ForceGraphState {
	pub fn new(
		graph: &Graph,
		width: f64,
		height: f64,
		theme: &Theme,
		settings: &ExplorerSettings,
	) -> Self {
		let mut layout = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut degree: HashMap<&str, usize> = HashMap::new();
		for edge in graph.edges() {
			if let Some((s, t)) = graph.extremities(edge) {
				*degree.entry(s).or_insert(0) += 1;
				*degree.entry(t).or_insert(0) += 1;
			}
		}
		let max_degree = degree.values().copied().max().unwrap_or(1).max(1);
		let max_size = graph
			.nodes()
			.filter_map(|n| numeric(graph, &n.id, "size"))
			.fold(0.0_f64, f64::max);

		let positioned: Vec<(f64, f64)> = graph
			.nodes()
			.filter_map(|n| Some((numeric(graph, &n.id, "x")?, numeric(graph, &n.id, "y")?)))
			.collect();
		let fit = Fit::new(&positioned, width, height);

		// first category term -> palette slot, in order of appearance
		let mut category_colors: HashMap<String, Color> = HashMap::new();
		let count = graph.node_count().max(1);
		let mut all_anchored = true;
		let mut id_to_idx = HashMap::new();

		for (i, node) in graph.nodes().enumerate() {
			let color = match node.attributes.get("color").and_then(AttrValue::as_str) {
				Some(css) => Color::parse(css),
				None => node
					.attributes
					.get(CATEGORY_ATTRIBUTE)
					.map(|v| v.to_string())
					.and_then(|v| v.split(',').next().map(|t| t.trim().to_string()))
					.filter(|t| !t.is_empty())
					.map(|term| {
						let next = category_colors.len();
						*category_colors
							.entry(term)
							.or_insert_with(|| theme.palette.get(next))
					})
					.unwrap_or(theme.node.default_color),
			};

			let size = match numeric(graph, &node.id, "size") {
				Some(s) if max_size > 0.0 => 0.6 + 1.6 * (s / max_size).sqrt(),
				_ => {
					let d = degree.get(node.id.as_str()).copied().unwrap_or(0);
					0.7 + 0.8 * (d as f64 / max_degree as f64).sqrt()
				}
			};

			let precomputed = match (
				&fit,
				numeric(graph, &node.id, "x"),
				numeric(graph, &node.id, "y"),
			) {
				(Some(fit), Some(x), Some(y)) => Some(fit.apply(x, y)),
				_ => None,
			};
			let (x, y) = precomputed.unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});
			all_anchored &= precomputed.is_some();

			let idx = layout.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: precomputed.is_some(),
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label().to_string(),
					color,
					size,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for edge in graph.edges() {
			if let Some((s, t)) = graph.extremities(edge) {
				if let (Some(&src), Some(&tgt)) = (id_to_idx.get(s), id_to_idx.get(t)) {
					layout.add_edge(src, tgt, EdgeData { user_data: edge });
				}
			}
		}

		Self {
			graph: layout,
			camera: Camera::new(width, height, settings.zoom_bounds()),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: !all_anchored,
			dirty: true,
		}
	}

	/// Topmost visible node under a canvas point. `pickable` decides which
	/// node keys may be hit (hidden nodes may not).
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		scale: &ScaledValues,
		pickable: impl Fn(&str) -> bool,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.camera.screen_to_graph(sx, sy);
		let mut found = None;
		let mut best = f64::INFINITY;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			let reach = scale.radius(node.data.user_data.size) + scale.hit_slack;
			if dist < reach && dist < best && pickable(&node.data.user_data.id) {
				best = dist;
				found = Some(node.index());
			}
		});
		found
	}

	/// Key of the node behind a simulation index.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Begin a drag on `idx` at canvas point `(x, y)`.
	pub fn start_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			..DragState::default()
		};
		let drag = &mut self.drag;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				drag.node_start_x = node.x();
				drag.node_start_y = node.y();
			}
		});
	}

	/// Begin panning the background from canvas point `(x, y)`.
	pub fn start_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.camera.transform.x,
			transform_start_y: self.camera.transform.y,
		};
	}

	/// Follow the pointer while dragging or panning.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if self.drag.active {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (dx * dx + dy * dy).sqrt() < CLICK_TOLERANCE {
				return;
			}
			self.drag.moved = true;
			self.dirty = true;
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let k = self.camera.transform.k;
			let (nx, ny) = (
				self.drag.node_start_x + (dx / k) as f32,
				self.drag.node_start_y + (dy / k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.dirty = true;
			self.camera.pan_to(
				self.pan.transform_start_x + (x - self.pan.start_x),
				self.pan.transform_start_y + (y - self.pan.start_y),
			);
		}
	}

	/// End any drag or pan. Returns the clicked node if the pointer never
	/// left the click tolerance.
	pub fn pointer_released(&mut self) -> Option<DefaultNodeIdx> {
		let clicked = if self.drag.active && !self.drag.moved {
			self.drag.node_idx
		} else {
			None
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn tick(&mut self, dt: f64) {
		if self.animation_running {
			self.graph.update(dt as f32);
		}
		if self.camera.is_animating() {
			self.camera.tick(dt);
			self.dirty = true;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}

	/// Force a redraw on the next frame, e.g. after the view state or the
	/// camera changed outside the pointer handlers.
	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Whether this frame must be drawn. Resets the dirty flag.
	pub fn take_redraw(&mut self) -> bool {
		let redraw = self.dirty || self.animation_running;
		self.dirty = false;
		redraw
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::camera::CameraCommand;
	use crate::components::force_graph::scale::ScaleConfig;
	use crate::explorer::types::{GraphData, GraphLink, GraphNode};

	fn positioned_graph() -> Graph {
		let node = |key: &str, x: f64, y: f64| GraphNode {
			key: key.to_string(),
			attributes: [
				("label".to_string(), AttrValue::Text(key.to_uppercase())),
				("x".to_string(), AttrValue::Number(x)),
				("y".to_string(), AttrValue::Number(y)),
			]
			.into_iter()
			.collect(),
		};
		Graph::from_data(GraphData {
			nodes: vec![node("a", -10.0, 0.0), node("b", 10.0, 0.0)],
			edges: vec![GraphLink {
				source: "a".into(),
				target: "b".into(),
			}],
		})
		.unwrap()
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(
			&positioned_graph(),
			200.0,
			200.0,
			&Theme::default(),
			&ExplorerSettings::default(),
		)
	}

	#[test]
	fn precomputed_layout_is_fitted_and_static() {
		let st = state();
		assert!(!st.animation_running);

		let mut xs = Vec::new();
		st.graph.visit_nodes(|n| {
			assert!(n.data.is_anchor);
			xs.push(n.x());
		});
		xs.sort_by(f32::total_cmp);
		// 20 data units span 90% of a 200px viewport
		assert_eq!(xs, vec![-90.0, 90.0]);
	}

	#[test]
	fn picking_skips_unpickable_nodes() {
		let st = state();
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		// node "a" sits at canvas (10, 100)
		let hit = st.node_at_position(10.0, 100.0, &scale, |_| true);
		assert_eq!(hit.and_then(|i| st.node_id(i)).as_deref(), Some("a"));
		assert_eq!(st.node_at_position(10.0, 100.0, &scale, |id| id != "a"), None);
		assert_eq!(st.node_at_position(100.0, 100.0, &scale, |_| true), None);
	}

	#[test]
	fn small_motion_is_a_click_large_motion_a_drag() {
		let mut st = state();
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		let idx = st.node_at_position(10.0, 100.0, &scale, |_| true).unwrap();

		st.start_drag(idx, 10.0, 100.0);
		st.pointer_moved(11.0, 101.0);
		assert_eq!(st.pointer_released(), Some(idx));

		st.start_drag(idx, 10.0, 100.0);
		st.pointer_moved(40.0, 100.0);
		assert_eq!(st.pointer_released(), None);
		st.graph.visit_nodes(|n| {
			if n.index() == idx {
				assert_eq!(n.x(), -60.0);
			}
		});
	}

	#[test]
	fn idle_static_layout_skips_redraws() {
		let mut st = state();
		assert!(st.take_redraw());
		st.tick(0.016);
		assert!(!st.take_redraw());

		st.start_pan(50.0, 50.0);
		st.pointer_moved(60.0, 50.0);
		assert!(st.take_redraw());
		st.pointer_released();
		st.tick(0.016);
		assert!(!st.take_redraw());

		st.camera.animate(CameraCommand::ZoomIn, 200.0, 200.0, 1.5, 600.0);
		st.tick(0.3);
		assert!(st.take_redraw());
		st.tick(0.4);
		// the frame that lands on the target is still drawn
		assert!(st.take_redraw());
		st.tick(0.016);
		assert!(!st.take_redraw());

		st.mark_dirty();
		assert!(st.take_redraw());
	}

	#[test]
	fn background_drag_pans_the_camera() {
		let mut st = state();
		st.start_pan(50.0, 50.0);
		st.pointer_moved(70.0, 40.0);
		assert_eq!(st.pointer_released(), None);
		assert_eq!(st.camera.transform.x, 120.0);
		assert_eq!(st.camera.transform.y, 90.0);
	}
}
