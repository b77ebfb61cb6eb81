//! Per-frame sizes for nodes, labels, edges, and rings.
//!
//! Drawing happens after the canvas transform is applied, so everything in
//! [`ScaledValues`] is in graph units. Sizes configured in pixels are divided
//! by the zoom level to stay constant on screen.

/// Screen-pixel bounds for the base node radius. Between the bounds nodes
/// grow with zoom; outside them they stop shrinking or growing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusBounds {
	/// Smallest on-screen radius of a size-1.0 node.
	pub min_screen: f64,
	/// Largest on-screen radius of a size-1.0 node.
	pub max_screen: f64,
}

impl RadiusBounds {
	/// Graph-unit radius for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		base.clamp(self.min_screen / k, self.max_screen / k)
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Radius of a size-1.0 node in graph units.
	pub radius: f64,
	/// On-screen limits for `radius`.
	pub radius_bounds: RadiusBounds,
	/// Extra hit-test slack in screen pixels.
	pub hit_slack: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
}

/// Sizes the renderer draws with.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node and label sizes.
	pub node: NodeScaleConfig,
	/// Edge line width in screen pixels.
	pub edge_width: f64,
	/// Selection ring width in screen pixels.
	pub ring_width: f64,
	/// Gap between a node and its selection ring, in screen pixels.
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 4.0,
				radius_bounds: RadiusBounds {
					min_screen: 1.5,
					max_screen: 40.0,
				},
				hit_slack: 3.0,
				label_size: 12.0,
			},
			edge_width: 0.8,
			ring_width: 2.0,
			ring_offset: 2.0,
		}
	}
}

/// [`ScaleConfig`] resolved for one zoom level.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Radius of a size-1.0 node.
	pub node_radius: f64,
	/// Hit-test slack.
	pub hit_slack: f64,
	/// Label font, sized so text stays constant on screen.
	pub label_font: String,
	/// Label font size, matching `label_font`.
	pub label_size: f64,
	/// Edge stroke width.
	pub edge_line_width: f64,
	/// Highlight ring stroke width.
	pub ring_width: f64,
	/// Gap between a node and its ring.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.node.label_size / k;
		Self {
			k,
			node_radius: config.node.radius_bounds.apply(config.node.radius, k),
			hit_slack: config.node.hit_slack / k,
			label_font: format!("{}px sans-serif", label_size),
			label_size,
			edge_line_width: config.edge_width / k,
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Radius of a node with the given size multiplier.
	pub fn radius(&self, size: f64) -> f64 {
		self.node_radius * size
	}

	/// On-screen radius in pixels, compared against the label threshold.
	pub fn screen_radius(&self, size: f64) -> f64 {
		self.radius(size) * self.k
	}
}
