//! Visual theming for the graph canvas.
//!
//! Provides colors, the category palette, and the styles used for dimmed and
//! highlighted nodes.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses a CSS color string. Supports hex (`#RRGGBB`, `#RGB`) and
	/// `rgb()`/`rgba()` functional notation; anything else is mid gray.
	pub fn parse(css: &str) -> Self {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(128);
			let short = |s: &str| u8::from_str_radix(s, 16).unwrap_or(8) * 17;
			return match hex.len() {
				_ if !hex.is_ascii() => Color::rgb(128, 128, 128),
				6 => Color::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
				3 => Color::rgb(short(&hex[0..1]), short(&hex[1..2]), short(&hex[2..3])),
				_ => Color::rgb(128, 128, 128),
			};
		}
		if css.starts_with("rgb") {
			let nums: Vec<&str> = css
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let channel = |i: usize| nums.get(i).and_then(|s| s.parse().ok()).unwrap_or(128);
			let a = nums.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);
			return Color::rgba(channel(0), channel(1), channel(2), a);
		}
		Color::rgb(128, 128, 128)
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors handed out to categories in order of first appearance.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Saturated but not loud; readable on a white background.
	pub fn categorical() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Fallback for nodes without category or color
	pub default_color: Color,
	/// Fill for nodes outside the current focus
	pub dimmed_color: Color,
	/// Ring drawn around the selected node
	pub highlight_color: Color,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// Backdrop behind labels of highlighted nodes
	pub highlight_background: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: LabelStyle,
	pub palette: NodePalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(250, 250, 252),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(180, 180, 180, 0.8),
			},
			node: NodeStyle {
				use_gradient: false,
				default_color: Color::rgb(153, 153, 153),
				dimmed_color: Color::parse("#f6f6f6"),
				highlight_color: Color::rgb(34, 34, 34),
			},
			label: LabelStyle {
				color: Color::rgb(0, 0, 0),
				highlight_background: Color::rgba(255, 255, 255, 0.9),
			},
			palette: NodePalette::categorical(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_notations() {
		assert_eq!(Color::parse("#f6f6f6"), Color::rgb(246, 246, 246));
		assert_eq!(Color::parse("#fff"), Color::rgb(255, 255, 255));
		assert_eq!(Color::parse("rgb(1, 2, 3)"), Color::rgb(1, 2, 3));
		assert_eq!(Color::parse("rgba(1,2,3,0.5)"), Color::rgba(1, 2, 3, 0.5));
		assert_eq!(Color::parse("teal"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn lighten_and_darken_hit_extremes() {
		let c = Color::rgb(100, 100, 100);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(c.lighten(0.0), c);
	}
}
