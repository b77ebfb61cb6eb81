//! Renderer and camera settings, optionally overridden by the page.

use serde::Deserialize;

/// Tunables the page may override through embedded JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
	/// Smallest camera ratio, i.e. the deepest zoom (`k = 1 / ratio`).
	pub min_camera_ratio: f64,
	/// Largest camera ratio, i.e. the widest view.
	pub max_camera_ratio: f64,
	/// Labels are drawn for nodes at least this many pixels in radius.
	pub label_rendered_size_threshold: f64,
	/// Duration of button-driven camera animations.
	pub zoom_duration_ms: f64,
	/// Zoom change per button press.
	pub zoom_factor: f64,
}

impl Default for ExplorerSettings {
	fn default() -> Self {
		Self {
			min_camera_ratio: 0.08,
			max_camera_ratio: 3.0,
			label_rendered_size_threshold: 3.0,
			zoom_duration_ms: 600.0,
			zoom_factor: 1.5,
		}
	}
}

impl ExplorerSettings {
	/// Allowed zoom range as `(min_k, max_k)`.
	pub fn zoom_bounds(&self) -> (f64, f64) {
		(1.0 / self.max_camera_ratio, 1.0 / self.min_camera_ratio)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let s: ExplorerSettings =
			serde_json::from_str(r#"{ "label_rendered_size_threshold": 6 }"#).unwrap();
		assert_eq!(s.label_rendered_size_threshold, 6.0);
		assert_eq!(s.zoom_duration_ms, 600.0);
	}

	#[test]
	fn zoom_bounds_invert_ratios() {
		let (min_k, max_k) = ExplorerSettings::default().zoom_bounds();
		assert!((min_k - 1.0 / 3.0).abs() < 1e-9);
		assert!((max_k - 12.5).abs() < 1e-9);
	}
}
