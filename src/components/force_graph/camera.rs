//! Pan/zoom camera with animated zoom buttons.
//!
//! The camera's zoom `k` is the inverse of a sigma-style camera ratio: a ratio
//! of 0.5 shows the graph twice as large as at rest.

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl ViewTransform {
	/// Resting position: graph origin at the viewport center.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	/// Scale by `factor` keeping the screen point `(sx, sy)` fixed.
	fn zoomed_at(self, sx: f64, sy: f64, factor: f64, bounds: (f64, f64)) -> Self {
		let k = (self.k * factor).clamp(bounds.0, bounds.1);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Camera operations bound to the zoom buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraCommand {
	ZoomIn,
	ZoomOut,
	Reset,
}

#[derive(Clone, Debug)]
struct Animation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

/// Ease in and out, quadratic.
fn quad_in_out(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

/// Current transform plus an optional in-flight animation.
#[derive(Clone, Debug)]
pub struct Camera {
	pub transform: ViewTransform,
	/// Allowed zoom range `(min_k, max_k)`.
	pub bounds: (f64, f64),
	animation: Option<Animation>,
}

impl Camera {
	pub fn new(width: f64, height: f64, bounds: (f64, f64)) -> Self {
		Self {
			transform: ViewTransform::centered(width, height),
			bounds,
			animation: None,
		}
	}

	/// Start animating towards the target of `command` over `duration_ms`.
	pub fn animate(
		&mut self,
		command: CameraCommand,
		width: f64,
		height: f64,
		factor: f64,
		duration_ms: f64,
	) {
		// chained presses build on the pending target, not the current frame
		let base = self
			.animation
			.as_ref()
			.map(|a| a.to)
			.unwrap_or(self.transform);
		let (cx, cy) = (width / 2.0, height / 2.0);
		let to = match command {
			CameraCommand::ZoomIn => base.zoomed_at(cx, cy, factor, self.bounds),
			CameraCommand::ZoomOut => base.zoomed_at(cx, cy, 1.0 / factor, self.bounds),
			CameraCommand::Reset => ViewTransform::centered(width, height),
		};

		if duration_ms <= 0.0 {
			self.transform = to;
			self.animation = None;
			return;
		}
		self.animation = Some(Animation {
			from: self.transform,
			to,
			elapsed: 0.0,
			duration: duration_ms / 1000.0,
		});
	}

	/// Immediate zoom around a screen point (mouse wheel). Cancels animations.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.animation = None;
		self.transform = self.transform.zoomed_at(sx, sy, factor, self.bounds);
	}

	/// Immediate translation to `(x, y)` (background drag). Cancels animations.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.animation = None;
		self.transform.x = x;
		self.transform.y = y;
	}

	/// Advance the animation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let Some(anim) = self.animation.as_mut() else {
			return;
		};
		anim.elapsed += dt;
		let t = anim.elapsed / anim.duration;
		if t >= 1.0 {
			self.transform = anim.to;
			self.animation = None;
		} else {
			self.transform = anim.from.lerp(anim.to, quad_in_out(t));
		}
	}

	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	/// Convert canvas coordinates to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}
}
