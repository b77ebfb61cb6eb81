//! Leptos component wrapping the graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node clicks, node dragging, panning, and zooming. An animation
//! loop runs via `requestAnimationFrame`, ticking the layout and camera and
//! redrawing from the current view state whenever something visible changed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::camera::CameraCommand;
use super::render::{self, Frame};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::explorer::Explorer;
use crate::explorer::display::node_display;
use crate::explorer::view_state::ViewState;

/// Bundles canvas-side graph state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Canvas coordinates of a mouse event.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Queue `callback` for the next animation frame.
fn schedule(callback: &FrameCallback) {
	if let (Some(cb), Some(win)) = (callback.borrow().as_ref(), web_sys::window()) {
		let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders the explorer graph on a canvas element.
///
/// Node and edge styling follows `view` on every frame. Clicking a visible
/// node reports its key through `on_node_click`; camera commands arrive
/// through `camera`. The canvas sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport and follow window
/// resizes.
#[component]
pub fn GraphCanvas(
	explorer: Arc<Explorer>,
	view: RwSignal<ViewState>,
	#[prop(into)] label_threshold: Signal<f64>,
	#[prop(into)] camera: Signal<Option<CameraCommand>>,
	on_node_click: Callback<String>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, explorer_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		explorer.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("bioc-graph: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("bioc-graph: canvas 2d context unavailable");
				return;
			}
		};

		let theme = Theme::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(
				&explorer_init.graph,
				w,
				h,
				&theme,
				&explorer_init.settings,
			),
			scale: ScaleConfig::default(),
			theme,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, explorer_anim) = (
			context_init.clone(),
			animate_init.clone(),
			explorer_init.clone(),
		);
		let last_frame = Cell::new(js_sys::Date::now());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame.replace(now)) / 1000.0).clamp(0.0, 0.1);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				if c.state.take_redraw() {
					view.with_untracked(|v| {
						let frame = Frame {
							view: v,
							graph: &explorer_anim.graph,
							label_threshold: label_threshold.get_untracked(),
						};
						render::render(&c.state, &ctx, &c.scale, &c.theme, &frame);
					});
				}
			}
			schedule(&animate_inner);
		}));
		schedule(&animate_init);
	});

	// View state or label density changed: the next frame must be drawn.
	let context_view = context.clone();
	Effect::new(move |_| {
		view.track();
		label_threshold.track();
		if let Some(ref mut c) = *context_view.borrow_mut() {
			c.state.mark_dirty();
		}
	});

	let (context_cam, settings) = (context.clone(), explorer.settings.clone());
	Effect::new(move |_| {
		let Some(command) = camera.get() else {
			return;
		};
		if let Some(ref mut c) = *context_cam.borrow_mut() {
			let (w, h) = (c.state.width, c.state.height);
			c.state.camera.animate(
				command,
				w,
				h,
				settings.zoom_factor,
				settings.zoom_duration_ms,
			);
			c.state.mark_dirty();
		}
	});

	let (context_md, explorer_md) = (context.clone(), explorer.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let scale = ScaledValues::new(&c.scale, c.state.camera.transform.k);
			let hit = view.with_untracked(|v| {
				c.state.node_at_position(x, y, &scale, |id| {
					!node_display(v, id, &explorer_md.graph).hidden
				})
			});
			match hit {
				Some(idx) => c.state.start_drag(idx, x, y),
				None => c.state.start_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_moved(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => c
				.state
				.pointer_released()
				.and_then(|idx| c.state.node_id(idx)),
			None => None,
		};
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_released();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.camera.zoom_at(x, y, factor);
			c.state.mark_dirty();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
