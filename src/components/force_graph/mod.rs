//! Graph canvas component.
//!
//! Renders the explorer graph on an HTML canvas with:
//! - Pre-computed positions, or a force simulation when the data has none
//! - Pan, zoom, node dragging, and node clicks
//! - Animated zoom-in/zoom-out/reset camera commands
//! - Per-frame styling from the view state's display overrides
//!
//! # Example
//!
//! ```ignore
//! use bioc_graph::{CameraCommand, GraphCanvas};
//!
//! view! {
//!     <GraphCanvas
//!         explorer=explorer
//!         view=view_state
//!         label_threshold=threshold
//!         camera=camera
//!         on_node_click=on_click
//!         fullscreen=true
//!     />
//! }
//! ```

mod camera;
mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use camera::CameraCommand;
pub use component::GraphCanvas;
pub use theme::Theme;
