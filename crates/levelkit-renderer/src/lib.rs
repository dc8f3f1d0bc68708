//! # LevelKit Renderer
//!
//! Projection of the editor state onto the 2D canvas. The host draws the
//! returned [`RenderFrame`] command by command; nothing here touches a
//! graphics API.
//!
//! Frames are JSON-serializable so a web canvas can consume them as is.

pub mod viewport;
pub mod render_data;
pub mod projector;

pub use projector::{draw_order, project, project_editor};
pub use render_data::{DrawCommand, DrawLayer, Paint, RenderFrame, Shape};
pub use viewport::Viewport;
