//! Rendering
//!
//! Draws a `Simulation` onto any `RenderTarget`. The browser build uses a
//! canvas 2D context; tests record the command stream.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod target;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasTarget;
pub use draw::{draw_frame, draw_road, draw_segment, draw_vehicle, palette};
pub use target::{DrawCommand, RecordingTarget, RenderTarget};
