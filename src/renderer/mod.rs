//! 2D rendering
//!
//! `scene` turns arena state into a flat list of [`DrawCommand`]s; a [`Surface`]
//! replays them (HTML canvas on web, a recorder for tests and headless runs).

#[cfg(target_arch = "wasm32")]
mod canvas;
mod commands;
mod recorder;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use commands::{Color, DrawCommand, Rect};
pub use recorder::CommandRecorder;
pub use scene::build_frame;

/// Something a frame's draw commands can be replayed onto
pub trait Surface {
    fn draw(&mut self, commands: &[DrawCommand]);
}
