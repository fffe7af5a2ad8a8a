//! Rendering module
//!
//! `shapes` builds a backend-agnostic draw list from the world; `canvas`
//! paints it with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{Shape, build_frame};
