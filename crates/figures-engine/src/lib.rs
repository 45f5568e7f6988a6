//! Figures engine crate.
//!
//! Owns the platform + GPU runtime pieces the figure programs sit on: a single
//! winit window, a wgpu surface with a depth buffer, shader compile/link, and
//! a triangle renderer.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod shader;
pub mod window;
