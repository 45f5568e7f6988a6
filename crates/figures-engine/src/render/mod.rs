//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily on first use. Geometry arrives already in clip space.

mod ctx;
mod depth;
pub mod triangle;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use depth::DepthTarget;
