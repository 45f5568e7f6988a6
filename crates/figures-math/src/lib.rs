//! Linear algebra behind the projection figures.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`projection`] | `Projection`: 3x4 and 4x4 perspective matrices |
//! | [`camera`] | `Camera`: position + basis, view matrix `C1 * C2` |
//! | [`figure`] | `Figure` presets and the vertex pipeline feeding the GPU |
//!
//! # Quick start
//!
//! ```rust
//! use figures_math::figure::{find, Variant};
//! use figures_math::projection::Projection;
//!
//! let fig = find(Variant::Camera, "front").unwrap();
//! let positions = fig.clip_positions(&Projection::default()).unwrap();
//! assert_eq!(positions[0].w, 4.0);
//! ```

pub mod camera;
pub mod figure;
pub mod projection;

pub use camera::Camera;
pub use figure::{Figure, Stage, Variant};
pub use projection::Projection;
