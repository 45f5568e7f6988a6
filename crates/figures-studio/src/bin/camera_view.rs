//! World-space triangle seen through a camera, projected with the 4x4 matrix.
//!
//! Usage:
//!   cargo run -p figures-studio --bin camera_view -- [front|oblique|orbit]

use figures_math::Variant;

fn main() -> anyhow::Result<()> {
    figures_studio::run("camera_view", Variant::Camera)
}
