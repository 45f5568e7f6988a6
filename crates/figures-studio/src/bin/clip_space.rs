//! Triangle given directly in view space, projected with the 3x4 matrix.
//!
//! Usage:
//!   cargo run -p figures-studio --bin clip_space -- [near|far|slanted]

use figures_math::Variant;

fn main() -> anyhow::Result<()> {
    figures_studio::run("clip_space", Variant::ClipSpace)
}
