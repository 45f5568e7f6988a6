//! The two figure programs.
//!
//! `clip_space` projects view-space vertices with the 3x4 matrix and divides
//! by depth on the CPU. `camera_view` runs world-space vertices through the
//! camera matrix and the 4x4 projection, leaving the divide to the GPU.

pub mod app;
pub mod args;

use anyhow::{Context, Result};

use figures_engine::device::GpuInit;
use figures_engine::logging::{init_logging, LoggingConfig};
use figures_engine::shader::ShaderProgram;
use figures_engine::window::{Runtime, RuntimeConfig};
use figures_math::figure::{self, Variant};

pub use app::{FigureApp, FigureSettings};
pub use args::StudioArgs;

/// Runs the figure program for `variant` with the process arguments.
pub fn run(program: &str, variant: Variant) -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = StudioArgs::from_env().with_context(|| args::usage(program))?;
    if args.help {
        println!("{}", args::usage(program));
        return Ok(());
    }

    if args.list {
        for fig in figure::presets(variant) {
            println!("{:<10} {}", fig.name, fig.description);
        }
        return Ok(());
    }

    let figure = match args.figure.as_deref() {
        Some(name) => figure::find(variant, name).with_context(|| {
            format!("unknown {} figure `{name}` (see --list)", variant.label())
        })?,
        None => figure::presets(variant)
            .into_iter()
            .next()
            .context("no figure presets")?,
    };

    let shaders = ShaderProgram::load(args.vertex_shader(), args.fragment_shader())?;

    let config = RuntimeConfig {
        title: format!("projection figures: {} ({})", figure.name, variant.label()),
        ..Default::default()
    };
    let app = FigureApp::new(figure, FigureSettings::default(), shaders)?;

    Runtime::run(config, GpuInit::default(), app)
}
