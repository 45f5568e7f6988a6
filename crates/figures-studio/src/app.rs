use anyhow::Result;
use glam::Mat4;

use figures_engine::core::{App, AppControl, FrameCtx};
use figures_engine::render::triangle::TriangleRenderer;
use figures_engine::render::Viewport;
use figures_engine::shader::{ShaderError, ShaderProgram};
use figures_math::figure::TRIANGLE_COLORS;
use figures_math::projection::{DEFAULT_FAR, DEFAULT_FOV_Y, DEFAULT_NEAR};
use figures_math::{Figure, Projection, Stage};

/// Projection parameters and background shared by every figure.
#[derive(Debug, Clone, Copy)]
pub struct FigureSettings {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub clear: wgpu::Color,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            fov_y: DEFAULT_FOV_Y,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            clear: wgpu::Color::TRANSPARENT,
        }
    }
}

impl FigureSettings {
    /// Projection for a drawable of `viewport` size.
    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::from_window(self.fov_y, viewport.width, viewport.height, self.near, self.far)
    }
}

/// Draws one figure: recomputes the matrices every frame, transforms the
/// three vertices, uploads them and draws the triangle.
pub struct FigureApp {
    figure: Figure,
    settings: FigureSettings,
    renderer: TriangleRenderer,
    /// Viewport the matrices were last logged for.
    logged_for: Option<Viewport>,
}

impl FigureApp {
    pub fn new(
        figure: Figure,
        settings: FigureSettings,
        program: ShaderProgram,
    ) -> Result<Self, ShaderError> {
        if let Stage::Camera(camera) = &figure.stage {
            if !camera.is_orthonormal(1e-4) {
                log::warn!("camera basis of `{}` is not orthonormal", figure.name);
            }
        }

        log::info!("figure `{}`: {}", figure.name, figure.description);

        Ok(Self {
            renderer: TriangleRenderer::new(program, TRIANGLE_COLORS)?,
            figure,
            settings,
            logged_for: None,
        })
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    fn log_matrices(&mut self, viewport: Viewport, projection: &Projection) {
        if self.logged_for == Some(viewport) || !log::log_enabled!(log::Level::Debug) {
            return;
        }
        self.logged_for = Some(viewport);

        log::debug!("viewport {}x{}", viewport.width, viewport.height);
        match &self.figure.stage {
            Stage::ClipSpace => {
                for (i, row) in projection.rows_3x4().iter().enumerate() {
                    log::debug!("P[{i}] = {row:.4}");
                }
            }
            Stage::Camera(camera) => {
                log_rows("P", projection.matrix());
                log_rows("C", camera.view_matrix());
            }
        }
    }
}

/// Clip-space positions of `figure` as uploaded to the vertex buffer.
fn upload_positions(figure: &Figure, projection: &Projection) -> Result<[[f32; 4]; 3]> {
    let positions = figure.clip_positions(projection).ok_or_else(|| {
        anyhow::anyhow!("figure `{}` has a vertex on the z = 0 plane", figure.name)
    })?;
    Ok(positions.map(|v| v.to_array()))
}

fn log_rows(name: &str, m: Mat4) {
    for i in 0..4 {
        log::debug!("{name}[{i}] = {:.4}", m.row(i));
    }
}

impl App for FigureApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.gpu.size();
        let viewport = Viewport::new(size.width, size.height);
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let projection = self.settings.projection(viewport);
        self.log_matrices(viewport, &projection);

        let positions = match upload_positions(&self.figure, &projection) {
            Ok(positions) => positions,
            Err(err) => {
                ctx.runtime.fail(err);
                return AppControl::Exit;
            }
        };

        let renderer = &mut self.renderer;
        ctx.render(self.settings.clear, |rctx, target| {
            renderer.render(rctx, target, &positions);
        })
    }
}
