use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{DepthTarget, RenderCtx, RenderTarget, Viewport};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// The window being drawn.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `'a` is the callback duration, `'w` the window borrow carried by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub depth: &'a mut DepthTarget,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Clears color to `clear` and depth to 1.0, calls `draw`, then presents.
    ///
    /// Frames are skipped while the surface has zero area. An unrecoverable
    /// surface error is handed to the runtime and ends the program.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let size = self.gpu.size();
        let viewport = Viewport::new(size.width, size.height);
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(&err) {
                    SurfaceErrorAction::Fatal => {
                        let err = anyhow::Error::new(err).context("failed to acquire surface texture");
                        self.runtime.fail(err);
                        AppControl::Exit
                    }
                    SurfaceErrorAction::Reconfigured => {
                        self.runtime.request_redraw();
                        AppControl::Continue
                    }
                    SurfaceErrorAction::SkipFrame => AppControl::Continue,
                };
            }
        };

        let depth_view = self
            .depth
            .prepare(self.gpu.device(), self.gpu.depth_format(), viewport);

        // Clear pass; dropped before the encoder is lent to `draw`.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("figures clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx {
            device: self.gpu.device(),
            queue: self.gpu.queue(),
            surface_format: self.gpu.surface_format(),
            depth_format: self.gpu.depth_format(),
            viewport,
        };

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, depth_view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
