/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width divided by height; 1.0 for degenerate sizes.
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}

/// Renderer-facing context (device/queue + target formats + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

/// Target for drawing (encoder + color and depth views).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: &'a wgpu::TextureView,
    ) -> Self {
        Self {
            encoder,
            color_view,
            depth_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_initial_window() {
        assert_eq!(Viewport::new(640, 480).aspect(), 640.0 / 480.0);
    }

    #[test]
    fn degenerate_viewport_has_unit_aspect() {
        assert!(!Viewport::new(0, 480).is_valid());
        assert_eq!(Viewport::new(0, 480).aspect(), 1.0);
        assert_eq!(Viewport::default().aspect(), 1.0);
    }
}
