use super::Viewport;

/// Depth buffer matching the surface size.
///
/// The texture is recreated whenever the requested size or format changes.
#[derive(Default)]
pub struct DepthTarget {
    view: Option<wgpu::TextureView>,
    /// Format and size of `view`; `None` exactly when `view` is.
    built_for: Option<(wgpu::TextureFormat, Viewport)>,
}

impl DepthTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a depth view of `size`, (re)creating the texture if needed.
    ///
    /// `size` must be valid (non-zero).
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: Viewport,
    ) -> &wgpu::TextureView {
        debug_assert!(size.is_valid());

        if is_stale(self.built_for, format, size) {
            log::debug!("creating {format:?} depth buffer {}x{}", size.width, size.height);
            self.view = None;
            self.built_for = Some((format, size));
        }

        self.view
            .get_or_insert_with(|| create_depth_view(device, format, size))
    }
}

fn is_stale(
    built_for: Option<(wgpu::TextureFormat, Viewport)>,
    format: wgpu::TextureFormat,
    size: Viewport,
) -> bool {
    built_for != Some((format, size))
}

fn create_depth_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: Viewport,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("figures depth texture"),
        size: wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
