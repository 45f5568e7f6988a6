use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{ShaderError, ShaderProgram};

/// Vertex attribute slot of the per-vertex RGB color.
pub const COLOR_LOCATION: u32 = 0;
/// Vertex attribute slot of the clip-space position.
pub const POSITION_LOCATION: u32 = 1;

/// Draws a single depth-tested triangle.
///
/// Colors are uploaded once. Positions are homogeneous clip-space coordinates
/// (OpenGL depth convention) and are rewritten on every `render` call.
pub struct TriangleRenderer {
    program: ShaderProgram,
    colors: [ColorVertex; 3],

    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    color_vbo: Option<wgpu::Buffer>,
    position_vbo: Option<wgpu::Buffer>,
}

impl TriangleRenderer {
    /// Creates a renderer for a linked program whose vertex stage reads a
    /// `vec3<f32>` color and a `vec4<f32>` position.
    pub fn new(program: ShaderProgram, colors: [[f32; 3]; 3]) -> Result<Self, ShaderError> {
        Self::check_program(&program)?;

        Ok(Self {
            program,
            colors: colors.map(|color| ColorVertex { color }),
            pipeline_formats: None,
            pipeline: None,
            color_vbo: None,
            position_vbo: None,
        })
    }

    /// Verifies the vertex stage consumes the renderer's buffer layout.
    pub fn check_program(program: &ShaderProgram) -> Result<(), ShaderError> {
        program.require_vertex_input(COLOR_LOCATION, 3)?;
        program.require_vertex_input(POSITION_LOCATION, 4)
    }

    /// Uploads `positions` and draws them as one triangle.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        positions: &[[f32; 4]; 3],
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);

        let Some(position_vbo) = self.position_vbo.as_ref() else { return };
        let raw = positions.map(|position| PositionVertex { position });
        ctx.queue.write_buffer(position_vbo, 0, bytemuck::cast_slice(&raw));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(color_vbo) = self.color_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("figures triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, color_vbo.slice(..));
        rpass.set_vertex_buffer(1, position_vbo.slice(..));
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let vs = self.program.vertex.create_module(ctx.device);
        let fs = self.program.fragment.create_module(ctx.device);

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("figures triangle pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("figures triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(self.program.vertex.entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &[ColorVertex::layout(), PositionVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(self.program.fragment.entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "created triangle pipeline for {:?} / {:?}",
            ctx.surface_format,
            ctx.depth_format
        );

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.color_vbo.is_none() {
            self.color_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("figures triangle color vbo"),
                contents: bytemuck::cast_slice(&self.colors),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }

        if self.position_vbo.is_none() {
            self.position_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("figures triangle position vbo"),
                size: (3 * std::mem::size_of::<PositionVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ColorVertex {
    color: [f32; 3],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![COLOR_LOCATION => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PositionVertex {
    position: [f32; 4],
}

impl PositionVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![POSITION_LOCATION => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PositionVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
