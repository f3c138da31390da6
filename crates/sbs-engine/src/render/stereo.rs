use wgpu::util::DeviceExt;

use crate::compositor::{DrawPass, Frame, FrameCmd};
use crate::coords::Rect;
use crate::device::DEPTH_FORMAT;
use crate::geometry::{
    CornerVertex, MeshKind, ParticleInstance, Topology, Vertex, BILLBOARD_CORNERS, BILLBOARD_INDICES,
};
use crate::paint::Color;
use crate::render::replay::{replay_into, stage_uniforms, DrawStep, DrawUniform, StepDraw};
use crate::render::{RenderCtx, RenderTarget};

// ── draw uniform ──────────────────────────────────────────────────────────

const UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

/// Returns the `wgpu` minimum binding size for one draw uniform slot.
fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    // DrawUniform is 96 bytes; never zero.
    std::num::NonZeroU64::new(UNIFORM_SIZE).unwrap_or(std::num::NonZeroU64::MIN)
}

/// Rounds `size` up to the device's dynamic offset alignment.
fn uniform_stride(alignment: u32) -> u64 {
    let align = u64::from(alignment.max(1));
    UNIFORM_SIZE.div_ceil(align) * align
}

// ── pipelines ─────────────────────────────────────────────────────────────

struct Pipelines {
    clear: wgpu::RenderPipeline,
    particles: wgpu::RenderPipeline,
    overlay_lines: wgpu::RenderPipeline,
    overlay_triangles: wgpu::RenderPipeline,
    faces: wgpu::RenderPipeline,
    edges: wgpu::RenderPipeline,
}

impl Pipelines {
    fn for_mesh(&self, topology: Topology, pass: DrawPass) -> &wgpu::RenderPipeline {
        match (pass, topology) {
            (DrawPass::Overlay, Topology::Lines) => &self.overlay_lines,
            (DrawPass::Overlay, Topology::Triangles) => &self.overlay_triangles,
            (DrawPass::SolidFaces, _) => &self.faces,
            (DrawPass::SolidEdges, _) => &self.edges,
        }
    }
}

struct MeshBuffer {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

/// Executes composed [`Frame`]s on the GPU.
///
/// Everything is drawn in a single render pass. The frame is flattened by
/// [`replay`](super::replay) first; each step's rect maps to
/// `set_viewport` + `set_scissor_rect` and its uniform slot to a dynamic
/// offset into one uniform buffer. Region clears draw a far-plane triangle
/// that also resets depth.
#[derive(Default)]
pub struct StereoRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<Pipelines>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    uniform_stride: u64,
    uniform_staging: Vec<u8>,
    steps: Vec<DrawStep>,

    meshes: Vec<MeshBuffer>,
    corner_vbo: Option<wgpu::Buffer>,
    corner_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_late_clear: bool,
}

impl StereoRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `frame` into `target`.
    pub fn render_frame(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &Frame) {
        self.ensure_pipelines(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_uniform_capacity(ctx, frame.uniform_slots());

        let full = ctx.surface.full_rect();
        if full.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        replay_into(frame, full, self.uniform_stride, &mut self.steps);
        self.write_uniforms(ctx);
        self.ensure_instance_capacity(ctx, frame.particles().len());
        if let Some(vbo) = self.instance_vbo.as_ref() {
            if !frame.particles().is_empty() {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(frame.particles()));
            }
        }

        let Some(pipelines) = self.pipelines.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(corner_vbo) = self.corner_vbo.as_ref() else { return };
        let Some(corner_ibo) = self.corner_ibo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        let clear = match frame.items().first().map(|i| &i.cmd) {
            Some(FrameCmd::ClearSurface { color }) => *color,
            _ => Color::BLACK,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sbs stereo pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
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

        let late_clear = frame
            .items()
            .iter()
            .skip(1)
            .any(|item| matches!(item.cmd, FrameCmd::ClearSurface { .. }));

        let mut current: Option<Rect> = None;
        for step in &self.steps {
            if current != Some(step.scissor) {
                isolate(&mut rpass, step.scissor);
                current = Some(step.scissor);
            }

            match &step.draw {
                StepDraw::ClearRegion => {
                    rpass.set_pipeline(&pipelines.clear);
                    rpass.set_bind_group(0, bind_group, &[step.uniform_offset]);
                    rpass.draw(0..3, 0..1);
                }
                StepDraw::Particles { instances } => {
                    rpass.set_pipeline(&pipelines.particles);
                    rpass.set_bind_group(0, bind_group, &[step.uniform_offset]);
                    rpass.set_vertex_buffer(0, corner_vbo.slice(..));
                    rpass.set_vertex_buffer(1, instance_vbo.slice(..));
                    rpass.set_index_buffer(corner_ibo.slice(..), wgpu::IndexFormat::Uint16);
                    rpass.draw_indexed(0..BILLBOARD_INDICES.len() as u32, 0, instances.clone());
                }
                StepDraw::Mesh { mesh, pass } => {
                    let Some(buffer) = self.meshes.get(mesh.index()) else { continue };
                    rpass.set_pipeline(pipelines.for_mesh(mesh.topology(), *pass));
                    rpass.set_bind_group(0, bind_group, &[step.uniform_offset]);
                    rpass.set_vertex_buffer(0, buffer.vbo.slice(..));
                    rpass.draw(0..buffer.vertex_count, 0..1);
                }
            }
        }

        drop(rpass);

        if late_clear && !self.warned_late_clear {
            log::debug!("StereoRenderer: surface clear after the first command ignored");
            self.warned_late_clear = true;
        }
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };

        stage_uniforms(&self.steps, &mut self.uniform_staging);
        if !self.uniform_staging.is_empty() {
            ctx.queue.write_buffer(ubo, 0, &self.uniform_staging);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sbs stereo shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stereo.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sbs draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(uniform_min_binding_size()),
                },
                count: None,
            }],
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sbs pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let builder = PipelineBuilder {
            device: ctx.device,
            layout: &layout,
            shader: &shader,
            format: ctx.surface_format,
        };

        let pipelines = Pipelines {
            clear: builder.build(
                "sbs clear pipeline",
                "vs_clear",
                &[],
                wgpu::PrimitiveTopology::TriangleList,
                None,
                depth(wgpu::CompareFunction::Always, true),
            ),
            particles: builder.build(
                "sbs particle pipeline",
                "vs_particle",
                &[CornerVertex::layout(), ParticleInstance::layout()],
                wgpu::PrimitiveTopology::TriangleList,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                depth(wgpu::CompareFunction::Always, false),
            ),
            overlay_lines: builder.build(
                "sbs overlay line pipeline",
                "vs_mesh",
                &[Vertex::layout()],
                wgpu::PrimitiveTopology::LineList,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                depth(wgpu::CompareFunction::Always, false),
            ),
            overlay_triangles: builder.build(
                "sbs overlay triangle pipeline",
                "vs_mesh",
                &[Vertex::layout()],
                wgpu::PrimitiveTopology::TriangleList,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                depth(wgpu::CompareFunction::Always, false),
            ),
            faces: builder.build(
                "sbs face pipeline",
                "vs_mesh",
                &[Vertex::layout()],
                wgpu::PrimitiveTopology::TriangleList,
                Some(wgpu::BlendState::REPLACE),
                depth(wgpu::CompareFunction::Less, true),
            ),
            edges: builder.build(
                "sbs edge pipeline",
                "vs_mesh",
                &[Vertex::layout()],
                wgpu::PrimitiveTopology::LineList,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                depth(wgpu::CompareFunction::LessEqual, false),
            ),
        };

        log::debug!("stereo pipelines created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipelines = Some(pipelines);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
        self.uniform_capacity = 0;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.meshes.is_empty() {
            self.meshes = MeshKind::ALL
                .iter()
                .map(|kind| {
                    let vertices = kind.build();
                    MeshBuffer {
                        vbo: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("sbs mesh vbo"),
                            contents: bytemuck::cast_slice(&vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        }),
                        vertex_count: vertices.len() as u32,
                    }
                })
                .collect();
            log::debug!("uploaded {} static meshes", self.meshes.len());
        }

        if self.corner_vbo.is_some() && self.corner_ibo.is_some() {
            return;
        }

        self.corner_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sbs billboard vbo"),
            contents: bytemuck::cast_slice(&BILLBOARD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.corner_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sbs billboard ibo"),
            contents: bytemuck::cast_slice(&BILLBOARD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required_slots: usize) {
        if required_slots <= self.uniform_capacity && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let stride = uniform_stride(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let new_cap = required_slots.next_power_of_two().max(64);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sbs draw ubo"),
            size: new_cap as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sbs draw bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: Some(uniform_min_binding_size()),
                }),
            }],
        });

        log::debug!("draw uniform buffer grown to {new_cap} slots ({stride} byte stride)");

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
        self.uniform_stride = stride;
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<ParticleInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sbs particle instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

fn isolate(rpass: &mut wgpu::RenderPass<'_>, rect: Rect) {
    rpass.set_viewport(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
        0.0,
        1.0,
    );
    rpass.set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
}

fn depth(compare: wgpu::CompareFunction, write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    format: wgpu::TextureFormat,
}

impl PipelineBuilder<'_> {
    fn build(
        &self,
        label: &str,
        vs_entry: &str,
        buffers: &[wgpu::VertexBufferLayout<'_>],
        topology: wgpu::PrimitiveTopology,
        blend: Option<wgpu::BlendState>,
        depth_stencil: wgpu::DepthStencilState,
    ) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(self.layout),

            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some(vs_entry),
                compilation_options: Default::default(),
                buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        })
    }
}
