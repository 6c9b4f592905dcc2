use wgpu::util::DeviceExt;

use muu_engine::render::premul_alpha_blend;

use crate::geometry::GeometryCache;
use crate::scene::Scene;

use super::targets::{OFFSCREEN_FORMAT, Targets};
use super::uniforms::SceneUniform;

/// Draws grid, rings and particles into the offscreen scene target.
pub(crate) struct ScenePass {
    grid_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    particles_vbo: Option<wgpu::Buffer>,
    particle_count: u32,
    rings_vbo: Option<wgpu::Buffer>,
    ring_vertex_count: u32,
    /// Geometry revision the buffers were built from.
    uploaded_revision: Option<u64>,
}

impl ScenePass {
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("muu hero scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("muu hero scene bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SceneUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("muu hero scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let position_attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let position_layout = |step_mode| wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode,
            attributes: &position_attrs,
        };

        let grid_pipeline = pipeline(
            device,
            &layout,
            &shader,
            "muu hero grid pipeline",
            ("vs_grid", "fs_grid"),
            &[],
            wgpu::PrimitiveTopology::TriangleList,
        );
        let ring_pipeline = pipeline(
            device,
            &layout,
            &shader,
            "muu hero ring pipeline",
            ("vs_lines", "fs_lines"),
            &[position_layout(wgpu::VertexStepMode::Vertex)],
            wgpu::PrimitiveTopology::LineList,
        );
        let point_pipeline = pipeline(
            device,
            &layout,
            &shader,
            "muu hero point pipeline",
            ("vs_points", "fs_points"),
            &[position_layout(wgpu::VertexStepMode::Instance)],
            wgpu::PrimitiveTopology::TriangleList,
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("muu hero scene ubo"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("muu hero scene bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            grid_pipeline,
            ring_pipeline,
            point_pipeline,
            uniform_buffer,
            bind_group,
            particles_vbo: None,
            particle_count: 0,
            rings_vbo: None,
            ring_vertex_count: 0,
            uploaded_revision: None,
        }
    }

    /// Re-uploads vertex data when the cached geometry changed.
    pub fn upload_geometry(&mut self, device: &wgpu::Device, geometry: &GeometryCache) {
        if self.uploaded_revision == Some(geometry.revision()) {
            return;
        }

        self.particles_vbo = None;
        self.particle_count = 0;
        if let Some(field) = geometry.cached_particles().filter(|f| !f.is_empty()) {
            self.particles_vbo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("muu hero particles vbo"),
                contents: field.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            }));
            self.particle_count = field.len() as u32;
        }

        self.rings_vbo = None;
        self.ring_vertex_count = 0;
        if let Some(rings) = geometry.cached_rings().filter(|r| !r.is_empty()) {
            self.rings_vbo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("muu hero rings vbo"),
                contents: rings.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            }));
            self.ring_vertex_count = rings.line_vertices().len() as u32;
        }

        log::debug!(
            "hero geometry uploaded: {} particles, {} ring vertices",
            self.particle_count,
            self.ring_vertex_count
        );
        self.uploaded_revision = Some(geometry.revision());
    }

    pub fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &Targets,
        scene: &Scene,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniform::from_scene(scene, targets.size)),
        );

        let clear = scene.clear_color;
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("muu hero scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.scene,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &self.bind_group, &[]);

        // Back to front: floor, rings, then the cloud.
        rpass.set_pipeline(&self.grid_pipeline);
        rpass.draw(0..6, 0..1);

        if let Some(vbo) = self.rings_vbo.as_ref() {
            rpass.set_pipeline(&self.ring_pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..self.ring_vertex_count, 0..1);
        }

        if let Some(vbo) = self.particles_vbo.as_ref() {
            rpass.set_pipeline(&self.point_pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
    }
}

fn pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    (vs, fs): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: OFFSCREEN_FORMAT,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
