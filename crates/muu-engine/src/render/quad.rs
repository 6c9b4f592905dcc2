use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::gradient::pack_stops;
use crate::paint::{Color, Paint};
use crate::scene::{DotGridCmd, DrawCmd, DrawList, QuadCmd};

use super::{premul_alpha_blend, RenderCtx, RenderTarget};

const MODE_SOLID: f32 = 0.0;
const MODE_RADIAL: f32 = 1.0;
const MODE_DOTS: f32 = 2.0;

/// Renderer for every `DrawCmd` in a [`DrawList`].
///
/// One instanced draw per list; paint order is preserved because instances
/// are emitted in paint order and blended back-to-front.
#[derive(Default)]
pub struct QuadRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    /// Reused across frames.
    scratch: Vec<QuadInstance>,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `draw_list` over the existing contents of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();
        for item in draw_list.iter_in_paint_order() {
            let instance = match &item.cmd {
                DrawCmd::Quad(q) => quad_instance(q),
                DrawCmd::DotGrid(g) => dot_grid_instance(g),
            };
            if let Some(instance) = instance {
                self.scratch.push(instance);
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, self.scratch.len());
        self.write_viewport_uniform(ctx);

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.scratch));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("muu quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.scratch.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("muu quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("muu quad bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewportUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("muu quad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("muu quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[UnitVertex::layout(), QuadInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("muu quad viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("muu quad bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("muu quad vbo"),
            contents: bytemuck::cast_slice(&UNIT_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("muu quad ibo"),
            contents: bytemuck::cast_slice(&UNIT_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("muu quad instance vbo"),
            size: (new_cap * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── instance encoding ─────────────────────────────────────────────────────

fn quad_instance(q: &QuadCmd) -> Option<QuadInstance> {
    if q.rect.is_empty() || !q.rect.is_finite() {
        return None;
    }

    let (mode, paint_geom, stops) = match &q.paint {
        Paint::Solid(c) => (MODE_SOLID, [0.0; 4], solid_stops(*c)),
        Paint::RadialGradient(g) if g.is_valid() => (
            MODE_RADIAL,
            [g.center.x, g.center.y, g.radii.x, g.radii.y],
            pack_stops(&g.stops),
        ),
        _ => {
            log::debug!("skipping quad with invalid gradient");
            return None;
        }
    };
    let (stop_t, colors, _) = stops;

    let (border_width, border_color) = match q.border {
        Some(b) => (b.width.max(0.0), b.color.to_array()),
        None => (0.0, [0.0; 4]),
    };

    Some(QuadInstance {
        rect: [q.rect.origin.x, q.rect.origin.y, q.rect.size.x, q.rect.size.y],
        params: [q.corner_radius, q.rotation, border_width, mode],
        border_color,
        paint_geom,
        stop_t,
        colors,
    })
}

fn dot_grid_instance(g: &DotGridCmd) -> Option<QuadInstance> {
    if g.rect.is_empty() || g.pitch <= 0.0 || g.dot_radius <= 0.0 {
        return None;
    }
    let (stop_t, colors, _) = solid_stops(g.color);
    Some(QuadInstance {
        rect: [g.rect.origin.x, g.rect.origin.y, g.rect.size.x, g.rect.size.y],
        params: [0.0, 0.0, 0.0, MODE_DOTS],
        border_color: [0.0; 4],
        paint_geom: [g.pitch, g.dot_radius, g.phase.x, g.phase.y],
        stop_t,
        colors,
    })
}

fn solid_stops(c: Color) -> ([f32; 4], [[f32; 4]; 4], u32) {
    ([0.0; 4], [c.to_array(); 4], 1)
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct UnitVertex {
    pos: [f32; 2], // 0..1
}

impl UnitVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<UnitVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const UNIT_VERTICES: [UnitVertex; 4] = [
    UnitVertex { pos: [0.0, 0.0] },
    UnitVertex { pos: [1.0, 0.0] },
    UnitVertex { pos: [1.0, 1.0] },
    UnitVertex { pos: [0.0, 1.0] },
];

const UNIT_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Instance data layout (144 bytes):
///
///  offset   0  rect          [f32; 4]      loc 1  (x, y, w, h)
///  offset  16  params        [f32; 4]      loc 2  (radius, rotation, border width, mode)
///  offset  32  border_color  [f32; 4]      loc 3
///  offset  48  paint_geom    [f32; 4]      loc 4  (mode-specific)
///  offset  64  stop_t        [f32; 4]      loc 5
///  offset  80  colors        [[f32; 4]; 4] loc 6..9
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    rect: [f32; 4],
    params: [f32; 4],
    border_color: [f32; 4],
    paint_geom: [f32; 4],
    stop_t: [f32; 4],
    colors: [[f32; 4]; 4],
}

const _: () = assert!(std::mem::size_of::<QuadInstance>() == 144);

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x4, // rect
        2 => Float32x4, // params
        3 => Float32x4, // border_color
        4 => Float32x4, // paint_geom
        5 => Float32x4, // stop_t
        6 => Float32x4, // c0
        7 => Float32x4, // c1
        8 => Float32x4, // c2
        9 => Float32x4  // c3
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::{ColorStop, RadialGradient};

    #[test]
    fn empty_quads_are_skipped() {
        let q = QuadCmd::new(Rect::new(0.0, 0.0, 0.0, 10.0), Color::WHITE);
        assert!(quad_instance(&q).is_none());
    }

    #[test]
    fn radial_paint_encodes_center_and_radii() {
        let g = RadialGradient::new(
            Vec2::new(5.0, 6.0),
            Vec2::new(7.0, 8.0),
            vec![
                ColorStop::new(0.0, Color::WHITE),
                ColorStop::new(1.0, Color::TRANSPARENT),
            ],
        );
        let q = QuadCmd::new(Rect::new(0.0, 0.0, 10.0, 10.0), Paint::RadialGradient(g))
            .rounded(4.0);
        let inst = quad_instance(&q).unwrap();
        assert_eq!(inst.params[3], MODE_RADIAL);
        assert_eq!(inst.params[0], 4.0);
        assert_eq!(inst.paint_geom, [5.0, 6.0, 7.0, 8.0]);
        assert_eq!(inst.colors[1], Color::TRANSPARENT.to_array());
    }

    #[test]
    fn dot_grid_requires_positive_pitch() {
        let g = DotGridCmd {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            pitch: 0.0,
            dot_radius: 1.0,
            color: Color::WHITE,
            phase: Vec2::zero(),
        };
        assert!(dot_grid_instance(&g).is_none());
    }
}
