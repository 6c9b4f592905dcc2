use muu_engine::render::{RenderCtx, premul_alpha_blend};

use crate::scene::Scene;

use super::targets::{OFFSCREEN_FORMAT, Targets};
use super::uniforms::PostUniform;

/// Where the composite lands in the frame, in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct CompositeRegion {
    /// Unclipped region: x, y, w, h.
    pub rect: [f32; 4],
    /// Region clipped to the frame; the scissor rect.
    pub scissor: (u32, u32, u32, u32),
    pub corner_radius: f32,
}

impl CompositeRegion {
    /// Clips `rect` to a `frame` of physical size. `None` when nothing of the
    /// region is visible.
    pub fn clip(rect: [f32; 4], corner_radius: f32, frame: (u32, u32)) -> Option<Self> {
        let x0 = rect[0].max(0.0).floor();
        let y0 = rect[1].max(0.0).floor();
        let x1 = (rect[0] + rect[2]).min(frame.0 as f32).ceil();
        let y1 = (rect[1] + rect[3]).min(frame.1 as f32).ceil();
        if !(x1 > x0 && y1 > y0) {
            return None;
        }
        Some(Self {
            rect,
            scissor: (x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32),
            corner_radius,
        })
    }
}

/// One fullscreen pass: pipeline plus its own uniform buffer.
struct Stage {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
}

/// Bloom, noise and vignette: bright pass → blur H → blur V → composite.
pub(crate) struct PostPass {
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    bright: Stage,
    blur_h: Stage,
    blur_v: Stage,
    composite: Stage,

    /// Target size the bind groups were built against.
    bound_size: Option<(u32, u32)>,
}

impl PostPass {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("muu hero post shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/post.wgsl").into()),
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("muu hero post bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<PostUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(3),
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("muu hero post pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("muu hero post sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let stage = |label: &str, fs: &str, format, blend| Stage {
            pipeline: fullscreen_pipeline(device, &layout, &shader, label, fs, format, blend),
            uniform_buffer: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            bind_group: None,
        };

        Self {
            bright: stage("muu hero bright pass", "fs_bright", OFFSCREEN_FORMAT, None),
            blur_h: stage("muu hero blur h", "fs_blur", OFFSCREEN_FORMAT, None),
            blur_v: stage("muu hero blur v", "fs_blur", OFFSCREEN_FORMAT, None),
            composite: stage(
                "muu hero composite",
                "fs_composite",
                surface_format,
                Some(premul_alpha_blend()),
            ),
            bind_group_layout,
            sampler,
            bound_size: None,
        }
    }

    /// Rebuilds bind groups after the offscreen targets were recreated.
    fn ensure_bindings(&mut self, device: &wgpu::Device, targets: &Targets) {
        if self.bound_size == Some(targets.size) && self.composite.bind_group.is_some() {
            return;
        }

        let bind = |stage: &Stage, src: &wgpu::TextureView, bloom: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("muu hero post bind group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: stage.uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(src),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::TextureView(bloom),
                    },
                ],
            })
        };

        let bright = bind(&self.bright, &targets.scene, &targets.scene);
        let blur_h = bind(&self.blur_h, &targets.bloom_a, &targets.bloom_a);
        let blur_v = bind(&self.blur_v, &targets.bloom_b, &targets.bloom_b);
        let composite = bind(&self.composite, &targets.scene, &targets.bloom_a);

        self.bright.bind_group = Some(bright);
        self.blur_h.bind_group = Some(blur_h);
        self.blur_v.bind_group = Some(blur_v);
        self.composite.bind_group = Some(composite);
        self.bound_size = Some(targets.size);
    }

    pub fn encode(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        targets: &Targets,
        scene: &Scene,
        output: &wgpu::TextureView,
        region: CompositeRegion,
    ) {
        self.ensure_bindings(ctx.device, targets);
        let queue = ctx.queue;

        let base_full = PostUniform::from_scene(scene, targets.size);
        let base_half = PostUniform::from_scene(scene, targets.bloom_size);

        queue.write_buffer(&self.bright.uniform_buffer, 0, bytemuck::bytes_of(&base_full));
        queue.write_buffer(
            &self.blur_h.uniform_buffer,
            0,
            bytemuck::bytes_of(&base_half.with_blur_dir(1.0, 0.0)),
        );
        queue.write_buffer(
            &self.blur_v.uniform_buffer,
            0,
            bytemuck::bytes_of(&base_half.with_blur_dir(0.0, 1.0)),
        );
        queue.write_buffer(
            &self.composite.uniform_buffer,
            0,
            bytemuck::bytes_of(&base_full.with_region(region.rect, region.corner_radius)),
        );

        run(encoder, &self.bright, &targets.bloom_a, wgpu::LoadOp::Clear(wgpu::Color::BLACK), None);
        run(encoder, &self.blur_h, &targets.bloom_b, wgpu::LoadOp::Clear(wgpu::Color::BLACK), None);
        run(encoder, &self.blur_v, &targets.bloom_a, wgpu::LoadOp::Clear(wgpu::Color::BLACK), None);
        run(encoder, &self.composite, output, wgpu::LoadOp::Load, Some(region.scissor));
    }
}

fn run(
    encoder: &mut wgpu::CommandEncoder,
    stage: &Stage,
    view: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
    scissor: Option<(u32, u32, u32, u32)>,
) {
    let Some(bind_group) = stage.bind_group.as_ref() else { return };

    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("muu hero post pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    if let Some((x, y, w, h)) = scissor {
        rpass.set_scissor_rect(x, y, w, h);
    }
    rpass.set_pipeline(&stage.pipeline);
    rpass.set_bind_group(0, bind_group, &[]);
    rpass.draw(0..3, 0..1);
}

fn fullscreen_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    fs: &str,
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_inside_frame_is_unchanged() {
        let r = CompositeRegion::clip([10.0, 20.0, 100.0, 50.0], 16.0, (800, 600)).unwrap();
        assert_eq!(r.scissor, (10, 20, 100, 50));
    }

    #[test]
    fn region_is_clipped_to_frame() {
        let r = CompositeRegion::clip([-50.0, 500.0, 200.0, 300.0], 0.0, (800, 600)).unwrap();
        assert_eq!(r.scissor, (0, 500, 150, 100));
        assert_eq!(r.rect, [-50.0, 500.0, 200.0, 300.0]);
    }

    #[test]
    fn offscreen_region_is_skipped() {
        assert!(CompositeRegion::clip([0.0, 700.0, 100.0, 100.0], 0.0, (800, 600)).is_none());
    }
}
