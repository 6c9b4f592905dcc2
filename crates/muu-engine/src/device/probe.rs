use std::panic::AssertUnwindSafe;

use anyhow::{anyhow, Context, Result};

/// Parameters for the capability probe.
///
/// The defaults request the most constrained configuration that could still
/// drive the hero scene: low-power adapter, no features, WebGL2-level limits,
/// a single 1x1 render target with no multisampling.
#[derive(Debug, Clone)]
pub struct ProbeInit {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    /// Allow a software adapter (e.g. llvmpipe/WARP) to satisfy the probe.
    pub force_fallback_adapter: bool,
}

impl Default for ProbeInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
        }
    }
}

/// Creates, uses and releases a minimal GPU context, returning the adapter
/// that satisfied it.
///
/// Synchronous. Never panics: a panic raised by the backend at any step is
/// returned as an error like any other failure.
pub fn probe() -> Result<wgpu::AdapterInfo> {
    probe_with(&ProbeInit::default())
}

/// [`probe`] with explicit parameters.
pub fn probe_with(init: &ProbeInit) -> Result<wgpu::AdapterInfo> {
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        pollster::block_on(try_probe(init))
    }));

    let info = outcome.map_err(|_| anyhow!("graphics backend panicked during the probe"))??;
    log::info!("GPU probe ok: {} ({:?})", info.name, info.backend);
    Ok(info)
}

/// Every wgpu object created here is owned by this scope, so all of them are
/// released on every exit path, `?` included.
async fn try_probe(init: &ProbeInit) -> Result<wgpu::AdapterInfo> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: init.backends,
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: None,
            force_fallback_adapter: init.force_fallback_adapter,
        })
        .await
        .context("no adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("muu probe device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("device request rejected")?;

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("muu probe target"),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("muu probe encoder"),
    });
    {
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("muu probe clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Discard,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
    queue.submit(std::iter::once(encoder.finish()));

    target.destroy();

    Ok(adapter.get_info())
}
