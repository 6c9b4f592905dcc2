/// Color format for every offscreen target. Float so the dark scene does not
/// band before the post chain runs.
pub(crate) const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen textures for one render size: the scene plus two half-size
/// bloom buffers for the separable blur.
pub(crate) struct Targets {
    pub size: (u32, u32),
    pub bloom_size: (u32, u32),
    pub scene: wgpu::TextureView,
    pub bloom_a: wgpu::TextureView,
    pub bloom_b: wgpu::TextureView,
}

impl Targets {
    pub fn new(device: &wgpu::Device, size: (u32, u32)) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let bloom_size = bloom_size(size);
        Self {
            size,
            bloom_size,
            scene: color_target(device, "muu hero scene target", size),
            bloom_a: color_target(device, "muu hero bloom a", bloom_size),
            bloom_b: color_target(device, "muu hero bloom b", bloom_size),
        }
    }
}

/// Half resolution, at least one pixel.
#[inline]
pub(crate) fn bloom_size(size: (u32, u32)) -> (u32, u32) {
    ((size.0 / 2).max(1), (size.1 / 2).max(1))
}

fn color_target(device: &wgpu::Device, label: &str, size: (u32, u32)) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size.0,
            height: size.1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OFFSCREEN_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloom_is_half_size_and_never_empty() {
        assert_eq!(bloom_size((800, 601)), (400, 300));
        assert_eq!(bloom_size((1, 1)), (1, 1));
    }
}
