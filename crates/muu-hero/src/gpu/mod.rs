//! wgpu renderer for the animated branch.
//!
//! The scene renders offscreen at the hero's render scale, then the post
//! chain composites it into the hero region of the frame with rounded
//! corners.

mod post;
mod scene_pass;
mod targets;
mod uniforms;

use muu_engine::coords::Rect;
use muu_engine::render::{RenderCtx, RenderTarget};

use crate::geometry::GeometryCache;
use crate::panel::HERO_CORNER_RADIUS;
use crate::scene::{Scene, render_scale};

use post::{CompositeRegion, PostPass};
use scene_pass::ScenePass;
use targets::Targets;

/// Offscreen size for a hero region of logical `size` at `scale_factor`.
pub fn offscreen_size(region: Rect, scale_factor: f32) -> (u32, u32) {
    let s = render_scale(scale_factor);
    (
        ((region.size.x * s).round() as u32).max(1),
        ((region.size.y * s).round() as u32).max(1),
    )
}

pub struct HeroRenderer {
    surface_format: wgpu::TextureFormat,
    scene_pass: ScenePass,
    post: PostPass,
    targets: Option<Targets>,
}

impl HeroRenderer {
    /// Creates every pipeline up front so shader or pipeline failures happen
    /// during construction rather than on a later frame.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            surface_format,
            scene_pass: ScenePass::new(device),
            post: PostPass::new(device, surface_format),
            targets: None,
        }
    }

    /// Uploads geometry ahead of the first frame.
    pub fn prime(&mut self, device: &wgpu::Device, geometry: &GeometryCache) {
        self.scene_pass.upload_geometry(device, geometry);
    }

    /// Draws `scene` into `region` (logical pixels) over the current contents
    /// of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        region: Rect,
        scene: &Scene,
        geometry: &GeometryCache,
    ) {
        if region.is_empty() || !region.is_finite() {
            return;
        }
        if ctx.surface_format != self.surface_format {
            log::debug!(
                "hero renderer built for {:?}, frame is {:?}; skipping",
                self.surface_format,
                ctx.surface_format
            );
            return;
        }

        let s = ctx.scale_factor;
        let physical = [
            region.origin.x * s,
            region.origin.y * s,
            region.size.x * s,
            region.size.y * s,
        ];
        let Some(composite) =
            CompositeRegion::clip(physical, HERO_CORNER_RADIUS * s, ctx.physical_size())
        else {
            return;
        };

        let size = offscreen_size(region, s);
        if self.targets.as_ref().map(|t| t.size) != Some(size) {
            log::debug!("hero offscreen targets resized to {}x{}", size.0, size.1);
            self.targets = Some(Targets::new(ctx.device, size));
        }
        let Some(targets) = self.targets.as_ref() else { return };

        self.scene_pass.upload_geometry(ctx.device, geometry);
        self.scene_pass.encode(ctx.queue, target.encoder, targets, scene);
        self.post
            .encode(ctx, target.encoder, targets, scene, target.color_view, composite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_size_uses_clamped_scale() {
        let r = Rect::new(0.0, 0.0, 400.0, 300.0);
        assert_eq!(offscreen_size(r, 1.0), (400, 300));
        assert_eq!(offscreen_size(r, 2.0), (600, 450));
        assert_eq!(offscreen_size(r, 0.5), (400, 300));
    }

    #[test]
    fn offscreen_size_is_never_zero() {
        assert_eq!(offscreen_size(Rect::new(0.0, 0.0, 0.0, 0.0), 1.0), (1, 1));
    }
}
