//! CPU mirrors of the WGSL uniform blocks, and how a [`Scene`] fills them.
//!
//! Every member is a `vec4` or `mat4x4` so the Rust layout matches WGSL's
//! uniform layout without manual padding.

use bytemuck::{Pod, Zeroable};
use crate::scene::Scene;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct SceneUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub particles_model: [[f32; 4]; 4],
    pub rings_model: [[f32; 4]; 4],
    /// xyz camera position.
    pub camera_pos: [f32; 4],
    /// (width px, height px, point size, point scale).
    pub target: [f32; 4],
    pub particle_color: [f32; 4],
    pub ring_color: [f32; 4],
    pub grid_cell_color: [f32; 4],
    pub grid_section_color: [f32; 4],
    /// (height, cell size, section size, fade distance).
    pub grid_a: [f32; 4],
    /// (fade strength, cell thickness, section thickness, unused).
    pub grid_b: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<SceneUniform>() == 384);

impl SceneUniform {
    /// `size` is the offscreen target size in physical pixels.
    pub fn from_scene(scene: &Scene, size: (u32, u32)) -> Self {
        let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
        let cam = &scene.camera;
        let grid = &scene.grid;

        Self {
            view: cam.view().to_cols_array_2d(),
            proj: cam.projection(w / h).to_cols_array_2d(),
            particles_model: scene.particles.model().to_cols_array_2d(),
            rings_model: scene.rings.model().to_cols_array_2d(),
            camera_pos: cam.position.extend(1.0).to_array(),
            // Size attenuation: a point of `size` units at depth 1 spans half
            // the target height times `size` pixels.
            target: [w, h, scene.particles.size, h * 0.5],
            particle_color: scene
                .particles
                .color
                .with_opacity(scene.particles.opacity)
                .to_array(),
            ring_color: scene.rings.color.with_opacity(scene.rings.opacity).to_array(),
            grid_cell_color: grid.cell_color.to_array(),
            grid_section_color: grid.section_color.to_array(),
            grid_a: [grid.height, grid.cell_size, grid.section_size, grid.fade_distance],
            grid_b: [grid.fade_strength, grid.cell_thickness, grid.section_thickness, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub(crate) struct PostUniform {
    /// (1/source width, 1/source height, blur dir x, blur dir y).
    pub texel: [f32; 4],
    /// (intensity, luminance threshold, luminance smoothing, unused).
    pub bloom: [f32; 4],
    /// (noise opacity, vignette offset, vignette darkness, noise seed).
    pub grade: [f32; 4],
    /// Composite region in target pixels: (x, y, w, h).
    pub region: [f32; 4],
    /// (corner radius px, noise premultiply 0/1, unused, unused).
    pub shape: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<PostUniform>() == 80);

impl PostUniform {
    pub fn from_scene(scene: &Scene, source: (u32, u32)) -> Self {
        let post = &scene.post;
        Self {
            texel: [1.0 / source.0.max(1) as f32, 1.0 / source.1.max(1) as f32, 0.0, 0.0],
            bloom: [
                post.bloom.intensity,
                post.bloom.luminance_threshold,
                post.bloom.luminance_smoothing,
                0.0,
            ],
            grade: [
                post.noise.opacity,
                post.vignette.offset,
                post.vignette.darkness,
                noise_seed(scene.elapsed()),
            ],
            region: [0.0; 4],
            shape: [0.0, if post.noise.premultiply { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }

    pub fn with_blur_dir(mut self, x: f32, y: f32) -> Self {
        self.texel[2] = x;
        self.texel[3] = y;
        self
    }

    pub fn with_region(mut self, region: [f32; 4], corner_radius: f32) -> Self {
        self.region = region;
        self.shape[0] = corner_radius;
        self
    }
}

/// Grain seed; changes every frame, stays small enough for f32 hashing.
#[inline]
fn noise_seed(elapsed: f64) -> f32 {
    ((elapsed * 60.0).floor() % 1024.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniform_carries_fixed_parameters() {
        let scene = Scene::new();
        let u = SceneUniform::from_scene(&scene, (800, 600));
        assert_eq!(u.target, [800.0, 600.0, 0.03, 300.0]);
        assert_eq!(u.grid_a, [-3.4, 0.8, 3.2, 22.0]);
        assert_eq!(u.camera_pos, [0.0, 1.4, 7.0, 1.0]);
        assert!((u.ring_color[3] - 0.35).abs() < 1e-6);
        assert!((u.particle_color[3] - 0.95).abs() < 1e-6);
    }

    #[test]
    fn particle_model_starts_at_identity() {
        let scene = Scene::new();
        let u = SceneUniform::from_scene(&scene, (1, 1));
        assert_eq!(u.particles_model, glam::Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn degenerate_target_does_not_divide_by_zero() {
        let scene = Scene::new();
        let u = SceneUniform::from_scene(&scene, (0, 0));
        assert!(u.proj.iter().flatten().all(|v| v.is_finite()));
        let p = PostUniform::from_scene(&scene, (0, 0));
        assert_eq!(p.texel[0], 1.0);
    }

    #[test]
    fn post_uniform_orders_chain_parameters() {
        let p = PostUniform::from_scene(&Scene::new(), (400, 200))
            .with_blur_dir(1.0, 0.0)
            .with_region([10.0, 20.0, 400.0, 200.0], 16.0);
        assert_eq!(p.bloom, [0.5, 0.2, 0.25, 0.0]);
        assert_eq!(&p.grade[..3], &[0.035, 0.15, 0.9]);
        assert_eq!(p.texel, [1.0 / 400.0, 1.0 / 200.0, 1.0, 0.0]);
        assert_eq!(p.shape[..2], [16.0, 1.0]);
    }
}
