//! The animated scene: layers, camera, lights and the post chain.
//!
//! World space is right-handed, +Y up, in scene units. Only two values move
//! per frame: the particle spin and the ring angle. Everything else is fixed
//! at construction.

use std::f32::consts::{FRAC_PI_3, TAU};

use glam::{Mat4, Vec3};
use muu_engine::paint::Color;

/// Ring rotation rate in radians per second of elapsed time.
pub const RING_RATE: f64 = 0.018;

/// Render-scale bounds applied to the display scale factor.
pub const RENDER_SCALE_MIN: f32 = 1.0;
pub const RENDER_SCALE_MAX: f32 = 1.5;

/// Clamps a display scale factor to the range the hero renders at.
#[inline]
pub fn render_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() {
        scale_factor.clamp(RENDER_SCALE_MIN, RENDER_SCALE_MAX)
    } else {
        RENDER_SCALE_MIN
    }
}

/// Ring angle after `elapsed` seconds, wrapped to `[0, 2π)`.
#[inline]
pub fn ring_angle(elapsed: f64) -> f32 {
    (elapsed * RING_RATE).rem_euclid(std::f64::consts::TAU) as f32
}

// ── layers ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleLayer {
    pub color: Color,
    /// Point size in scene units, attenuated with depth.
    pub size: f32,
    pub opacity: f32,
    /// Radians per second around +Y.
    pub spin: f32,
    angle_y: f32,
}

impl Default for ParticleLayer {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xeaeaea),
            size: 0.03,
            opacity: 0.95,
            spin: 0.06,
            angle_y: 0.0,
        }
    }
}

impl ParticleLayer {
    fn advance(&mut self, dt: f32) {
        self.angle_y = (self.angle_y + self.spin * dt).rem_euclid(TAU);
    }

    #[inline]
    pub fn angle_y(&self) -> f32 {
        self.angle_y
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle_y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayer {
    pub color: Color,
    pub opacity: f32,
    /// Fixed tilt around +X.
    pub tilt_x: f32,
    angle_z: f32,
}

impl Default for RingLayer {
    fn default() -> Self {
        Self {
            color: Color::from_straight(0.85, 0.85, 0.85, 1.0),
            opacity: 0.35,
            tilt_x: -FRAC_PI_3,
            angle_z: 0.0,
        }
    }
}

impl RingLayer {
    fn set_elapsed(&mut self, elapsed: f64) {
        self.angle_z = ring_angle(elapsed);
    }

    #[inline]
    pub fn angle_z(&self) -> f32 {
        self.angle_z
    }

    /// Euler XYZ: tilt first in the parent frame, then spin about local Z.
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_x(self.tilt_x) * Mat4::from_rotation_z(self.angle_z)
    }
}

/// Infinite floor grid that fades out with distance from the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayer {
    pub height: f32,
    pub cell_size: f32,
    pub section_size: f32,
    pub cell_color: Color,
    pub section_color: Color,
    pub cell_thickness: f32,
    pub section_thickness: f32,
    pub fade_distance: f32,
    pub fade_strength: f32,
}

impl Default for GridLayer {
    fn default() -> Self {
        Self {
            height: -3.4,
            cell_size: 0.8,
            section_size: 3.2,
            cell_color: Color::from_hex(0x222222),
            section_color: Color::from_hex(0x5a5a5a),
            cell_thickness: 0.5,
            section_thickness: 1.0,
            fade_distance: 22.0,
            fade_strength: 2.2,
        }
    }
}

// ── lights and camera ─────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Scene lighting.
///
/// The particle, ring and grid materials are unlit, so lights only matter to
/// lit layers; they are part of the scene description all the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Lights {
    pub ambient: f32,
    pub directional: [DirectionalLight; 2],
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: 0.25,
            directional: [
                DirectionalLight {
                    position: Vec3::new(6.0, 6.0, 3.0),
                    intensity: 0.65,
                },
                DirectionalLight {
                    position: Vec3::new(-6.0, -2.0, -3.0),
                    intensity: 0.2,
                },
            ],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.4, 7.0),
            target: Vec3::ZERO,
            fov_y_deg: 52.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Perspective projection with a `[0, 1]` depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

// ── post chain ────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bloom {
    pub intensity: f32,
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Noise {
    /// Noise is scaled by the underlying colour before blending.
    pub premultiply: bool,
    pub opacity: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vignette {
    pub offset: f32,
    pub darkness: f32,
}

/// Bloom, then noise, then vignette. Parameters are fixed for the mount.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PostChain {
    pub bloom: Bloom,
    pub noise: Noise,
    pub vignette: Vignette,
}

impl Default for PostChain {
    fn default() -> Self {
        Self {
            bloom: Bloom {
                intensity: 0.5,
                luminance_threshold: 0.2,
                luminance_smoothing: 0.25,
            },
            noise: Noise {
                premultiply: true,
                opacity: 0.035,
            },
            vignette: Vignette {
                offset: 0.15,
                darkness: 0.9,
            },
        }
    }
}

// ── scene ─────────────────────────────────────────────────────────────────

/// The animated scene description.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub particles: ParticleLayer,
    pub rings: RingLayer,
    pub grid: GridLayer,
    pub lights: Lights,
    pub camera: Camera,
    pub post: PostChain,
    pub clear_color: Color,
    elapsed: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            particles: ParticleLayer::default(),
            rings: RingLayer::default(),
            grid: GridLayer::default(),
            lights: Lights::default(),
            camera: Camera::default(),
            post: PostChain::default(),
            clear_color: Color::from_hex(0x0a0a0a),
            elapsed: 0.0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps the particle spin by `dt` and sets the ring angle from
    /// `elapsed`, the wall-clock seconds since the scene was mounted.
    ///
    /// Negative or non-finite inputs are ignored independently.
    pub fn advance(&mut self, dt: f32, elapsed: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.particles.advance(dt);
        }
        if elapsed.is_finite() && elapsed >= 0.0 {
            self.elapsed = elapsed;
            self.rings.set_elapsed(elapsed);
        }
    }

    /// Wall-clock seconds since mount, as of the last advance.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
