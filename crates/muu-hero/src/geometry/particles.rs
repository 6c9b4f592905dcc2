use std::f64::consts::TAU;

use crate::rng::Mulberry32;

/// Seed for the particle cloud. Fixed so every build shows the same sky.
pub const PARTICLE_SEED: u32 = 42;

/// Points sampled uniformly inside a sphere, in scene units.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    count: u32,
    radius: f32,
    positions: Vec<[f32; 3]>,
}

impl ParticleField {
    /// Samples `count` points inside a sphere of `radius`.
    ///
    /// Each point takes three draws, in order: radial, azimuth, polar. The
    /// cube root on the radial draw keeps the volume density uniform.
    pub fn generate(count: u32, radius: f32) -> Self {
        let mut rng = Mulberry32::new(PARTICLE_SEED);
        let big_r = radius as f64;

        let positions = (0..count)
            .map(|_| {
                let r = big_r * rng.next_f64().cbrt();
                let theta = rng.next_f64() * TAU;
                let phi = (2.0 * rng.next_f64() - 1.0).acos();
                [
                    (r * phi.sin() * theta.cos()) as f32,
                    (r * phi.sin() * theta.sin()) as f32,
                    (r * phi.cos()) as f32,
                ]
            })
            .collect();

        Self {
            count,
            radius,
            positions,
        }
    }

    #[inline]
    pub fn matches(&self, count: u32, radius: f32) -> bool {
        self.count == count && self.radius.to_bits() == radius.to_bits()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Raw position bytes, ready for a vertex buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_byte_identical() {
        let a = ParticleField::generate(2600, 22.0);
        let b = ParticleField::generate(2600, 22.0);
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.len(), 2600);
    }

    #[test]
    fn zero_count_is_empty() {
        let f = ParticleField::generate(0, 22.0);
        assert!(f.is_empty());
        assert!(f.as_bytes().is_empty());
    }

    #[test]
    fn first_point_matches_reference() {
        let f = ParticleField::generate(1, 22.0);
        let p = f.positions()[0];
        assert!((p[0] - -12.480_067).abs() < 1e-4);
        assert!((p[1] - 4.203_741).abs() < 1e-4);
        assert!((p[2] - 13.088_387).abs() < 1e-4);
    }

    #[test]
    fn points_stay_inside_the_sphere() {
        let f = ParticleField::generate(5000, 3.0);
        for p in f.positions() {
            let d = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!(d <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn shorter_field_is_a_prefix_of_a_longer_one() {
        let short = ParticleField::generate(10, 22.0);
        let long = ParticleField::generate(20, 22.0);
        assert_eq!(short.positions(), &long.positions()[..10]);
    }
}
