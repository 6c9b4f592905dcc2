//! Deterministic decorative geometry and its per-mount cache.

mod particles;
mod rings;

pub use particles::{PARTICLE_SEED, ParticleField};
pub use rings::{RING_HALF_WIDTH, RING_SEGMENTS, RingSet};

/// Holds the generated geometry for one mount.
///
/// Each field is regenerated only when its inputs change. `revision` bumps on
/// every regeneration so GPU uploads can be skipped when nothing moved.
#[derive(Debug, Default)]
pub struct GeometryCache {
    particles: Option<ParticleField>,
    rings: Option<RingSet>,
    revision: u64,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the particle field for `(count, radius)`, generating it if the
    /// cached one was built from different inputs.
    pub fn particles(&mut self, count: u32, radius: f32) -> &ParticleField {
        let stale = !matches!(&self.particles, Some(f) if f.matches(count, radius));
        if stale {
            log::debug!("generating particle field (count={count}, radius={radius})");
            self.particles = Some(ParticleField::generate(count, radius));
            self.revision += 1;
        }
        self.particles.get_or_insert_with(|| ParticleField::generate(count, radius))
    }

    /// Returns the ring set for `(count, gap)`, generating it if needed.
    pub fn rings(&mut self, count: u32, gap: f32) -> &RingSet {
        let stale = !matches!(&self.rings, Some(r) if r.matches(count, gap));
        if stale {
            log::debug!("generating ring set (count={count}, gap={gap})");
            self.rings = Some(RingSet::generate(count, gap));
            self.revision += 1;
        }
        self.rings.get_or_insert_with(|| RingSet::generate(count, gap))
    }

    #[inline]
    pub fn cached_particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    #[inline]
    pub fn cached_rings(&self) -> Option<&RingSet> {
        self.rings.as_ref()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_hit_the_cache() {
        let mut cache = GeometryCache::new();
        cache.particles(100, 22.0);
        cache.rings(12, 2.2);
        let rev = cache.revision();

        cache.particles(100, 22.0);
        cache.rings(12, 2.2);
        assert_eq!(cache.revision(), rev);
    }

    #[test]
    fn changed_inputs_regenerate() {
        let mut cache = GeometryCache::new();
        cache.particles(100, 22.0);
        let rev = cache.revision();

        assert_eq!(cache.particles(200, 22.0).len(), 200);
        assert_eq!(cache.revision(), rev + 1);

        cache.particles(200, 10.0);
        assert_eq!(cache.revision(), rev + 2);
    }
}
