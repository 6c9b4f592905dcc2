use std::f32::consts::TAU;

/// Segments per ring outline.
pub const RING_SEGMENTS: u32 = 256;

/// Half the band width of a ring; each ring is drawn as an inner and an outer
/// outline this far either side of its nominal radius.
pub const RING_HALF_WIDTH: f32 = 0.008;

/// Concentric ring outlines in the local XY plane, centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSet {
    count: u32,
    gap: f32,
    radii: Vec<f32>,
    /// Line-list vertices: two endpoints per segment.
    vertices: Vec<[f32; 3]>,
}

impl RingSet {
    /// Ring `i` for `i` in `1..=count` sits at radius `i * gap`.
    pub fn generate(count: u32, gap: f32) -> Self {
        let radii: Vec<f32> = (1..=count).map(|i| i as f32 * gap).collect();

        let per_ring = 2 * 2 * RING_SEGMENTS as usize;
        let mut vertices = Vec::with_capacity(radii.len() * per_ring);
        for &r in &radii {
            push_loop(&mut vertices, r - RING_HALF_WIDTH);
            push_loop(&mut vertices, r + RING_HALF_WIDTH);
        }

        Self {
            count,
            gap,
            radii,
            vertices,
        }
    }

    #[inline]
    pub fn matches(&self, count: u32, gap: f32) -> bool {
        self.count == count && self.gap.to_bits() == gap.to_bits()
    }

    #[inline]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    #[inline]
    pub fn line_vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

fn push_loop(out: &mut Vec<[f32; 3]>, radius: f32) {
    let point = |k: u32| {
        let a = k as f32 / RING_SEGMENTS as f32 * TAU;
        [radius * a.cos(), radius * a.sin(), 0.0]
    };
    for k in 0..RING_SEGMENTS {
        out.push(point(k));
        // Closing segment lands exactly on the first vertex.
        out.push(point((k + 1) % RING_SEGMENTS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_are_multiples_of_gap() {
        let set = RingSet::generate(12, 2.2);
        assert_eq!(set.len(), 12);
        assert!((set.radii()[0] - 2.2).abs() < 1e-6);
        assert!((set.radii()[11] - 26.4).abs() < 1e-4);
    }

    #[test]
    fn zero_rings_is_empty() {
        let set = RingSet::generate(0, 2.2);
        assert!(set.is_empty());
        assert!(set.line_vertices().is_empty());
    }

    #[test]
    fn each_ring_has_two_closed_outlines() {
        let set = RingSet::generate(1, 1.0);
        let v = set.line_vertices();
        assert_eq!(v.len(), 2 * 2 * RING_SEGMENTS as usize);

        let inner_first = v[0];
        let inner_last = v[2 * RING_SEGMENTS as usize - 1];
        assert_eq!(inner_first, inner_last);
        assert!((inner_first[0] - (1.0 - RING_HALF_WIDTH)).abs() < 1e-6);
    }

    #[test]
    fn rings_lie_in_the_xy_plane() {
        let set = RingSet::generate(3, 2.0);
        assert!(set.line_vertices().iter().all(|p| p[2] == 0.0));
    }
}
