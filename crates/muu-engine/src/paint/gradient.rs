use crate::coords::Vec2;

use super::Color;

/// Maximum number of stops a gradient keeps when uploaded to the GPU.
pub const MAX_STOPS: usize = 4;

/// A single gradient stop. `t` is in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Elliptical radial gradient, CSS `radial-gradient(RX RY at CX CY, ...)`.
///
/// `center` is an absolute position; `radii` are the ellipse half-axes at which
/// `t` reaches 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radii: Vec2,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, radii: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { center, radii, stops }
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.radii.is_finite()
            && self.radii.x > 0.0
            && self.radii.y > 0.0
            && stops_valid(&self.stops)
    }

    /// Gradient parameter at `p`.
    pub fn t_at(&self, p: Vec2) -> f32 {
        let d = p - self.center;
        Vec2::new(d.x / self.radii.x, d.y / self.radii.y).length()
    }
}

fn stops_valid(stops: &[ColorStop]) -> bool {
    !stops.is_empty()
        && stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
        && stops.windows(2).all(|w| w[0].t <= w[1].t)
}

/// Packs stops into fixed GPU arrays. Extra stops beyond [`MAX_STOPS`] are
/// dropped; missing slots repeat the last stop so the shader pads naturally.
pub fn pack_stops(stops: &[ColorStop]) -> ([f32; MAX_STOPS], [[f32; 4]; MAX_STOPS], u32) {
    let mut ts = [1.0f32; MAX_STOPS];
    let mut colors = [[0.0f32; 4]; MAX_STOPS];

    let used = stops.len().min(MAX_STOPS);
    for i in 0..MAX_STOPS {
        let s = stops
            .get(i.min(used.saturating_sub(1)))
            .copied()
            .unwrap_or(ColorStop::new(1.0, Color::TRANSPARENT));
        ts[i] = s.t;
        colors[i] = s.color.to_array();
    }

    (ts, colors, used as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, Color::WHITE),
            ColorStop::new(0.5, Color::BLACK),
            ColorStop::new(1.0, Color::TRANSPARENT),
        ]
    }

    #[test]
    fn radial_t_uses_ellipse_radii() {
        let g = RadialGradient::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), stops());
        assert!((g.t_at(Vec2::new(30.0, 10.0)) - 1.0).abs() < 1e-6);
        assert!((g.t_at(Vec2::new(10.0, 20.0)) - 1.0).abs() < 1e-6);
        assert!(g.is_valid());
    }

    #[test]
    fn pack_repeats_last_stop() {
        let (ts, colors, used) = pack_stops(&stops());
        assert_eq!(used, 3);
        assert_eq!(ts[3], 1.0);
        assert_eq!(colors[3], Color::TRANSPARENT.to_array());
    }

    #[test]
    fn unsorted_stops_are_invalid() {
        let mut s = stops();
        s.swap(0, 2);
        let g = RadialGradient::new(Vec2::zero(), Vec2::new(1.0, 1.0), s);
        assert!(!g.is_valid());
    }

    #[test]
    fn degenerate_radii_are_invalid() {
        let g = RadialGradient::new(Vec2::zero(), Vec2::new(0.0, 1.0), stops());
        assert!(!g.is_valid());
    }
}
