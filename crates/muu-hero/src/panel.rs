//! Static fallback panel and the overlay shared by both hero branches.

use muu_engine::coords::{Rect, Vec2, Viewport};
use muu_engine::paint::{Color, ColorStop, Paint, RadialGradient};
use muu_engine::scene::{Border, DotGridCmd, DrawList, QuadCmd, ZIndex};

/// Share of the viewport height the hero region occupies.
pub const HERO_HEIGHT_FRACTION: f32 = 0.8;

/// Corner radius of the hero region, in logical pixels.
pub const HERO_CORNER_RADIUS: f32 = 16.0;

/// Static stand-in for the animated scene: a soft indigo/sky radial glow in
/// the top-left corner over black, a hairline border and a faint dot texture.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPanel {
    pub base: Color,
    /// Gradient centre as a fraction of the panel size.
    pub glow_center: Vec2,
    /// Gradient radii as a fraction of the panel size.
    pub glow_radii: Vec2,
    pub glow_stops: Vec<ColorStop>,
    pub border: Border,
    pub corner_radius: f32,
    pub dot_pitch: f32,
    pub dot_radius: f32,
    pub dot_color: Color,
}

impl Default for FallbackPanel {
    fn default() -> Self {
        Self {
            base: Color::BLACK,
            glow_center: Vec2::new(0.1, 0.1),
            glow_radii: Vec2::new(1.2, 1.2),
            glow_stops: vec![
                ColorStop::new(0.0, Color::from_srgba(99, 102, 241, 0.25)),
                ColorStop::new(0.4, Color::from_srgba(56, 189, 248, 0.15)),
                ColorStop::new(0.7, Color::TRANSPARENT),
            ],
            border: Border::new(1.0, Color::from_srgba(255, 255, 255, 0.08)),
            corner_radius: HERO_CORNER_RADIUS,
            dot_pitch: 12.0,
            dot_radius: 1.0,
            // 80% white dots behind a 6% opacity layer.
            dot_color: Color::from_srgba(255, 255, 255, 0.8).with_opacity(0.06),
        }
    }
}

impl FallbackPanel {
    /// Height of the hero region for a viewport.
    #[inline]
    pub fn height_for(viewport: Viewport) -> f32 {
        (viewport.height * HERO_HEIGHT_FRACTION).max(0.0)
    }

    /// The glow gradient resolved against `rect`.
    pub fn glow(&self, rect: Rect) -> RadialGradient {
        RadialGradient::new(
            rect.origin + Vec2::new(rect.size.x * self.glow_center.x, rect.size.y * self.glow_center.y),
            Vec2::new(rect.size.x * self.glow_radii.x, rect.size.y * self.glow_radii.y),
            self.glow_stops.clone(),
        )
    }

    /// Records the panel into `list` at layer `z`.
    pub fn paint(&self, rect: Rect, list: &mut DrawList, z: ZIndex) {
        if rect.is_empty() {
            return;
        }

        list.push_quad(z, QuadCmd::new(rect, self.base).rounded(self.corner_radius));
        list.push_quad(
            z.above(1),
            QuadCmd::new(rect, Paint::RadialGradient(self.glow(rect)))
                .rounded(self.corner_radius)
                .bordered(self.border),
        );
        list.push_dot_grid(
            z.above(2),
            DotGridCmd {
                rect: rect.inset(self.corner_radius * 0.5),
                pitch: self.dot_pitch,
                dot_radius: self.dot_radius,
                color: self.dot_color,
                phase: Vec2::new(self.dot_radius, self.dot_radius),
            },
        );
    }
}

/// One line of overlay copy.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    /// Font size in logical pixels.
    pub em: f32,
    pub color: Color,
}

impl OverlayLine {
    pub fn new(text: impl Into<String>, em: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            em,
            color,
        }
    }

    fn width(&self) -> f32 {
        text_width(&self.text, self.em)
    }
}

/// Approximate advance of `text` at font size `em`, proportional Latin text.
#[inline]
pub fn text_width(text: &str, em: f32) -> f32 {
    text.chars().count() as f32 * em * 0.5
}

/// Content centred over the hero, whichever branch is showing.
///
/// Lines are laid out as a centred stack; each line paints as a rounded bar
/// sized to its copy (glyphs are not rasterised).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub lines: Vec<OverlayLine>,
}

impl Overlay {
    pub fn new(lines: Vec<OverlayLine>) -> Self {
        Self { lines }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bounding box of the stack.
    pub fn size(&self) -> Vec2 {
        let w = self.lines.iter().map(OverlayLine::width).fold(0.0, f32::max);
        let h: f32 = self.lines.iter().map(|l| l.em * 1.2).sum();
        Vec2::new(w, h)
    }

    /// Where the stack lands when centred in `region`.
    pub fn placement(&self, region: Rect) -> Rect {
        Rect::from_center(region.center(), self.size())
    }

    pub fn paint(&self, region: Rect, list: &mut DrawList, z: ZIndex) {
        let bounds = self.placement(region);
        let mut y = bounds.origin.y;
        for line in &self.lines {
            let advance = line.em * 1.2;
            let bar = Rect::from_center(
                Vec2::new(bounds.center().x, y + advance * 0.5),
                Vec2::new(line.width(), line.em * 0.6),
            );
            list.push_quad(z, QuadCmd::new(bar, line.color).rounded(line.em * 0.3));
            y += advance;
        }
    }
}
