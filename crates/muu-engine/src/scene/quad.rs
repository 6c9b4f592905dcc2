use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Paint};

use super::{DrawCmd, DrawList, ZIndex};

/// Stroke drawn along the inner edge of a quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Filled, optionally rounded and rotated rectangle.
///
/// `rotation` is in radians, clockwise on screen, around the rect center.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCmd {
    pub rect: Rect,
    pub corner_radius: f32,
    pub rotation: f32,
    pub paint: Paint,
    pub border: Option<Border>,
}

impl QuadCmd {
    #[inline]
    pub fn new(rect: Rect, paint: impl Into<Paint>) -> Self {
        Self {
            rect,
            corner_radius: 0.0,
            rotation: 0.0,
            paint: paint.into(),
            border: None,
        }
    }

    #[inline]
    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    #[inline]
    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    #[inline]
    pub fn bordered(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }
}

/// Regular grid of round dots, used as a subtle texture layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DotGridCmd {
    pub rect: Rect,
    pub pitch: f32,
    pub dot_radius: f32,
    pub color: Color,
    /// Offset of the first dot center from `rect.origin`.
    pub phase: Vec2,
}

impl DrawList {
    /// Records a quad.
    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, quad: QuadCmd) {
        self.push(z, DrawCmd::Quad(quad));
    }

    /// Records a solid, axis-aligned rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_quad(z, QuadCmd::new(rect, color));
    }

    /// Records a dot grid.
    #[inline]
    pub fn push_dot_grid(&mut self, z: ZIndex, grid: DotGridCmd) {
        self.push(z, DrawCmd::DotGrid(grid));
    }
}
