//! Colors and fills for the page layer. Colors are linear and premultiplied.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, RadialGradient};

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    RadialGradient(RadialGradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}
