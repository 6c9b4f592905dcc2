use super::quad::{DotGridCmd, QuadCmd};

/// Renderer-agnostic draw command.
///
/// Both variants are drawn by `render::QuadRenderer`; a new variant needs a
/// matching instance encoding there.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
    DotGrid(DotGridCmd),
}
