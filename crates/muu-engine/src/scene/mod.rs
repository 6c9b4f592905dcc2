//! What the page layer draws: quads and dot grids on named z layers.

mod cmd;
mod list;
mod quad;
mod z_index;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use quad::{Border, DotGridCmd, QuadCmd};
pub use z_index::ZIndex;
