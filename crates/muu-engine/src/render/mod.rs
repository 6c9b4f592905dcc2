//! GPU rendering for the 2D page layer.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod quad;

pub use ctx::{premul_alpha_blend, RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
