//! wgpu device and window surface.
//!
//! [`probe`] answers whether a throwaway GPU context can be created at all;
//! [`Gpu`] is the long-lived per-window context, which flags device loss
//! instead of recovering from it.

mod context;
mod init;
mod probe;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use surface::SurfaceErrorAction;
pub use init::GpuInit;
pub use probe::{probe, probe_with, ProbeInit};
