//! muu engine crate.
//!
//! Window runtime, GPU device management and the small 2D draw model used by
//! the landing page shell. The hero scene builds on top of this crate.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
