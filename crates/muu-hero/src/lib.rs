//! Animated hero background for the muu.studio landing page.
//!
//! A [`Hero`] is mounted once per page view. It asks a [`CapabilityHost`]
//! whether rich rendering is possible, then either builds a small 3D scene
//! (particle cloud, ring wireframes, floor grid, post chain) or falls back to
//! a static gradient [`FallbackPanel`]. Neither branch ever surfaces an error
//! to the caller.

pub mod config;
pub mod decision;
pub mod geometry;
pub mod gpu;
pub mod panel;
pub mod rng;
pub mod scene;

mod error;
mod hero;

pub use config::HeroConfig;
pub use decision::{CapabilityHost, GateReason, RenderDecision};
pub use error::HeroError;
pub use hero::{Hero, HeroState, View};
pub use panel::{FallbackPanel, Overlay, OverlayLine};
pub use scene::Scene;
