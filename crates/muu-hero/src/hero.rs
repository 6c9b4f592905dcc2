use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::decision::{self, CapabilityHost, RenderDecision};
use crate::geometry::GeometryCache;
use crate::panel::{FallbackPanel, Overlay};
use crate::scene::Scene;
use crate::{HeroConfig, HeroError};

/// Lifecycle of one mount.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeroState {
    /// No decision yet; the static panel stands in.
    Unprobed,
    /// Terminal: the fallback panel.
    Static,
    /// Terminal until unmount: the 3D scene.
    Animating,
    Unmounted,
}

/// What the host should draw this frame.
#[derive(Debug)]
pub enum View<'a> {
    Static {
        panel: &'a FallbackPanel,
        overlay: Option<&'a Overlay>,
    },
    Animated {
        scene: &'a Scene,
        geometry: &'a GeometryCache,
        overlay: Option<&'a Overlay>,
    },
    Unmounted,
}

type ReadyCallback = Box<dyn FnOnce()>;

/// The hero background for one mount.
///
/// Driven by the host: [`Hero::resolve`] once, [`Hero::construct`] if the
/// decision is capable, then per frame [`Hero::advance`] and
/// [`Hero::frame_presented`], and finally [`Hero::unmount`].
pub struct Hero {
    config: HeroConfig,
    state: HeroState,
    decision: RenderDecision,

    panel: FallbackPanel,
    overlay: Option<Overlay>,

    scene: Option<Scene>,
    geometry: GeometryCache,

    on_ready: Option<ReadyCallback>,
    ready_fired: bool,
    /// Set on context loss; the scene stops updating for good.
    frozen: bool,
}

impl std::fmt::Debug for Hero {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hero")
            .field("state", &self.state)
            .field("decision", &self.decision)
            .field("ready_fired", &self.ready_fired)
            .field("frozen", &self.frozen)
            .finish_non_exhaustive()
    }
}

impl Hero {
    pub fn new(config: HeroConfig) -> Result<Self, HeroError> {
        config.validate()?;
        Ok(Self {
            config,
            state: HeroState::Unprobed,
            decision: RenderDecision::Untested,
            panel: FallbackPanel::default(),
            overlay: None,
            scene: None,
            geometry: GeometryCache::new(),
            on_ready: None,
            ready_fired: false,
            frozen: false,
        })
    }

    /// Replaces the overlay, e.g. when the host's type scale changes.
    pub fn set_overlay(&mut self, overlay: Option<Overlay>) {
        self.overlay = overlay;
    }

    /// Registers the readiness callback. It runs at most once per mount, on
    /// the first presented frame of the animated branch.
    pub fn on_ready<F>(&mut self, f: F)
    where
        F: FnOnce() + 'static,
    {
        if self.ready_fired || matches!(self.state, HeroState::Static | HeroState::Unmounted) {
            return;
        }
        self.on_ready = Some(Box::new(f));
    }

    /// Makes the render decision. Later calls return the first answer.
    pub fn resolve(&mut self, host: &mut dyn CapabilityHost) -> RenderDecision {
        if self.state != HeroState::Unprobed || self.decision != RenderDecision::Untested {
            return self.decision;
        }

        self.decision = decision::decide(&self.config, host);
        log::info!("hero render decision: {:?}", self.decision);

        if self.decision == RenderDecision::Incapable {
            self.enter_static();
        }
        self.decision
    }

    /// Generates the geometry and runs `build` (typically GPU setup) for the
    /// capable branch.
    ///
    /// An error or a panic anywhere in this step flips the decision to
    /// `Incapable` and returns `None`; it never reaches the caller.
    pub fn construct<T, F>(&mut self, build: F) -> Option<T>
    where
        F: FnOnce(&Scene, &GeometryCache) -> Result<T, HeroError>,
    {
        if self.state != HeroState::Unprobed || self.decision != RenderDecision::Capable {
            log::debug!(
                "hero construct ignored (state={:?}, decision={:?})",
                self.state,
                self.decision
            );
            return None;
        }

        let config = &self.config;
        let geometry = &mut self.geometry;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            geometry.particles(config.particle_count, config.radius);
            geometry.rings(config.ring_count, config.ring_gap);
            let scene = Scene::new();
            build(&scene, &*geometry).map(|built| (scene, built))
        }));

        let err = match outcome {
            Ok(Ok((scene, built))) => {
                self.scene = Some(scene);
                self.state = HeroState::Animating;
                return Some(built);
            }
            Ok(Err(e)) => e,
            Err(payload) => HeroError::Construction(panic_message(payload.as_ref())),
        };

        log::warn!("hero falling back to static panel: {err}");
        self.decision = RenderDecision::Incapable;
        self.enter_static();
        None
    }

    /// Steps the animation. `dt` is the frame step, `elapsed` the wall-clock
    /// seconds since the hero was mounted. No-op unless animating and not
    /// frozen.
    pub fn advance(&mut self, dt: f32, elapsed: f64) {
        if self.state != HeroState::Animating || self.frozen {
            return;
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.advance(dt, elapsed);
        }
    }

    /// Reports that a frame of the animated branch reached the screen.
    pub fn frame_presented(&mut self) {
        if self.state != HeroState::Animating || self.frozen || self.ready_fired {
            return;
        }
        self.ready_fired = true;
        if let Some(cb) = self.on_ready.take() {
            cb();
        }
    }

    /// Freezes the scene after the graphics device went away. Nothing is
    /// restored; the hero keeps its last state until unmount.
    pub fn context_lost(&mut self, reason: impl Into<String>) {
        if self.state != HeroState::Animating || self.frozen {
            return;
        }
        log::warn!("{}; hero animation stopped", HeroError::ContextLost(reason.into()));
        self.frozen = true;
    }

    /// Drops the scene, the callback and the geometry. Terminal.
    pub fn unmount(&mut self) {
        if self.state == HeroState::Unmounted {
            return;
        }
        log::debug!("hero unmounted");
        self.state = HeroState::Unmounted;
        self.scene = None;
        self.on_ready = None;
        self.geometry = GeometryCache::new();
    }

    pub fn view(&self) -> View<'_> {
        let overlay = self.overlay.as_ref();
        match (self.state, self.scene.as_ref()) {
            (HeroState::Unmounted, _) => View::Unmounted,
            (HeroState::Animating, Some(scene)) => View::Animated {
                scene,
                geometry: &self.geometry,
                overlay,
            },
            _ => View::Static {
                panel: &self.panel,
                overlay,
            },
        }
    }

    #[inline]
    pub fn state(&self) -> HeroState {
        self.state
    }

    #[inline]
    pub fn decision(&self) -> RenderDecision {
        self.decision
    }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn enter_static(&mut self) {
        self.state = HeroState::Static;
        self.scene = None;
        self.on_ready = None;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host(bool);

    impl CapabilityHost for Host {
        fn prefers_reduced_motion(&self) -> bool {
            false
        }
        fn probe(&mut self) -> Result<(), HeroError> {
            if self.0 {
                Ok(())
            } else {
                Err(HeroError::ProbeFailed("test".into()))
            }
        }
    }

    fn animating() -> Hero {
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        hero.resolve(&mut Host(true));
        hero.construct(|_, _| Ok(())).unwrap();
        hero
    }

    #[test]
    fn unprobed_hero_shows_the_panel() {
        let hero = Hero::new(HeroConfig::default()).unwrap();
        assert!(matches!(hero.view(), View::Static { .. }));
        assert_eq!(hero.decision(), RenderDecision::Untested);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = HeroConfig {
            radius: -1.0,
            ..HeroConfig::default()
        };
        assert!(Hero::new(cfg).is_err());
    }

    #[test]
    fn resolve_is_sticky() {
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        assert_eq!(hero.resolve(&mut Host(false)), RenderDecision::Incapable);
        assert_eq!(hero.resolve(&mut Host(true)), RenderDecision::Incapable);
        assert_eq!(hero.state(), HeroState::Static);
    }

    #[test]
    fn construct_requires_capable_decision() {
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        assert!(hero.construct(|_, _| Ok(1)).is_none());
        assert_eq!(hero.state(), HeroState::Unprobed);
    }

    #[test]
    fn construct_sees_generated_geometry() {
        let mut hero = Hero::new(HeroConfig::default()).unwrap();
        hero.resolve(&mut Host(true));
        let n = hero.construct(|_, geo| Ok(geo.cached_particles().map_or(0, |p| p.len())));
        assert_eq!(n, Some(2600));
        assert_eq!(hero.state(), HeroState::Animating);
    }

    #[test]
    fn context_loss_freezes_rotation() {
        let mut hero = animating();
        hero.advance(1.0, 1.0);
        let before = hero.scene().map(|s| s.particles.angle_y());

        hero.context_lost("device removed");
        hero.advance(1.0, 2.0);
        assert!(hero.is_frozen());
        assert_eq!(hero.scene().map(|s| s.particles.angle_y()), before);
        assert_eq!(hero.state(), HeroState::Animating);
    }

    #[test]
    fn panic_messages_are_extracted() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(owned.as_ref()), "boom");
        let borrowed: Box<dyn Any + Send> = Box::new("bang");
        assert_eq!(panic_message(borrowed.as_ref()), "bang");
    }
}
