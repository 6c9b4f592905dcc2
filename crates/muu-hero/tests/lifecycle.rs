use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use muu_engine::time::FrameClock;

use muu_hero::geometry::ParticleField;
use muu_hero::scene::ring_angle;
use muu_hero::{CapabilityHost, Hero, HeroConfig, HeroError, HeroState, RenderDecision, View};

struct FakeHost {
    reduced_motion: bool,
    capable: bool,
    probes: Rc<Cell<u32>>,
}

impl FakeHost {
    fn new(capable: bool) -> Self {
        Self {
            reduced_motion: false,
            capable,
            probes: Rc::new(Cell::new(0)),
        }
    }
}

impl CapabilityHost for FakeHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn probe(&mut self) -> Result<(), HeroError> {
        self.probes.set(self.probes.get() + 1);
        if self.capable {
            Ok(())
        } else {
            Err(HeroError::ProbeFailed("adapter request rejected".into()))
        }
    }
}

fn counting_hero(config: HeroConfig) -> (Hero, Rc<Cell<u32>>) {
    let fired = Rc::new(Cell::new(0));
    let mut hero = Hero::new(config).unwrap();
    let f = fired.clone();
    hero.on_ready(move || f.set(f.get() + 1));
    (hero, fired)
}

// ── geometry ──────────────────────────────────────────────────────────────

#[test]
fn particle_field_is_deterministic() {
    let a = ParticleField::generate(2600, 22.0);
    let b = ParticleField::generate(2600, 22.0);
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn zero_particles_yields_an_empty_field() {
    let (mut hero, _) = counting_hero(HeroConfig {
        particle_count: 0,
        ..HeroConfig::default()
    });
    hero.resolve(&mut FakeHost::new(true));
    let built = hero.construct(|_, geo| Ok(geo.cached_particles().map(|p| p.is_empty())));
    assert_eq!(built, Some(Some(true)));
    assert_eq!(hero.state(), HeroState::Animating);
}

// ── decision branches ─────────────────────────────────────────────────────

#[test]
fn failed_probe_shows_panel_and_never_signals_ready() {
    let (mut hero, fired) = counting_hero(HeroConfig::default());
    assert_eq!(hero.resolve(&mut FakeHost::new(false)), RenderDecision::Incapable);
    assert!(matches!(hero.view(), View::Static { .. }));

    hero.advance(0.016, 0.016);
    hero.frame_presented();
    hero.frame_presented();
    assert_eq!(fired.get(), 0);
}

#[test]
fn capable_hero_signals_ready_once_after_first_frame() {
    let (mut hero, fired) = counting_hero(HeroConfig::default());
    assert_eq!(hero.resolve(&mut FakeHost::new(true)), RenderDecision::Capable);
    assert!(hero.construct(|_, _| Ok(())).is_some());
    assert_eq!(fired.get(), 0);

    for i in 1..=5 {
        hero.advance(0.016, 0.016 * i as f64);
        hero.frame_presented();
    }
    assert_eq!(fired.get(), 1);
    assert!(matches!(hero.view(), View::Animated { .. }));
}

#[test]
fn construction_error_falls_back_quietly() {
    let (mut hero, fired) = counting_hero(HeroConfig::default());
    hero.resolve(&mut FakeHost::new(true));

    let built: Option<()> =
        hero.construct(|_, _| Err(HeroError::Construction("no pipeline".into())));
    assert!(built.is_none());
    assert_eq!(hero.decision(), RenderDecision::Incapable);
    assert_eq!(hero.state(), HeroState::Static);

    hero.frame_presented();
    assert_eq!(fired.get(), 0);
}

#[test]
fn construction_panic_falls_back_quietly() {
    let (mut hero, fired) = counting_hero(HeroConfig::default());
    hero.resolve(&mut FakeHost::new(true));

    let built: Option<()> = hero.construct(|_, _| panic!("driver exploded"));
    assert!(built.is_none());
    assert!(matches!(hero.view(), View::Static { .. }));

    hero.frame_presented();
    assert_eq!(fired.get(), 0);
}

#[test]
fn reduced_motion_override_never_probes() {
    let host = FakeHost::new(true);
    let probes = host.probes.clone();
    let mut host = host;

    let (mut hero, _) = counting_hero(HeroConfig {
        reduced_motion_override: true,
        ..HeroConfig::default()
    });
    assert_eq!(hero.resolve(&mut host), RenderDecision::Incapable);
    assert_eq!(probes.get(), 0);
}

#[test]
fn host_reduced_motion_never_probes() {
    let mut host = FakeHost::new(true);
    host.reduced_motion = true;
    let probes = host.probes.clone();

    let (mut hero, _) = counting_hero(HeroConfig::default());
    assert_eq!(hero.resolve(&mut host), RenderDecision::Incapable);
    assert_eq!(probes.get(), 0);
}

// ── animation ─────────────────────────────────────────────────────────────

fn animating_hero() -> Hero {
    let mut hero = Hero::new(HeroConfig::default()).unwrap();
    hero.resolve(&mut FakeHost::new(true));
    hero.construct(|_, _| Ok(()));
    hero
}

fn drive(hero: &mut Hero, clock: &mut FrameClock, at: Instant) {
    let ft = clock.tick_at(at);
    hero.advance(ft.dt, ft.elapsed);
}

#[test]
fn ring_angle_depends_on_elapsed_time_only() {
    let start = Instant::now();

    let mut fast = animating_hero();
    let mut clock = FrameClock::new();
    for i in 1..=1200u64 {
        drive(&mut fast, &mut clock, start + Duration::from_micros(i * 10_000_000 / 1200));
    }

    let mut slow = animating_hero();
    let mut clock = FrameClock::new();
    for i in 1..=20u64 {
        drive(&mut slow, &mut clock, start + Duration::from_millis(i * 500));
    }

    let a = fast.scene().map(|s| s.rings.angle_z()).unwrap();
    let b = slow.scene().map(|s| s.rings.angle_z()).unwrap();
    assert!((a - 0.18).abs() < 1e-3);
    assert!((a - b).abs() < 1e-3);
}

#[test]
fn ring_angle_keeps_wall_clock_pace_across_a_stall() {
    let mut hero = animating_hero();
    let mut clock = FrameClock::new();
    let start = Instant::now();

    let mut t = Duration::ZERO;
    for _ in 0..60 {
        t += Duration::from_micros(16_667);
        drive(&mut hero, &mut clock, start + t);
    }
    // One long gap, well past the 250 ms step clamp.
    t += Duration::from_secs(5);
    drive(&mut hero, &mut clock, start + t);

    let scene = hero.scene().unwrap();
    let expected = ring_angle(scene.elapsed());
    assert!(scene.elapsed() > 5.9);
    assert!((scene.rings.angle_z() - expected).abs() < 1e-6);
    assert!(scene.rings.angle_z() > 0.1);
}

#[test]
fn unmount_stops_all_mutation() {
    let (mut hero, fired) = counting_hero(HeroConfig::default());
    hero.resolve(&mut FakeHost::new(true));
    hero.construct(|_, _| Ok(()));
    hero.advance(1.0, 1.0);

    hero.unmount();
    hero.advance(1.0, 2.0);
    hero.frame_presented();

    assert_eq!(hero.state(), HeroState::Unmounted);
    assert!(hero.scene().is_none());
    assert!(matches!(hero.view(), View::Unmounted));
    assert_eq!(fired.get(), 0);
}
