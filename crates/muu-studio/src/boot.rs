//! First-visit loader gating.
//!
//! The loader shows only on the first visit of a session. It closes once the
//! hero reported ready and a minimum display time has passed; a safety timer
//! stands in for a readiness signal that never comes.

use std::time::Duration;

use crate::session::{SessionStore, VISITED_KEY};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoaderTiming {
    pub min_visible: Duration,
    pub safety: Duration,
    /// One sweep of the marquee bar.
    pub marquee_period: Duration,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            min_visible: Duration::from_millis(400),
            safety: Duration::from_millis(4000),
            marquee_period: Duration::from_millis(1200),
        }
    }
}

#[derive(Debug)]
pub struct BootGate {
    timing: LoaderTiming,
    booting: bool,
    hero_ready: bool,
    min_elapsed: bool,
    since_start: Duration,
}

impl BootGate {
    /// Consults and updates the session marker. Returns a gate that is
    /// already open on repeat visits.
    pub fn start(store: &mut dyn SessionStore, timing: LoaderTiming) -> Self {
        let first_visit = store.get(VISITED_KEY).is_none();
        if first_visit {
            if let Err(e) = store.set(VISITED_KEY, "true") {
                log::warn!("could not record session visit: {e}");
            }
            log::info!("first visit this session; showing loader");
        } else {
            log::debug!("session already visited; loader skipped");
        }

        Self {
            timing,
            booting: first_visit,
            hero_ready: false,
            min_elapsed: false,
            since_start: Duration::ZERO,
        }
    }

    #[inline]
    pub fn is_booting(&self) -> bool {
        self.booting
    }

    /// The hero's readiness callback fired.
    pub fn hero_ready(&mut self) {
        self.hero_ready = true;
        self.settle();
    }

    /// Advances both timers to `since_start` since the gate opened.
    pub fn update(&mut self, since_start: Duration) {
        if !self.booting {
            return;
        }
        self.since_start = since_start;
        if since_start >= self.timing.min_visible {
            self.min_elapsed = true;
        }
        if since_start >= self.timing.safety && !self.hero_ready {
            log::warn!("hero not ready after {:?}; closing loader anyway", self.timing.safety);
            self.hero_ready = true;
        }
        self.settle();
    }

    /// Marquee bar offset in bar widths: sweeps `-1.0 → 3.0` each period.
    pub fn marquee_offset(&self) -> f32 {
        let period = self.timing.marquee_period.as_secs_f32().max(f32::EPSILON);
        let phase = (self.since_start.as_secs_f32() / period).fract();
        -1.0 + 4.0 * phase
    }

    fn settle(&mut self) {
        if self.booting && self.hero_ready && self.min_elapsed {
            log::info!("loader closed after {:?}", self.since_start);
            self.booting = false;
        }
    }
}
