//! Capability negotiation: configuration + host queries → [`RenderDecision`].

use crate::{HeroConfig, HeroError};

/// Which branch the hero renders. Produced once per mount.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RenderDecision {
    #[default]
    Untested,
    Capable,
    Incapable,
}

impl RenderDecision {
    #[inline]
    pub fn is_capable(self) -> bool {
        self == RenderDecision::Capable
    }
}

/// Host environment queries. Both answers are advisory.
pub trait CapabilityHost {
    /// Whether the user asked the platform for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Creates and releases a minimal graphics context.
    /// Must not panic; a failure is reported as [`HeroError::ProbeFailed`].
    fn probe(&mut self) -> Result<(), HeroError>;
}

/// Why the probe was skipped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GateReason {
    RichRenderingDisabled,
    ReducedMotionOverride,
    HostPrefersReducedMotion,
}

/// Checks the cheap gates that force the static branch without probing.
pub fn gate(config: &HeroConfig, host_prefers_reduced_motion: bool) -> Option<GateReason> {
    if !config.rich_rendering_enabled {
        Some(GateReason::RichRenderingDisabled)
    } else if config.reduced_motion_override {
        Some(GateReason::ReducedMotionOverride)
    } else if host_prefers_reduced_motion {
        Some(GateReason::HostPrefersReducedMotion)
    } else {
        None
    }
}

/// Maps a gate result and a probe result to a decision.
#[inline]
pub fn classify(gate: Option<GateReason>, probe_ok: bool) -> RenderDecision {
    match (gate, probe_ok) {
        (Some(_), _) | (None, false) => RenderDecision::Incapable,
        (None, true) => RenderDecision::Capable,
    }
}

/// Runs the gates and, only if they all pass, the host probe.
pub fn decide(config: &HeroConfig, host: &mut dyn CapabilityHost) -> RenderDecision {
    if let Some(reason) = gate(config, host.prefers_reduced_motion()) {
        log::debug!("capability probe skipped: {reason:?}");
        return classify(Some(reason), false);
    }

    match host.probe() {
        Ok(()) => classify(None, true),
        Err(e) => {
            log::info!("{e}");
            classify(None, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHost {
        reduced: bool,
        probe_result: bool,
        probes: u32,
    }

    impl CapabilityHost for FakeHost {
        fn prefers_reduced_motion(&self) -> bool {
            self.reduced
        }

        fn probe(&mut self) -> Result<(), HeroError> {
            self.probes += 1;
            if self.probe_result {
                Ok(())
            } else {
                Err(HeroError::ProbeFailed("no adapter".into()))
            }
        }
    }

    fn host(reduced: bool, probe_result: bool) -> FakeHost {
        FakeHost {
            reduced,
            probe_result,
            probes: 0,
        }
    }

    #[test]
    fn probe_result_decides_when_ungated() {
        let cfg = HeroConfig::default();
        assert_eq!(decide(&cfg, &mut host(false, true)), RenderDecision::Capable);
        assert_eq!(decide(&cfg, &mut host(false, false)), RenderDecision::Incapable);
    }

    #[test]
    fn probe_error_means_incapable() {
        let mut h = host(false, false);
        assert_eq!(decide(&HeroConfig::default(), &mut h), RenderDecision::Incapable);
        assert_eq!(h.probes, 1);
        assert!(matches!(h.probe(), Err(HeroError::ProbeFailed(_))));
    }

    #[test]
    fn override_skips_the_probe() {
        let cfg = HeroConfig {
            reduced_motion_override: true,
            ..HeroConfig::default()
        };
        let mut h = host(false, true);
        assert_eq!(decide(&cfg, &mut h), RenderDecision::Incapable);
        assert_eq!(h.probes, 0);
    }

    #[test]
    fn host_preference_skips_the_probe() {
        let mut h = host(true, true);
        assert_eq!(decide(&HeroConfig::default(), &mut h), RenderDecision::Incapable);
        assert_eq!(h.probes, 0);
    }

    #[test]
    fn disabled_rich_rendering_wins_over_everything() {
        let cfg = HeroConfig {
            rich_rendering_enabled: false,
            reduced_motion_override: true,
            ..HeroConfig::default()
        };
        assert_eq!(gate(&cfg, true), Some(GateReason::RichRenderingDisabled));
    }

    #[test]
    fn classify_never_yields_untested() {
        for g in [None, Some(GateReason::ReducedMotionOverride)] {
            for ok in [false, true] {
                assert_ne!(classify(g, ok), RenderDecision::Untested);
            }
        }
    }
}
