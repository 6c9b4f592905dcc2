//! Capability host backed by the environment and a real GPU probe.

use muu_engine::device::{self, ProbeInit};
use muu_hero::{CapabilityHost, HeroError};

use crate::config::EnvOverrides;

pub struct NativeHost {
    reduced_motion: bool,
    probe: ProbeInit,
}

impl NativeHost {
    pub fn new(env: EnvOverrides) -> Self {
        Self {
            reduced_motion: env.reduced_motion,
            probe: ProbeInit::default(),
        }
    }
}

impl CapabilityHost for NativeHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn probe(&mut self) -> Result<(), HeroError> {
        device::probe_with(&self.probe)
            .map(|_| ())
            .map_err(|e| HeroError::ProbeFailed(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_comes_from_env() {
        let host = NativeHost::new(EnvOverrides { disable_3d: false, reduced_motion: true });
        assert!(host.prefers_reduced_motion());
        assert!(!NativeHost::new(EnvOverrides::default()).prefers_reduced_motion());
    }
}
