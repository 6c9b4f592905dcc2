//! `muu.toml` loading.
//!
//! Looked up at `$MUU_CONFIG`, then `./muu.toml`. A missing file means
//! defaults; a present but broken file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use muu_hero::{HeroConfig, HeroError};

use crate::boot::LoaderTiming;

pub const CONFIG_ENV: &str = "MUU_CONFIG";
pub const ENABLE_3D_ENV: &str = "MUU_ENABLE_3D";
pub const REDUCED_MOTION_ENV: &str = "MUU_REDUCED_MOTION";

const DEFAULT_PATH: &str = "muu.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Hero(#[from] HeroError),
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub hero: HeroSection,
    pub window: WindowSection,
    pub loader: LoaderSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroSection {
    pub particle_count: u32,
    pub radius: f32,
    pub ring_count: u32,
    pub ring_gap: f32,
    pub reduced_motion_override: bool,
    pub rich_rendering_enabled: bool,
}

impl Default for HeroSection {
    fn default() -> Self {
        let d = HeroConfig::default();
        Self {
            particle_count: d.particle_count,
            radius: d.radius,
            ring_count: d.ring_count,
            ring_gap: d.ring_gap,
            reduced_motion_override: d.reduced_motion_override,
            rich_rendering_enabled: d.rich_rendering_enabled,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Hand link targets to the OS opener; otherwise they are only logged.
    #[serde(default = "default_true")]
    pub open_links: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "muu.studio".to_string(),
            width: 1280.0,
            height: 800.0,
            open_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderSection {
    pub min_visible_ms: u64,
    pub safety_ms: u64,
}

impl Default for LoaderSection {
    fn default() -> Self {
        Self {
            min_visible_ms: 400,
            safety_ms: 4000,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `env_logger` filter, e.g. `"info,muu_hero=debug"`.
    pub filter: Option<String>,
}

/// Host-level switches read from the environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `MUU_ENABLE_3D=false` turns the animated branch off.
    pub disable_3d: bool,
    /// `MUU_REDUCED_MOTION=1` reports a reduced-motion preference.
    pub reduced_motion: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let disable_3d = lookup(ENABLE_3D_ENV).is_some_and(|v| v.trim() == "false");
        let reduced_motion = lookup(REDUCED_MOTION_ENV)
            .is_some_and(|v| matches!(v.trim(), "1" | "true" | "reduce" | "yes"));
        Self {
            disable_3d,
            reduced_motion,
        }
    }
}

impl StudioConfig {
    /// Loads from `$MUU_CONFIG` or `./muu.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {path:?}; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Hero options with environment overrides applied, validated.
    pub fn hero_config(&self, env: EnvOverrides) -> Result<HeroConfig, ConfigError> {
        let h = &self.hero;
        let config = HeroConfig {
            particle_count: h.particle_count,
            radius: h.radius,
            ring_count: h.ring_count,
            ring_gap: h.ring_gap,
            reduced_motion_override: h.reduced_motion_override,
            rich_rendering_enabled: h.rich_rendering_enabled && !env.disable_3d,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn loader_timing(&self) -> LoaderTiming {
        LoaderTiming {
            min_visible: Duration::from_millis(self.loader.min_visible_ms),
            safety: Duration::from_millis(self.loader.safety_ms),
            ..LoaderTiming::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c = StudioConfig::parse("").unwrap();
        assert_eq!(c.hero.particle_count, 2600);
        assert_eq!(c.window.title, "muu.studio");
        assert_eq!(c.loader.safety_ms, 4000);
        assert!(c.window.open_links);
    }

    #[test]
    fn sections_override_fields() {
        let c = StudioConfig::parse(
            r#"
            [hero]
            particle_count = 100
            ring_gap = 3.0

            [loader]
            min_visible_ms = 0

            [log]
            filter = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(c.hero.particle_count, 100);
        assert_eq!(c.hero.ring_gap, 3.0);
        assert_eq!(c.hero.radius, 22.0);
        assert_eq!(c.loader.min_visible_ms, 0);
        assert_eq!(c.log.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let c = StudioConfig::load_from(Path::new("/definitely/not/here/muu.toml")).unwrap();
        assert_eq!(c.hero.ring_count, 12);
    }

    #[test]
    fn broken_toml_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("muu-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[hero\nparticle_count = ").unwrap();
        let err = StudioConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn env_disables_rich_rendering() {
        let env = EnvOverrides::from_lookup(|k| (k == ENABLE_3D_ENV).then(|| "false".to_string()));
        assert!(env.disable_3d);
        let hero = StudioConfig::default().hero_config(env).unwrap();
        assert!(!hero.rich_rendering_enabled);
    }

    #[test]
    fn only_literal_false_disables() {
        let env = EnvOverrides::from_lookup(|_| Some("0".to_string()));
        assert!(!env.disable_3d);
    }

    #[test]
    fn invalid_hero_section_is_rejected() {
        let c = StudioConfig::parse("[hero]\nradius = -2.0").unwrap();
        assert!(matches!(
            c.hero_config(EnvOverrides::default()),
            Err(ConfigError::Hero(_))
        ));
    }
}
