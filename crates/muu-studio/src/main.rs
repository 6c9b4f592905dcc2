//! muu.studio landing page.

mod app;
mod boot;
mod config;
mod content;
mod host;
mod layout;
mod links;
mod menu;
mod paint;
mod session;

use anyhow::{Context, Result};
use muu_engine::device::GpuInit;
use muu_engine::logging::{init_logging, LoggingConfig};
use muu_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use app::StudioApp;
use config::{EnvOverrides, StudioConfig};
use content::Content;
use host::NativeHost;
use links::{LinkOpener, LogOpener, SystemOpener};

fn main() -> Result<()> {
    let config = StudioConfig::load().context("loading muu.toml")?;

    init_logging(LoggingConfig {
        env_filter: config.log.filter.clone(),
        ..LoggingConfig::default()
    });

    let env = EnvOverrides::from_env();
    let hero_config = config.hero_config(env)?;
    log::debug!("hero config: {hero_config:?}");

    let opener: Box<dyn LinkOpener> = if config.window.open_links {
        Box::new(SystemOpener)
    } else {
        Box::new(LogOpener::default())
    };

    let mut session = session::login_session();
    let app = StudioApp::new(
        hero_config,
        config.loader_timing(),
        Content::landing(content::current_year()),
        session.as_mut(),
        Box::new(NativeHost::new(env)),
        opener,
    )?;

    let runtime = RuntimeConfig {
        title: config.window.title.clone(),
        initial_size: LogicalSize::new(config.window.width, config.window.height),
        ..RuntimeConfig::default()
    };

    if let Err(e) = Runtime::run(runtime, GpuInit::default(), app) {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
