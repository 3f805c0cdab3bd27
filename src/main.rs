mod action;
mod api;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod form;
mod headless;
mod logging;
mod model;
mod panel;
mod prefs;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use cli::Cli;
use color_eyre::eyre::Result;

use crate::api::{ConfigApi, HttpConfigApi};
use crate::config::ConfigManager;
use crate::prefs::PreferenceContext;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let mut config = ConfigManager::new()?;
    if let Some(url) = &cli.api_url {
        config.app_config_mut().backend.base_url = url.clone();
    }
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.app_config().general.log_level.clone());

    // Install the subscriber before anything that logs
    let _log_guard = match &cli.command {
        Some(_) => {
            logging::init_stderr_logging(&level)?;
            None
        }
        None => {
            config.write_default_config()?;
            Some(logging::init_file_logging(&config.logs_dir(), &level)?)
        }
    };
    if let Some(warning) = config.load_warning() {
        tracing::warn!("{}", warning);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let api = HttpConfigApi::new(&config.app_config().backend)?;
    let prefs = PreferenceContext::init(config.preferences_path());

    if let Some(command) = &cli.command {
        let mut stdout = io::stdout().lock();
        runtime.block_on(headless::run_command(command, &api, &prefs, &mut stdout))?;
        stdout.flush()?;
        return Ok(());
    }

    tracing::info!("Starting provider-console against {}", api.base_url());

    let _guard = runtime.enter();
    let api: Arc<dyn ConfigApi> = Arc::new(api);
    let tick_interval = Duration::from_millis(config.app_config().general.tick_interval_ms.max(16));
    app::App::new(api, prefs, tick_interval).run()?;

    Ok(())
}
