use anyhow::Context;
use flatwiki_config::Config;
use flatwiki_server::{AppContext, log_builder, serve};
use std::env;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log_builder(env_logger::Env::default()).init();

    log::info!("flatwiki starting up");

    // Directories are fixed relative to where the process was started
    let cwd = env::current_dir().context("Failed to read working directory")?;
    let config = match Config::load(&cwd) {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path(&cwd).display());
            config
        }
        Ok(None) => {
            log::info!(
                "No config file at {}, using defaults",
                Config::config_path(&cwd).display()
            );
            Config::default()
        }
        Err(e) => {
            log::error!("Config load failed: {e}");
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
    .resolve_dirs(&cwd);
    log::info!("Data directory: {}", config.data_dir.display());
    log::info!("Templates directory: {}", config.templates_dir.display());
    if config.raw_html {
        log::warn!("raw_html is enabled; page text is served without HTML escaping");
    }

    let ctx = AppContext::from_config(&config).context("Failed to initialise wiki")?;

    serve(Arc::new(ctx), &config.bind_addr())
        .await
        .with_context(|| format!("Server on {} failed", config.bind_addr()))
}
