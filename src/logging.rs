use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::CONFIG;
use crate::shared::config::model::LoggingConfig;

/// Installs the global subscriber from the loaded configuration.
pub fn init() -> anyhow::Result<()> {
    init_with(&CONFIG.logging)
}

/// Installs a stdout layer and a daily rolling file layer, each with its own level.
pub fn init_with(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let (stdout_filter, file_filter) = parse_levels(cfg)?;

    let stdout_layer = fmt::layer().with_ansi(true).with_filter(stdout_filter);

    let file_appender = tracing_appender::rolling::daily(&cfg.log_dir, "explore_gateway.log");
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    info!(
        target: "explore_gateway::logging",
        log_dir = %cfg.log_dir,
        "Logging initialized"
    );
    Ok(())
}

pub fn parse_levels(cfg: &LoggingConfig) -> anyhow::Result<(LevelFilter, LevelFilter)> {
    let stdout_filter = cfg.stdout_level.parse::<LevelFilter>()?;
    let file_filter = cfg.file_level.parse::<LevelFilter>()?;
    Ok((stdout_filter, file_filter))
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive("explore_gateway=debug".parse().unwrap());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
