use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::LoggingConfig;
use tracing::info;

/// Console logs go to stderr; stdout is reserved for protocol lines.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let stderr_filter = cfg
        .stdout_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;
    let file_filter = cfg
        .file_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;

    let stderr_layer = fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let file_appender = tracing_appender::rolling::daily(&cfg.log_dir, "overpass-worker.log");
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    info!(log_dir = %cfg.log_dir, "Logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("engine=debug".parse().unwrap())
            .add_directive("shared=debug".parse().unwrap());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
