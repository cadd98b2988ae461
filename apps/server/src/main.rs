use anyhow::Context;
use fitclass::domain::config::{ApiConfig, LoggingConfig};
use fitclass::domain::constants::CONFIG_PATH_ENV;
use fitclass::kernel::config::load_config;
use fitclass_logger::{LevelFilter, Logger};
use fitclass_server::Server;

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let level = cfg
        .level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid log level '{}'", cfg.level))?;

    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.json);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter.clone());
    }
    if let Some(path) = &cfg.path {
        builder = builder.path(path.clone());
    }

    Ok(builder.init()?)
}

#[fitclass_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(std::env::var_os(CONFIG_PATH_ENV))
        .context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}
