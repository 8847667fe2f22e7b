mod config;
mod console;
mod render;
mod screen;

use std::path::PathBuf;

use anyhow::Context;
use reader_logging::reader_info;

use config::{ReaderConfig, API_KEY_ENV, DEFAULT_CONFIG_FILE};
use screen::Screen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config_path_from_args(std::env::args().skip(1))?;
    let config = ReaderConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?
        .with_api_key_override(std::env::var(API_KEY_ENV).ok());

    reader_logging::initialize(&config.log_destination(), config.log_level()?);
    reader_info!(
        "Starting reader: source={} biometric={:?}",
        config.news.source,
        config.biometric
    );
    if config.news.api_key.is_empty() {
        eprintln!("Warning: no API key configured; set {API_KEY_ENV} or news.api_key.");
    }

    Screen::open(&config)?.run().await
}

fn config_path_from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<PathBuf> {
    let mut path = PathBuf::from(DEFAULT_CONFIG_FILE);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args.next().context("--config needs a path")?;
                path = PathBuf::from(value);
            }
            other => anyhow::bail!("unexpected argument {other:?}; usage: reader_app [--config <path>]"),
        }
    }
    Ok(path)
}
