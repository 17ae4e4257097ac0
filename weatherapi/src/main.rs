// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod api;
mod web;

use anyhow::{Context, Result};
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather::{WeatherConfig, WeatherService};

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(debug_assertions)]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter())
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging() {
  tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  #[cfg(debug_assertions)]
  config::dotenv::load()?;
  setup_logging();

  let config = Config::load().context("Failed to load configuration")?;
  info!(provider = ?config.provider, "Configuration loaded");

  let weather_config =
    WeatherConfig::try_from(&config.provider).context("Invalid provider configuration")?;
  let service = WeatherService::new(weather_config).context("Failed to create weather service")?;

  web::run(&config.server.bind, api::router(Arc::new(service))).await
}
