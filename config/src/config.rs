// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{env, DEFAULT_CONFIG_PATH};
use anyhow::Context;
use error::Error;
use serde::Deserialize;
use std::{fmt, fs, path::Path, time::Duration};
use tracing::{debug, info, instrument};

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
// 8 points a day at 3-hour granularity, three days.
const DEFAULT_FORECAST_POINTS: u8 = 24;
const MAX_FORECAST_POINTS: u8 = 40;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub server: ServerConfig,
  pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub bind: String,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
  pub api_key: String,
  pub base_url: String,
  pub timeout_secs: u64,
  pub forecast_points: u8,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind: DEFAULT_BIND.to_string(),
    }
  }
}

impl Default for ProviderConfig {
  fn default() -> Self {
    Self {
      api_key: String::new(),
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      forecast_points: DEFAULT_FORECAST_POINTS,
    }
  }
}

// Keeps the key out of logs and `{:?}` output.
impl fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProviderConfig")
      .field("api_key", &"<redacted>")
      .field("base_url", &self.base_url)
      .field("timeout_secs", &self.timeout_secs)
      .field("forecast_points", &self.forecast_points)
      .finish()
  }
}

impl ProviderConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
    let content = fs::read_to_string(path.as_ref())
      .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
    let config = Self::from_toml_str(&content)?;
    debug!("Loaded configuration successfully");
    Ok(config)
  }

  pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
    toml::from_str(content).context("Failed to parse configuration")
  }

  /// Reads the TOML file (if present), layers environment overrides on top
  /// and validates the result.
  pub fn load() -> anyhow::Result<Self> {
    let path = std::env::var(env::CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut config = if Path::new(&path).exists() {
      info!("Loading configuration from {}", path);
      Self::from_file(&path)?
    } else {
      info!("No configuration file at {}, using defaults", path);
      Self::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
  }

  pub fn apply_overrides<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(key) = lookup(env::API_KEY) {
      self.provider.api_key = key;
    }
    if let Some(url) = lookup(env::BASE_URL) {
      self.provider.base_url = url;
    }
    if let Some(bind) = lookup(env::BIND) {
      self.server.bind = bind;
    }
  }

  pub fn validate(&self) -> Result<(), Error> {
    if self.provider.api_key.trim().is_empty() {
      return Err(Error::InvalidApiKey);
    }
    if self.provider.base_url.trim().is_empty() {
      return Err(Error::ConfigError("provider.base_url cannot be empty".into()));
    }
    if self.provider.timeout_secs == 0 {
      return Err(Error::ConfigError(
        "provider.timeout_secs must be greater than zero".into(),
      ));
    }
    if !(1..=MAX_FORECAST_POINTS).contains(&self.provider.forecast_points) {
      return Err(Error::ConfigError(format!(
        "provider.forecast_points must be between 1 and {}",
        MAX_FORECAST_POINTS
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn with_key() -> Config {
    let mut config = Config::default();
    config.provider.api_key = "secret".into();
    config
  }

  #[test]
  fn defaults_match_provider() {
    let config = Config::default();
    assert_eq!(config.server.bind, "0.0.0.0:8000");
    assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.provider.forecast_points, 24);
    assert_eq!(config.provider.timeout(), Duration::from_secs(10));
  }

  #[test]
  fn parses_partial_toml() {
    let config = Config::from_toml_str(
      r#"
        [provider]
        timeout_secs = 3
      "#,
    )
    .unwrap();
    assert_eq!(config.provider.timeout_secs, 3);
    assert_eq!(config.provider.forecast_points, 24);
    assert_eq!(config.server.bind, "0.0.0.0:8000");
  }

  #[test]
  fn rejects_unknown_types() {
    assert!(Config::from_toml_str("[provider]\ntimeout_secs = \"soon\"").is_err());
  }

  #[test]
  fn environment_overrides_file_values() {
    let vars: HashMap<&str, &str> = HashMap::from([
      (env::API_KEY, "from-env"),
      (env::BASE_URL, "http://localhost:9999/"),
      (env::BIND, "127.0.0.1:3000"),
    ]);
    let mut config = Config::default();
    config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.provider.api_key, "from-env");
    assert_eq!(config.provider.base_url, "http://localhost:9999/");
    assert_eq!(config.server.bind, "127.0.0.1:3000");
  }

  #[test]
  fn missing_api_key_is_rejected() {
    let config = Config::default();
    assert!(matches!(config.validate(), Err(Error::InvalidApiKey)));
  }

  #[test]
  fn zero_timeout_is_rejected() {
    let mut config = with_key();
    config.provider.timeout_secs = 0;
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
  }

  #[test]
  fn forecast_points_are_bounded() {
    let mut config = with_key();
    config.provider.forecast_points = 41;
    assert!(config.validate().is_err());
    config.provider.forecast_points = 40;
    assert!(config.validate().is_ok());
  }

  #[test]
  fn debug_output_hides_api_key() {
    let config = with_key();
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("<redacted>"));
  }
}
