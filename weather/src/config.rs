// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use ::config::ProviderConfig;
use error::Error;
use std::{fmt, time::Duration};
use url::Url;

const DEFAULT_FORECAST_POINTS: u8 = 24;

#[derive(Clone)]
pub struct WeatherConfig {
  pub(crate) api_key: String,
  pub(crate) base_url: Url,
  pub(crate) timeout: Duration,
  pub(crate) forecast_points: u8,
}

impl WeatherConfig {
  pub fn new(
    api_key: impl Into<String>,
    base_url: &str,
    timeout: Duration,
  ) -> Result<Self, Error> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(Error::InvalidApiKey);
    }

    // `Url::join` drops the last segment unless the base ends with '/'.
    let normalized = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{}/", base_url)
    };
    let base_url = Url::parse(&normalized)
      .map_err(|e| Error::ConfigError(format!("Invalid provider base URL '{}': {}", base_url, e)))?;

    if timeout.is_zero() {
      return Err(Error::ConfigError("Request timeout must be greater than zero".into()));
    }

    Ok(Self {
      api_key,
      base_url,
      timeout,
      forecast_points: DEFAULT_FORECAST_POINTS,
    })
  }

  pub fn with_forecast_points(mut self, points: u8) -> Self {
    self.forecast_points = points;
    self
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

impl TryFrom<&ProviderConfig> for WeatherConfig {
  type Error = Error;

  fn try_from(provider: &ProviderConfig) -> Result<Self, Self::Error> {
    Ok(
      Self::new(&provider.api_key, &provider.base_url, provider.timeout())?
        .with_forecast_points(provider.forecast_points),
    )
  }
}

impl fmt::Debug for WeatherConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WeatherConfig")
      .field("api_key", &"<redacted>")
      .field("base_url", &self.base_url.as_str())
      .field("timeout", &self.timeout)
      .field("forecast_points", &self.forecast_points)
      .finish()
  }
}
