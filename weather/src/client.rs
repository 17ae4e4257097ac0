// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  config::WeatherConfig,
  constants::*,
  models::{
    api::{CurrentResponse, ForecastResponse},
    weather::{CurrentConditions, ForecastPoint},
  },
  units::Units,
};
use async_trait::async_trait;
use error::{Error, Phase};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
  async fn fetch_current(&self, city: &str, units: Units) -> Result<CurrentConditions, Error>;
  async fn fetch_forecast(&self, city: &str, units: Units) -> Result<Vec<ForecastPoint>, Error>;
  /// Current conditions exactly as the provider returned them.
  async fn fetch_current_raw(&self, city: &str, units: Units) -> Result<Value, Error>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
  config: WeatherConfig,
  client: reqwest::Client,
}

impl OpenWeatherClient {
  pub fn new(config: WeatherConfig) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .user_agent(USER_AGENT)
      .build()?;

    Ok(Self { config, client })
  }

  fn build_url(&self, endpoint: &str, city: &str, units: Units) -> Result<Url, Error> {
    let mut url = self
      .config
      .base_url
      .join(endpoint)
      .map_err(|e| Error::ConfigError(format!("Failed to build {} URL: {}", endpoint, e)))?;

    url
      .query_pairs_mut()
      .append_pair("q", city)
      .append_pair("appid", &self.config.api_key)
      .append_pair("units", units.as_str());

    if endpoint == FORECAST_ENDPOINT {
      url
        .query_pairs_mut()
        .append_pair("cnt", &self.config.forecast_points.to_string());
    }

    Ok(url)
  }

  /// Performs one GET and returns the decoded JSON body of a successful
  /// response. Any failure is attributed to `phase`.
  async fn get_json(&self, phase: Phase, url: Url) -> Result<Value, Error> {
    let response = self.client.get(url).send().await.map_err(|e| {
      let message = if e.is_timeout() {
        "Weather provider did not respond in time"
      } else {
        "Failed to reach weather provider"
      };
      // The URL carries the API key.
      let e = e.without_url();
      warn!(%phase, error = %e, "{}", message);
      Error::upstream(phase, None, message)
    })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let message = upstream_message(&body);
      warn!(%phase, status = status.as_u16(), "Provider rejected request: {}", message);
      return Err(Error::upstream(phase, Some(status.as_u16()), message));
    }

    let body = response.bytes().await.map_err(|e| {
      let e = e.without_url();
      warn!(%phase, error = %e, "Failed to read provider response");
      Error::upstream(phase, None, "Failed to read weather provider response")
    })?;

    serde_json::from_slice(&body)
      .map_err(|e| Error::MalformedResponse(format!("{} response is not valid JSON: {}", phase, e)))
  }
}

/// Extracts the provider's `message` field from an error body.
fn upstream_message(body: &str) -> String {
  serde_json::from_str::<Value>(body)
    .ok()
    .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
    .filter(|m| !m.trim().is_empty())
    .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

fn decode<T: DeserializeOwned>(phase: Phase, value: Value) -> Result<T, Error> {
  serde_json::from_value(value)
    .map_err(|e| Error::MalformedResponse(format!("unexpected {} payload: {}", phase, e)))
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
  #[instrument(skip(self))]
  async fn fetch_current(&self, city: &str, units: Units) -> Result<CurrentConditions, Error> {
    let value = self.fetch_current_raw(city, units).await?;
    let response: CurrentResponse = decode(Phase::Current, value)?;
    CurrentConditions::from_response(response)
  }

  #[instrument(skip(self))]
  async fn fetch_forecast(&self, city: &str, units: Units) -> Result<Vec<ForecastPoint>, Error> {
    let url = self.build_url(FORECAST_ENDPOINT, city, units)?;
    let value = self.get_json(Phase::Forecast, url).await?;
    let response: ForecastResponse = decode(Phase::Forecast, value)?;
    let points = ForecastPoint::from_response(response)?;
    debug!("Received {} forecast points", points.len());
    Ok(points)
  }

  async fn fetch_current_raw(&self, city: &str, units: Units) -> Result<Value, Error> {
    let url = self.build_url(CURRENT_ENDPOINT, city, units)?;
    self.get_json(Phase::Current, url).await
  }
}
