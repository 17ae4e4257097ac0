// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::{OpenWeatherClient, WeatherProvider},
  config::WeatherConfig,
  digest::build_digest,
  models::digest::DailyDigest,
  units::Units,
};
use chrono::{DateTime, Utc};
use error::Error;
use serde_json::Value;
use tracing::{info, instrument};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

pub struct WeatherService {
  provider: Box<dyn WeatherProvider>,
  clock: Box<dyn Clock>,
}

impl WeatherService {
  pub fn new(config: WeatherConfig) -> Result<Self, Error> {
    let client = OpenWeatherClient::new(config)?;
    Ok(Self::with_provider(Box::new(client)))
  }

  pub fn with_provider(provider: Box<dyn WeatherProvider>) -> Self {
    Self {
      provider,
      clock: Box::new(SystemClock),
    }
  }

  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Box::new(clock);
    self
  }

  /// Fetches current conditions, then the forecast, and shapes both into a
  /// digest. A failed current-conditions call means the forecast is never
  /// requested; nothing partial is returned.
  #[instrument(skip(self))]
  pub async fn get_daily_digest(&self, city: &str, units: Units) -> Result<DailyDigest, Error> {
    let city = validate_city(city)?;
    info!("Building daily digest");

    let current = self.provider.fetch_current(city, units).await?;
    let forecast = self.provider.fetch_forecast(city, units).await?;

    Ok(build_digest(&current, &forecast, self.clock.now()))
  }

  #[instrument(skip(self))]
  pub async fn get_current_raw(&self, city: &str, units: Units) -> Result<Value, Error> {
    let city = validate_city(city)?;
    self.provider.fetch_current_raw(city, units).await
  }
}

/// Rejects a blank city. The value itself goes upstream untouched.
fn validate_city(city: &str) -> Result<&str, Error> {
  if city.trim().is_empty() {
    return Err(Error::Validation("The city field is required".into()));
  }
  Ok(city)
}
