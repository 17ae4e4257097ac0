// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod client;
pub mod config;
pub mod digest;
pub mod models;
pub mod service;
pub mod units;

pub use client::{OpenWeatherClient, WeatherProvider};
pub use crate::config::WeatherConfig;
pub use models::digest::{DailyDigest, DayForecast};
pub use models::weather::{CurrentConditions, ForecastPoint};
pub use service::{Clock, FixedClock, SystemClock, WeatherService};
pub use units::Units;

pub mod constants {
  pub(crate) const CURRENT_ENDPOINT: &str = "weather";
  pub(crate) const FORECAST_ENDPOINT: &str = "forecast";
  pub(crate) const USER_AGENT: &str = concat!("weatherapi/", env!("CARGO_PKG_VERSION"));
  pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";
  pub const MAX_FORECAST_DAYS: usize = 3;
  pub const FORECAST_DATE_FORMAT: &str = "%d %b";
  pub const AS_OF_DATE_FORMAT: &str = "%b %Y";
}
