// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Wire shapes of the provider's `/weather` and `/forecast` payloads.
//!
//! Every field is optional so that a missing value surfaces as a
//! `MalformedResponse` during conversion instead of an opaque decode failure.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CurrentResponse {
  pub name: Option<String>,
  pub dt: Option<i64>,
  #[serde(default)]
  pub weather: Vec<Condition>,
  pub main: Option<MainReading>,
  pub sys: Option<SysInfo>,
  pub wind: Option<Wind>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ForecastResponse {
  pub list: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ForecastEntry {
  pub dt: Option<i64>,
  pub main: Option<MainReading>,
  #[serde(default)]
  pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Condition {
  pub main: Option<String>,
  pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MainReading {
  pub temp: Option<f64>,
  pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SysInfo {
  pub country: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Wind {
  pub speed: Option<f64>,
}
