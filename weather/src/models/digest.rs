// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};

/// Normalized response of `GET /weather/formatted`. Field names are fixed
/// for the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDigest {
  pub city: String,
  pub country: String,
  pub temperature: i64,
  pub condition: String,
  pub wind_speed: i64,
  pub humidity: u8,
  pub date: String,
  pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
  pub date: String,
  pub temperature: i64,
  pub condition: String,
}
