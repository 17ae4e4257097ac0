// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::api::{Condition, CurrentResponse, ForecastEntry, ForecastResponse};
use chrono::{DateTime, TimeZone, Utc};
use error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
  pub place: String,
  pub country: String,
  pub temperature: f64,
  pub condition: String,
  pub wind_speed: f64,
  pub humidity: u8,
  pub observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
  pub at: DateTime<Utc>,
  pub temperature: f64,
  pub condition: String,
}

fn missing(field: &str) -> Error {
  Error::MalformedResponse(format!("missing `{}`", field))
}

fn primary_condition(conditions: &[Condition], field: &str) -> Result<String, Error> {
  conditions
    .first()
    .and_then(|c| c.main.clone())
    .ok_or_else(|| missing(field))
}

fn timestamp(secs: i64, field: &str) -> Result<DateTime<Utc>, Error> {
  Utc
    .timestamp_opt(secs, 0)
    .single()
    .ok_or_else(|| Error::MalformedResponse(format!("invalid timestamp in `{}`", field)))
}

impl CurrentConditions {
  pub(crate) fn from_response(response: CurrentResponse) -> Result<Self, Error> {
    let main = response.main.as_ref().ok_or_else(|| missing("main"))?;
    let observed_at = response.dt.map(|dt| timestamp(dt, "dt")).transpose()?;

    Ok(Self {
      temperature: main.temp.ok_or_else(|| missing("main.temp"))?,
      humidity: main.humidity.ok_or_else(|| missing("main.humidity"))?,
      condition: primary_condition(&response.weather, "weather[0].main")?,
      wind_speed: response
        .wind
        .and_then(|w| w.speed)
        .ok_or_else(|| missing("wind.speed"))?,
      country: response
        .sys
        .and_then(|s| s.country)
        .ok_or_else(|| missing("sys.country"))?,
      place: response.name.ok_or_else(|| missing("name"))?,
      observed_at,
    })
  }
}

impl ForecastPoint {
  fn from_entry(index: usize, entry: ForecastEntry) -> Result<Self, Error> {
    let field = |name: &str| format!("list[{}].{}", index, name);

    let dt = entry.dt.ok_or_else(|| missing(&field("dt")))?;
    let temperature = entry
      .main
      .and_then(|m| m.temp)
      .ok_or_else(|| missing(&field("main.temp")))?;
    let condition = primary_condition(&entry.weather, &field("weather[0].main"))?;

    Ok(Self {
      at: timestamp(dt, &field("dt"))?,
      temperature,
      condition,
    })
  }

  /// Converts the provider's `list`, keeping its order.
  pub(crate) fn from_response(response: ForecastResponse) -> Result<Vec<Self>, Error> {
    response
      .list
      .ok_or_else(|| missing("list"))?
      .into_iter()
      .enumerate()
      .map(|(index, entry)| Self::from_entry(index, entry))
      .collect()
  }
}
