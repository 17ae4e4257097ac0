// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Shaping of provider data into a [`DailyDigest`].
//!
//! All calendar dates are taken in UTC, both for "today" and for every
//! forecast point.
use crate::{
  constants::{AS_OF_DATE_FORMAT, FORECAST_DATE_FORMAT, MAX_FORECAST_DAYS},
  models::{
    digest::{DailyDigest, DayForecast},
    weather::{CurrentConditions, ForecastPoint},
  },
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Rounds half away from zero: `13.5 -> 14`, `-0.5 -> -1`.
pub fn round_half_away(value: f64) -> i64 {
  value.round() as i64
}

fn ordinal_suffix(day: u32) -> &'static str {
  match (day % 10, day % 100) {
    (_, 11..=13) => "th",
    (1, _) => "st",
    (2, _) => "nd",
    (3, _) => "rd",
    _ => "th",
  }
}

/// Formats the "as-of" date, e.g. `16th Oct 2026`.
pub fn format_as_of(date: NaiveDate) -> String {
  format!(
    "{}{} {}",
    date.day(),
    ordinal_suffix(date.day()),
    date.format(AS_OF_DATE_FORMAT)
  )
}

/// Formats a forecast day, e.g. `07 Nov`.
pub fn format_forecast_day(date: NaiveDate) -> String {
  date.format(FORECAST_DATE_FORMAT).to_string()
}

/// Picks one point per future calendar day, in provider order.
///
/// The first point seen for a day wins, whatever its time of day. Points on
/// or before `today` are skipped and scanning stops after
/// [`MAX_FORECAST_DAYS`] days.
pub fn select_daily(points: &[ForecastPoint], today: NaiveDate) -> Vec<DayForecast> {
  let mut seen = BTreeSet::new();
  let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);

  for point in points {
    if days.len() == MAX_FORECAST_DAYS {
      break;
    }

    let date = point.at.date_naive();
    if date <= today || !seen.insert(date) {
      continue;
    }

    days.push(DayForecast {
      date: format_forecast_day(date),
      temperature: round_half_away(point.temperature),
      condition: point.condition.clone(),
    });
  }

  days
}

#[instrument(skip_all, fields(city = %current.place, points = forecast.len()))]
pub fn build_digest(
  current: &CurrentConditions,
  forecast: &[ForecastPoint],
  now: DateTime<Utc>,
) -> DailyDigest {
  let today = now.date_naive();
  let days = select_daily(forecast, today);
  debug!("Selected {} forecast days", days.len());

  DailyDigest {
    city: current.place.clone(),
    country: current.country.clone(),
    temperature: round_half_away(current.temperature),
    condition: current.condition.clone(),
    wind_speed: round_half_away(current.wind_speed),
    humidity: current.humidity,
    date: format_as_of(today),
    forecast: days,
  }
}
