// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use axum::{
  extract::{rejection::QueryRejection, Query, State},
  http::StatusCode,
  response::{IntoResponse, Json, Response},
  routing::get,
  Router,
};
use error::Error;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use weather::{DailyDigest, Units, WeatherService};

#[derive(Clone)]
pub struct AppState {
  service: Arc<WeatherService>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
  city: Option<String>,
  units: Option<String>,
}

impl WeatherQuery {
  /// Validates the query before anything goes upstream. The city is passed
  /// on as given; trimming only decides whether it is blank.
  fn parse(&self) -> Result<(&str, Units), Error> {
    let city = self
      .city
      .as_deref()
      .filter(|c| !c.trim().is_empty())
      .ok_or_else(|| Error::Validation("The city field is required".into()))?;

    let units = match self.units.as_deref() {
      Some(raw) => raw.parse::<Units>()?,
      None => Units::default(),
    };

    Ok((city, units))
  }
}

/// Unwraps the query, turning a malformed query string into a validation
/// error so it gets the same JSON body as every other failure.
fn weather_query(
  query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<WeatherQuery, Error> {
  query
    .map(|Query(query)| query)
    .map_err(|rejection| Error::Validation(rejection.body_text()))
}

/// Error body: `{"error": ..., "message": ...}`.
pub struct ApiError(Error);

impl From<Error> for ApiError {
  fn from(err: Error) -> Self {
    Self(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
      error!(error = %self.0, "Request failed");
    } else {
      debug!(error = %self.0, status = status.as_u16(), "Request rejected");
    }

    let body = json!({
      "error": self.0.label(),
      "message": self.0.public_message(),
    });
    (status, Json(body)).into_response()
  }
}

pub fn router(service: Arc<WeatherService>) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/weather", get(current_weather))
    .route("/weather/formatted", get(formatted_weather))
    .method_not_allowed_fallback(method_not_allowed)
    .with_state(AppState { service })
}

async fn index() -> Json<Value> {
  Json(json!({
    "message": "Welcome to the Weather API",
    "status": "active",
    "version": "1.0",
  }))
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
  (
    StatusCode::METHOD_NOT_ALLOWED,
    Json(json!({ "message": "Method not available" })),
  )
}

#[instrument(skip(state))]
async fn current_weather(
  State(state): State<AppState>,
  query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
  let query = weather_query(query)?;
  let (city, units) = query.parse()?;
  let raw = state.service.get_current_raw(city, units).await?;
  Ok(Json(raw))
}

#[instrument(skip(state))]
async fn formatted_weather(
  State(state): State<AppState>,
  query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<DailyDigest>, ApiError> {
  let query = weather_query(query)?;
  let (city, units) = query.parse()?;
  let digest = state.service.get_daily_digest(city, units).await?;
  Ok(Json(digest))
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use axum::{body::Body, http::Request};
  use chrono::{DateTime, Duration, TimeZone, Utc};
  use error::Phase;
  use http_body_util::BodyExt;
  use std::sync::Mutex;
  use tower::ServiceExt;
  use weather::{CurrentConditions, FixedClock, ForecastPoint, WeatherProvider};

  #[derive(Clone, Copy)]
  enum Upstream {
    Healthy,
    CityNotFound,
    Malformed,
    Broken,
  }

  struct FakeProvider {
    upstream: Upstream,
    calls: Arc<Mutex<Vec<(String, Units)>>>,
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap()
  }

  impl FakeProvider {
    fn outcome(&self) -> Result<(), Error> {
      match self.upstream {
        Upstream::Healthy => Ok(()),
        Upstream::CityNotFound => Err(Error::upstream(Phase::Current, Some(404), "city not found")),
        Upstream::Malformed => Err(Error::MalformedResponse("missing `weather[0].main`".into())),
        Upstream::Broken => Err(Error::Internal("pool exhausted at 10.0.0.7".into())),
      }
    }

    fn record(&self, city: &str, units: Units) {
      self.calls.lock().unwrap().push((city.to_string(), units));
    }
  }

  #[async_trait]
  impl WeatherProvider for FakeProvider {
    async fn fetch_current(&self, city: &str, units: Units) -> Result<CurrentConditions, Error> {
      self.record(city, units);
      self.outcome()?;
      Ok(CurrentConditions {
        place: "London".into(),
        country: "UK".into(),
        temperature: 13.2,
        condition: "Sunny".into(),
        wind_speed: 3.4,
        humidity: 80,
        observed_at: Some(now()),
      })
    }

    async fn fetch_forecast(&self, _city: &str, _units: Units) -> Result<Vec<ForecastPoint>, Error> {
      let start = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
      Ok(
        (0..24)
          .map(|i| ForecastPoint {
            at: start + Duration::hours(3 * i),
            temperature: 10.5 + i as f64,
            condition: "Clouds".into(),
          })
          .collect(),
      )
    }

    async fn fetch_current_raw(&self, city: &str, units: Units) -> Result<Value, Error> {
      self.record(city, units);
      self.outcome()?;
      Ok(json!({ "name": "London", "cod": 200, "visibility": 10000 }))
    }
  }

  fn app(upstream: Upstream) -> (Router, Arc<Mutex<Vec<(String, Units)>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let provider = FakeProvider {
      upstream,
      calls: calls.clone(),
    };
    let service = WeatherService::with_provider(Box::new(provider)).with_clock(FixedClock(now()));
    (router(Arc::new(service)), calls)
  }

  async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
      .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
  }

  #[tokio::test]
  async fn index_reports_status() {
    let (app, _) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Weather API");
    assert_eq!(body["status"], "active");
  }

  #[tokio::test]
  async fn formatted_returns_digest() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather/formatted?city=London").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body,
      json!({
        "city": "London",
        "country": "UK",
        "temperature": 13,
        "condition": "Sunny",
        "windSpeed": 3,
        "humidity": 80,
        "date": "16th Oct 2026",
        "forecast": [
          { "date": "17 Oct", "temperature": 16, "condition": "Clouds" },
          { "date": "18 Oct", "temperature": 24, "condition": "Clouds" },
          { "date": "19 Oct", "temperature": 32, "condition": "Clouds" }
        ]
      })
    );
    assert_eq!(*calls.lock().unwrap(), vec![("London".to_string(), Units::Metric)]);
  }

  #[tokio::test]
  async fn units_are_forwarded() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, _) = send(app, "GET", "/weather/formatted?city=New%20York&units=imperial").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*calls.lock().unwrap(), vec![("New York".to_string(), Units::Imperial)]);
  }

  #[tokio::test]
  async fn missing_city_is_rejected_before_upstream() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather/formatted").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(body["message"], "The city field is required");
    assert!(calls.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn unknown_units_are_rejected() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather?city=London&units=kelvin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("kelvin"));
    assert!(calls.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn upstream_status_is_mirrored() {
    let (app, _) = app(Upstream::CityNotFound);
    let (status, body) = send(app, "GET", "/weather/formatted?city=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
      body,
      json!({ "error": "Weather data not found", "message": "city not found" })
    );
  }

  #[tokio::test]
  async fn malformed_upstream_is_bad_gateway() {
    let (app, _) = app(Upstream::Malformed);
    let (status, body) = send(app, "GET", "/weather/formatted?city=London").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Malformed upstream response");
  }

  #[tokio::test]
  async fn internal_errors_are_masked() {
    let (app, _) = app(Upstream::Broken);
    let (status, body) = send(app, "GET", "/weather?city=London").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(!body["message"].as_str().unwrap().contains("10.0.0.7"));
  }

  #[tokio::test]
  async fn raw_weather_is_passed_through() {
    let (app, _) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather?city=London&units=standard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "London", "cod": 200, "visibility": 10000 }));
  }

  #[tokio::test]
  async fn writes_are_not_allowed() {
    let (app, _) = app(Upstream::Healthy);
    let (status, body) = send(app, "POST", "/weather?city=London").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "message": "Method not available" }));
  }

  #[tokio::test]
  async fn repeated_city_gets_json_error() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather/formatted?city=London&city=Paris").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(body["message"].as_str().unwrap().contains("city"));
    assert!(calls.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn city_is_forwarded_untrimmed() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, _) = send(app, "GET", "/weather?city=%20London%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*calls.lock().unwrap(), vec![(" London ".to_string(), Units::Metric)]);
  }

  #[tokio::test]
  async fn blank_city_is_rejected() {
    let (app, calls) = app(Upstream::Healthy);
    let (status, body) = send(app, "GET", "/weather?city=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The city field is required");
    assert!(calls.lock().unwrap().is_empty());
  }
}
