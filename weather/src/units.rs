// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unit system understood by the provider's `units` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
  Standard,
  #[default]
  Metric,
  Imperial,
}

impl Units {
  pub fn as_str(&self) -> &'static str {
    match self {
      Units::Standard => "standard",
      Units::Metric => "metric",
      Units::Imperial => "imperial",
    }
  }
}

impl fmt::Display for Units {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Units {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "standard" => Ok(Units::Standard),
      "metric" => Ok(Units::Metric),
      "imperial" => Ok(Units::Imperial),
      other => Err(Error::Validation(format!(
        "The selected units '{}' is invalid; expected one of standard, metric, imperial",
        other
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[rstest]
  #[case("standard", Units::Standard)]
  #[case("metric", Units::Metric)]
  #[case("imperial", Units::Imperial)]
  fn parses_known_units(#[case] raw: &str, #[case] expected: Units) {
    assert_eq!(raw.parse::<Units>().unwrap(), expected);
    assert_eq!(expected.to_string(), raw);
  }

  #[rstest]
  #[case("kelvin")]
  #[case("Metric")]
  #[case("")]
  fn rejects_unknown_units(#[case] raw: &str) {
    assert!(matches!(raw.parse::<Units>(), Err(Error::Validation(_))));
  }

  #[test]
  fn defaults_to_metric() {
    assert_eq!(Units::default(), Units::Metric);
  }
}
