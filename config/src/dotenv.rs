// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static INIT: Once = Once::new();
const DEFAULT_FILENAME: &str = ".env";

#[derive(Debug, Default)]
pub struct Dotenv {
  vars: HashMap<String, String>,
}

impl Dotenv {
  pub fn parse(content: &str) -> Result<Self, Error> {
    let mut vars = HashMap::new();

    for (line_num, line) in content.lines().enumerate() {
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }

      let (key, value) = parse_line(trimmed)
        .map_err(|err| Error::ConfigError(format!("Error on line {}: {}", line_num + 1, err)))?;
      vars.insert(key, value);
    }

    Ok(Self { vars })
  }

  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    Self::parse(&content)
  }

  /// Exports the parsed variables. Variables already set in the process
  /// environment win over the file.
  pub fn apply(&self) {
    for (key, value) in &self.vars {
      if env::var_os(key).is_none() {
        env::set_var(key, value);
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&String> {
    self.vars.get(key)
  }
}

fn parse_line(line: &str) -> Result<(String, String), String> {
  let line = line.strip_prefix("export ").unwrap_or(line);
  let (key, value) = line
    .split_once('=')
    .ok_or_else(|| "Invalid format: missing '='".to_string())?;

  let key = key.trim();
  if key.is_empty() {
    return Err("Empty key".to_string());
  }

  let value = value.trim().trim_matches('"').trim_matches('\'');
  Ok((key.to_string(), value.to_string()))
}

/// Loads `.env` from the working directory once per process. A missing file
/// is not an error; returns whether a file was applied.
pub fn load() -> Result<bool, Error> {
  let mut result = Ok(false);
  INIT.call_once(|| {
    let path = Path::new(DEFAULT_FILENAME);
    if !path.exists() {
      debug!("No {} file found", DEFAULT_FILENAME);
      return;
    }
    result = Dotenv::from_path(path).map(|dotenv| {
      dotenv.apply();
      true
    });
  });
  result
}
