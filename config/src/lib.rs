// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod config;
pub mod dotenv;

pub use crate::config::{Config, ProviderConfig, ServerConfig};

pub mod env {
  pub const CONFIG_PATH: &str = "WEATHERAPI_CONFIG";
  pub const BIND: &str = "WEATHERAPI_BIND";
  pub const API_KEY: &str = "OPENWEATHER_API_KEY";
  pub const BASE_URL: &str = "OPENWEATHER_BASE_URL";
}

pub const DEFAULT_CONFIG_PATH: &str = "weatherapi.toml";
