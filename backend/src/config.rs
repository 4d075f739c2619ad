use serde::{Deserialize, Serialize};
use songbook_config::{ConfigBackend, ConfigError, env_override};
use std::time::Duration;

const SECTION: &str = "server";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Prefix every route is mounted under.
  pub base_path: String,
  /// Wall-clock budget for one request's service call.
  pub request_timeout_ms: u64,
  /// Default log filter; `RUST_LOG` overrides it.
  pub log_level: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      host: "0.0.0.0".to_string(),
      port: 8080,
      base_path: "/music_library/v1".to_string(),
      request_timeout_ms: 5000,
      log_level: "info".to_string(),
    }
  }
}

impl ServerConfig {
  pub fn load(backend: &impl ConfigBackend) -> Result<Self, ConfigError> {
    let cfg: Self = backend.sync_section(SECTION)?;
    cfg.with_env_overrides(env_override("SERVER_HOST"), env_override("SERVER_PORT"))
  }

  fn with_env_overrides(mut self, host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
    if let Some(host) = host {
      self.host = host;
    }
    if let Some(port) = port {
      self.port = port
        .trim()
        .parse()
        .map_err(|e| ConfigError::Other(format!("SERVER_PORT {port:?}: {e}")))?;
    }
    Ok(self)
  }

  pub fn addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_millis(self.request_timeout_ms)
  }
}
