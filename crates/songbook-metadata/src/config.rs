use serde::{Deserialize, Serialize};
use songbook_config::{ConfigBackend, ConfigError, env_override};
use std::time::Duration;

const SECTION: &str = "metadata";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MetadataConfig {
  /// Root of the provider API; `/info` is appended. `API_BASE_URL` wins over the file.
  pub base_url: String,
  /// Upper bound for one lookup, connect included.
  pub timeout_secs: u64,
}

impl Default for MetadataConfig {
  fn default() -> Self {
    MetadataConfig { base_url: "http://localhost:8081".to_string(), timeout_secs: 5 }
  }
}

impl MetadataConfig {
  pub fn load(backend: &impl ConfigBackend) -> Result<Self, ConfigError> {
    let cfg: Self = backend.sync_section(SECTION)?;
    Ok(cfg.with_env_overrides(env_override("API_BASE_URL")))
  }

  fn with_env_overrides(mut self, base_url: Option<String>) -> Self {
    if let Some(url) = base_url {
      self.base_url = url;
    }
    self
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}
