use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that relocates every songbook directory under one base.
pub const BASE_DIR_ENV: &str = "SONGBOOK_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct SongbookPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
}

impl SongbookPaths {
  /// Resolves the directories from `SONGBOOK_BASE_DIR`, falling back to the
  /// platform project dirs, and makes sure they exist.
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      return Self::at(env_base);
    }

    let proj_dirs = ProjectDirs::from("com", "songbook", "songbook").ok_or(ConfigError::Directories)?;
    let paths =
      Self { base_dir: proj_dirs.config_dir().to_path_buf(), config_dir: proj_dirs.config_dir().to_path_buf() };
    paths.create_dirs()?;
    Ok(paths)
  }

  /// Portable layout: everything lives below `base`.
  pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base = base.as_ref().to_path_buf();
    let paths = Self { config_dir: base.join("config"), base_dir: base };
    paths.create_dirs()?;
    Ok(paths)
  }

  fn create_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("songbook.toml")
  }
}
