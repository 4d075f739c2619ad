use crate::paths::{ConfigError, SongbookPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

// toml_edit para escribir preservando los comentarios del usuario
use toml_edit::{DocumentMut, Item};

/// Section-oriented access to the songbook config file.
///
/// Every adapter owns one `[section]` and its struct; nobody reads the whole
/// file at once.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;

  /// Like `load_section`, but a missing file or section yields `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Loads a section (or its defaults) and writes it back, so the file on
  /// disk always lists every setting the running binary understands.
  fn sync_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: Serialize + DeserializeOwned + Default,
  {
    let value = self.load_section_with_default(section)?;
    self.save_section(section, &value)?;
    Ok(value)
  }
}

#[derive(Debug, Clone)]
pub struct TomlConfigBackend {
  paths: SongbookPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: SongbookPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &SongbookPaths {
    &self.paths
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    Ok(Some(toml::from_str(&content)?))
  }
}

/// Replaces `path` with `contents` in one rename. The temp file gets a unique
/// name in the same directory, so concurrent writers never share it.
fn replace_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
  let dir = path.parent().unwrap_or_else(|| Path::new("."));
  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents.as_bytes())?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| ConfigError::Io(e.error))?;
  Ok(())
}

fn decode_section<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let table = self
      .read_table()?
      .ok_or_else(|| ConfigError::Other(format!("config file {:?} does not exist", path)))?;

    let value = table
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      return Ok(T::default());
    };

    match table.get(section) {
      Some(value) => decode_section(section, value),
      None => Ok(T::default()),
    }
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // 1) Leer el documento actual o empezar uno vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` (serde). El resultado es una tabla sin cabecera.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 3) Reemplazar la sección; el resto del documento queda intacto.
    doc[section] = section_item;

    replace_file(&path, &doc.to_string())?;

    Ok(())
  }
}
