//! Persisted configuration for `WLData`
//!
//! The config lives at `<config_dir>/wldata/wldata.toml`. The first time it's
//! requested a sample file full of placeholders is written and loading fails,
//! so the user knows where to fill things in:
//!
//! ```toml
//! [filesystem]
//! data_dir = "CHANGEME"
//! serializer_path = "CHANGEME"
//!
//! [database]
//! dbfile = "CHANGEME"
//! ```
//!
//! `data_dir` is an extracted data tree whose paths match object names exactly.
//! `serializer_path` points at the binary used to serialize `.uasset`/`.umap`
//! files to JSON. `dbfile` is the SQLite reference database, only needed for
//! reference lookups.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder value written to fresh config files
pub const PLACEHOLDER: &str = "CHANGEME";

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// `[filesystem]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemConfig {
    #[serde(default = "placeholder")]
    pub data_dir: String,
    #[serde(default = "placeholder")]
    pub serializer_path: String,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            data_dir: placeholder(),
            serializer_path: placeholder(),
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "placeholder")]
    pub dbfile: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dbfile: placeholder(),
        }
    }
}

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Where this config was loaded from
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// Build a config in memory, without touching disk
    #[must_use]
    pub fn new(data_dir: impl Into<String>, serializer_path: impl Into<String>) -> Self {
        Self {
            filesystem: FilesystemConfig {
                data_dir: data_dir.into(),
                serializer_path: serializer_path.into(),
            },
            database: DatabaseConfig::default(),
            path: PathBuf::new(),
        }
    }

    /// Set the reference database location
    #[must_use]
    pub fn with_dbfile(mut self, dbfile: impl Into<String>) -> Self {
        self.database.dbfile = dbfile.into();
        self
    }

    /// Default config file path for this platform
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("wldata").join("wldata.toml"))
            .ok_or(Error::ConfigDirNotFound)
    }

    /// Load the config from its default location
    ///
    /// # Errors
    /// Returns [`Error::ConfigCreated`] if no config existed yet, and
    /// [`Error::ConfigIncomplete`] if the filesystem section isn't populated.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load the config from `path`, writing a sample one if it's missing
    ///
    /// # Errors
    /// Returns [`Error::ConfigCreated`] if no config existed yet, and
    /// [`Error::ConfigIncomplete`] if the filesystem section isn't populated.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            Self::write_sample(path)?;
            tracing::info!("Created sample config file {}", path.display());
            return Err(Error::ConfigCreated {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.path = path.to_path_buf();
        config.require_filesystem()?;
        Ok(config)
    }

    fn write_sample(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&Config::default())?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Path this config was loaded from (empty for in-memory configs)
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fail unless the `[filesystem]` section has been filled in
    pub fn require_filesystem(&self) -> Result<()> {
        let fs = &self.filesystem;
        if is_placeholder(&fs.data_dir) || is_placeholder(&fs.serializer_path) {
            return Err(self.incomplete("filesystem"));
        }
        Ok(())
    }

    /// Fail unless the `[database]` section has been filled in
    pub fn require_database(&self) -> Result<()> {
        if is_placeholder(&self.database.dbfile) {
            return Err(self.incomplete("database"));
        }
        Ok(())
    }

    fn incomplete(&self, section: &str) -> Error {
        Error::ConfigIncomplete {
            section: section.to_string(),
            path: self.path.clone(),
        }
    }

    /// Root of the extracted data tree
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.filesystem.data_dir))
    }

    /// Serializer executable
    #[must_use]
    pub fn serializer_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.filesystem.serializer_path))
    }

    /// Reference database file
    #[must_use]
    pub fn dbfile(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.database.dbfile))
    }
}

fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || value == PLACEHOLDER
}

/// Expand a leading `~` to the user's home directory
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_writes_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("wldata.toml");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigCreated { .. }));
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[filesystem]"));
        assert!(content.contains("[database]"));
        assert!(content.contains(PLACEHOLDER));

        // Still placeholders on the second attempt
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigIncomplete { ref section, .. } if section == "filesystem"));
    }

    #[test]
    fn test_populated_filesystem_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wldata.toml");
        fs::write(
            &path,
            "[filesystem]\ndata_dir = \"/data/wl\"\nserializer_path = \"/usr/bin/ueserialize\"\n\n[database]\ndbfile = \"CHANGEME\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/data/wl"));
        assert_eq!(config.serializer_path(), PathBuf::from("/usr/bin/ueserialize"));
        assert_eq!(config.path(), path.as_path());
        assert!(config.require_database().is_err());
    }

    #[test]
    fn test_missing_database_section_defaults_to_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wldata.toml");
        fs::write(&path, "[filesystem]\ndata_dir = \"/d\"\nserializer_path = \"/s\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database.dbfile, PLACEHOLDER);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/abs/path"), "/abs/path");
        assert_eq!(expand_tilde("rel/~/path"), "rel/~/path");
    }
}
