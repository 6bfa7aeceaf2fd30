//! Asset cache and export graph navigation
//!
//! [`WlData`] is the entry point to the extracted game data. It serializes raw
//! assets to JSON on demand, caches the results for the life of the process,
//! and offers lookups into the exports of each asset.
//!
//! # Usage
//!
//! ```no_run
//! use wldata::WlData;
//!
//! let mut data = WlData::load()?;
//! if let Some(asset) = data.get_data("/Game/GameData/GameplayGlobals")? {
//!     println!("{} exports", asset.len());
//! }
//! for name in data.find("/Game/Gear", "Balance_", false) {
//!     println!("{name}");
//! }
//! # Ok::<(), wldata::Error>(())
//! ```

pub mod asset;
pub mod cache;
pub mod navigator;
pub mod serializer;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::expansions::ExpansionTables;
use crate::refs::ReferenceStore;

pub use asset::{Asset, Export, DATA_VERSION};
pub use cache::{Memo, MemoStats, Slot};
pub use serializer::{ProcessSerializer, Serializer};

/// Raw asset extensions the serializer understands
pub const ASSET_EXTENSIONS: [&str; 2] = ["uasset", "umap"];

/// Extension of serialized assets
pub const JSON_EXTENSION: &str = "json";

/// Access to an extracted data tree
pub struct WlData {
    data_dir: PathBuf,
    serializer: Box<dyn Serializer>,
    config: Option<Config>,
    assets: Memo<String, Arc<Asset>>,
    pub(crate) categories: Memo<String, String>,
    pub(crate) expansions: ExpansionTables,
    pub(crate) references: Option<Box<dyn ReferenceStore>>,
}

impl WlData {
    /// Load the user's config and open its data tree
    ///
    /// # Errors
    /// Fails if the config was just created or isn't filled in.
    pub fn load() -> Result<Self> {
        Self::from_config(Config::load()?)
    }

    /// Open the data tree described by `config`
    ///
    /// # Errors
    /// Fails if the config's filesystem section isn't filled in.
    pub fn from_config(config: Config) -> Result<Self> {
        config.require_filesystem()?;
        let serializer = ProcessSerializer::new(config.serializer_path());
        let mut data = Self::with_serializer(config.data_dir(), serializer);
        data.config = Some(config);
        Ok(data)
    }

    /// Open `data_dir` with a custom serializer
    pub fn with_serializer<P, S>(data_dir: P, serializer: S) -> Self
    where
        P: Into<PathBuf>,
        S: Serializer + 'static,
    {
        Self {
            data_dir: data_dir.into(),
            serializer: Box::new(serializer),
            config: None,
            assets: Memo::new(),
            categories: Memo::new(),
            expansions: ExpansionTables::default(),
            references: None,
        }
    }

    /// Use an already-open reference store instead of the configured database
    #[must_use]
    pub fn with_reference_store<R: ReferenceStore + 'static>(mut self, store: R) -> Self {
        self.references = Some(Box::new(store));
        self
    }

    /// Root of the data tree
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Config this instance was built from, if any
    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Filesystem path of `path_name` inside the data tree, for reading
    /// files that aren't serialized assets
    #[must_use]
    pub fn raw_file_path(&self, path_name: &str) -> PathBuf {
        self.base_path(path_name)
    }

    /// Asset cache statistics
    #[must_use]
    pub fn cache_stats(&self) -> MemoStats {
        self.assets.stats()
    }

    /// Get the serialized form of `obj_name`
    ///
    /// Serializes on demand if no JSON exists yet, and re-serializes once if
    /// the existing JSON predates [`DATA_VERSION`] and the raw asset is around
    /// to regenerate it from. Results (including "nothing could be produced")
    /// are cached, so repeated requests never hit the disk or the serializer.
    ///
    /// # Errors
    /// Serializer failures and unreadable JSON are fatal; nothing is cached
    /// for `obj_name` in that case.
    pub fn get_data(&mut self, obj_name: &str) -> Result<Option<Arc<Asset>>> {
        if let Some(slot) = self.assets.lookup(obj_name) {
            return Ok(slot.to_option());
        }

        let loaded = self.load_asset(obj_name)?.map(Arc::new);
        self.assets.store(obj_name.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn load_asset(&self, obj_name: &str) -> Result<Option<Asset>> {
        let base = self.base_path(obj_name);
        let json_file = with_extension(&base, JSON_EXTENSION);

        if !json_file.exists() {
            self.serializer.serialize(&base)?;
        }
        if !json_file.exists() {
            tracing::debug!("No serialization available for {obj_name}");
            return Ok(None);
        }

        let mut asset = Asset::load(&json_file)?;

        // Pre-serialized archives ship only the JSON; nothing to regenerate from
        if asset.is_stale() && has_raw_asset(&base) {
            tracing::info!(
                "Re-serializing {obj_name} (version {:?} < {DATA_VERSION})",
                asset.data_version()
            );
            self.serializer.serialize(&base)?;
            asset = Asset::load(&json_file)?;
            if asset.is_stale() {
                return Err(Error::StaleSerialization {
                    object: obj_name.to_string(),
                    found: asset.data_version(),
                    required: DATA_VERSION,
                });
            }
        }

        Ok(Some(asset))
    }

    pub(crate) fn base_path(&self, obj_name: &str) -> PathBuf {
        self.data_dir.join(obj_name.trim_start_matches('/'))
    }
}

/// `base` with `.ext` appended (object names may contain dots of their own)
fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

fn has_raw_asset(base: &Path) -> bool {
    ASSET_EXTENSIONS
        .iter()
        .any(|ext| with_extension(base, ext).exists())
}

/// Whether `path` has one of the raw asset extensions
pub(crate) fn is_raw_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ASSET_EXTENSIONS.contains(&e))
}

/// Object name for a file inside `data_dir`, without its extension
pub(crate) fn object_name_for(data_dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(data_dir).ok()?.with_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(format!("/{}", parts.join("/")))
}
