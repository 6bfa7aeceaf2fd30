//! Lookups across and within assets
//!
//! Namespace searches ([`WlData::find`], [`WlData::glob`]) run directly against
//! the raw `.uasset`/`.umap` files, so they see every asset whether or not it
//! has been serialized yet. Everything else goes through the asset cache.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use walkdir::WalkDir;

use super::{is_raw_asset, object_name_for, Asset, Export, WlData};
use crate::error::{Error, Result};

/// Sentinel column name meaning "the row's `Value` column"
const NONE_COLUMN: &str = "None";

impl WlData {
    /// Export at a 1-based `index` in `obj_name`
    ///
    /// Index 0 is the "no reference" value and never loads anything.
    pub fn export_by_index(&mut self, obj_name: &str, index: usize) -> Result<Option<Export>> {
        if index == 0 {
            return Ok(None);
        }
        Ok(self
            .get_data(obj_name)?
            .and_then(|asset| asset.export(index).cloned()))
    }

    /// All exports of `export_type` in `obj_name`, in serialization order
    pub fn exports_of_type(&mut self, obj_name: &str, export_type: &str) -> Result<Vec<Export>> {
        Ok(self
            .get_data(obj_name)?
            .map(|asset| asset.exports_of_type(export_type).cloned().collect())
            .unwrap_or_default())
    }

    /// Search `base` for assets whose name starts with `prefix`
    ///
    /// Case-insensitive; `exact` requires the whole name to match instead.
    /// Yields object names lazily in traversal order. Unreadable directories
    /// are skipped.
    pub fn find(&self, base: &str, prefix: &str, exact: bool) -> impl Iterator<Item = String> + 'static {
        let data_dir = self.data_dir.clone();
        let root = self.base_path(base);
        let prefix = prefix.to_lowercase();

        WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && is_raw_asset(e.path()))
            .filter(move |e| {
                let stem = e
                    .path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                if exact { stem == prefix } else { stem.starts_with(&prefix) }
            })
            .filter_map(move |e| object_name_for(&data_dir, e.path()))
    }

    /// [`find`](Self::find), paired with each asset's data
    ///
    /// Assets that can't be serialized are paired with `None`.
    pub fn find_data(&mut self, base: &str, prefix: &str) -> Result<Vec<(String, Option<Arc<Asset>>)>> {
        let names: Vec<String> = self.find(base, prefix, false).collect();
        self.pair_with_data(names)
    }

    /// Shell-style search of the namespace, e.g. `/Game/Gear/**/Balance_*`
    ///
    /// Yields object names (no extension) of matching raw assets.
    pub fn glob(&self, pattern: &str) -> Result<impl Iterator<Item = String> + 'static> {
        let full = format!(
            "{}/{}",
            self.data_dir.display(),
            pattern.trim_start_matches('/')
        );
        let data_dir = self.data_dir.clone();
        let paths = glob::glob(&full)?;

        Ok(paths
            .filter_map(std::result::Result::ok)
            .filter(|p| is_raw_asset(p))
            .filter_map(move |p| object_name_for(&data_dir, &p)))
    }

    /// [`glob`](Self::glob), paired with each asset's data
    pub fn glob_data(&mut self, pattern: &str) -> Result<Vec<(String, Option<Arc<Asset>>)>> {
        let names: Vec<String> = self.glob(pattern)?.collect();
        self.pair_with_data(names)
    }

    pub(crate) fn pair_with_data(&mut self, names: Vec<String>) -> Result<Vec<(String, Option<Arc<Asset>>)>> {
        names
            .into_iter()
            .map(|name| {
                let data = self.get_data(&name)?;
                Ok((name, data))
            })
            .collect()
    }

    /// Read one cell of a data table
    ///
    /// A `column` of `"None"` falls back to the row's `Value` column.
    ///
    /// # Errors
    /// Returns [`Error::MissingExport`] if `table` has no `DataTable` export.
    pub fn datatable_lookup(&mut self, table: &str, row: &str, column: &str) -> Result<Option<Value>> {
        let asset = self.get_data(table)?;
        let Some(export) = asset
            .as_deref()
            .and_then(|a| a.exports_of_type("DataTable").next())
        else {
            return Err(Error::MissingExport {
                object: table.to_string(),
                export_type: "DataTable".to_string(),
            });
        };

        let Some(row_data) = export.get(row) else {
            return Ok(None);
        };
        if let Some(cell) = row_data.get(column) {
            return Ok(Some(cell.clone()));
        }
        if column == NONE_COLUMN {
            return Ok(row_data.get("Value").cloned());
        }
        Ok(None)
    }

    /// Path of a raw asset file for `obj_name`, if one exists
    #[must_use]
    pub fn raw_asset_path(&self, obj_name: &str) -> Option<PathBuf> {
        let base = self.base_path(obj_name);
        super::ASSET_EXTENSIONS
            .iter()
            .map(|ext| super::with_extension(&base, ext))
            .find(|p| p.exists())
    }
}
