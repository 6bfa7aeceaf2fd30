//! Expansion data
//!
//! Later patches extend existing part sets and part dependency rules through
//! standalone `EXPD_*` objects. Nothing indexes them, so the whole tree is
//! scanned once, on first use, and the results are kept for the life of the
//! [`WlData`].

pub mod types;

use std::collections::BTreeMap;

use crate::data::WlData;
use crate::error::{Error, Result};

pub use types::{DependencyExpansion, ExpansionPartList, PartSetContribution, PartSetExpansion};

/// Object name prefix of expansion objects
pub const EXPANSION_PREFIX: &str = "EXPD_";

/// The two tables built from expansion objects
#[derive(Debug, Default)]
pub struct ExpansionTables {
    loaded: bool,
    /// Keyed by part set
    pub parts: BTreeMap<String, PartSetExpansion>,
    /// Keyed by target part
    pub dependencies: BTreeMap<String, DependencyExpansion>,
}

impl ExpansionTables {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl WlData {
    /// Scan the data tree for expansion objects, unless that's already happened
    ///
    /// # Errors
    /// Returns [`Error::UnknownExpansion`] for expansion objects of a type we
    /// don't understand. The tables are left unloaded in that case.
    pub fn ensure_expansions_loaded(&mut self) -> Result<()> {
        if self.expansions.loaded {
            return Ok(());
        }

        let mut names: Vec<String> = self.find("/", EXPANSION_PREFIX, false).collect();
        names.sort();
        tracing::info!("Loading {} expansion objects", names.len());

        let mut tables = ExpansionTables::default();
        for name in names {
            let Some(asset) = self.get_data(&name)? else {
                continue;
            };
            let Some(export) = asset.exports().first() else {
                continue;
            };

            match export.export_type() {
                "InventoryExcludersExpansionData" => {
                    for target in types::paths(export.get("TargetParts")) {
                        tables
                            .dependencies
                            .entry(target.clone())
                            .or_insert_with(|| DependencyExpansion::new(target))
                            .merge_export(export);
                    }
                }
                "InventoryPartSetExpansionData" => {
                    let partset = export
                        .get("InventoryPartSet")
                        .and_then(crate::data::asset::object_path)
                        .unwrap_or_default()
                        .to_string();
                    tables
                        .parts
                        .entry(partset.clone())
                        .or_insert_with(|| PartSetExpansion::new(partset))
                        .add_export(&name, export)?;
                }
                // Item pools are extended at runtime; nothing here needs them
                "ItemPoolExpansionData" => {}
                other => {
                    return Err(Error::UnknownExpansion {
                        kind: other.to_string(),
                        object: name,
                    });
                }
            }
        }

        tracing::debug!(
            "Loaded {} part set expansions, {} dependency expansions",
            tables.parts.len(),
            tables.dependencies.len()
        );
        tables.loaded = true;
        self.expansions = tables;
        Ok(())
    }

    /// Part set expansions, keyed by part set
    pub fn expansion_parts(&mut self) -> Result<&BTreeMap<String, PartSetExpansion>> {
        self.ensure_expansions_loaded()?;
        Ok(&self.expansions.parts)
    }

    /// Dependency/excluder expansions, keyed by target part
    pub fn expansion_dependencies(&mut self) -> Result<&BTreeMap<String, DependencyExpansion>> {
        self.ensure_expansions_loaded()?;
        Ok(&self.expansions.dependencies)
    }
}
