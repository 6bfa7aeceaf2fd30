//! Command execution

use std::path::Path;

use super::{config, expansions, lookup, refs, values, Commands};
use crate::config::Config;
use crate::data::WlData;

/// Load the config and open its data tree
pub fn open_data(config_file: Option<&Path>) -> anyhow::Result<WlData> {
    let config = match config_file {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(WlData::from_config(config)?)
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the config is unusable or the lookup fails.
    pub fn execute(&self, config_file: Option<&Path>) -> anyhow::Result<()> {
        if let Commands::Config = self {
            return config::show(config_file);
        }

        let mut data = open_data(config_file)?;
        match self {
            Commands::Get { object, compact } => lookup::get(&mut data, object, *compact),
            Commands::Export { object, index } => lookup::export(&mut data, object, *index),
            Commands::Exports {
                object,
                export_type,
            } => lookup::exports(&mut data, object, export_type),
            Commands::Find {
                base,
                prefix,
                exact,
            } => lookup::find(&data, base, prefix, *exact),
            Commands::Glob { pattern } => lookup::glob(&data, pattern),
            Commands::Table { table, row, column } => lookup::table(&mut data, table, row, column),
            Commands::Resolve { json, table } => values::resolve(&mut data, json, table.as_deref()),
            Commands::Category { parts } => values::category(&mut data, parts),
            Commands::SlotCategory {
                balance,
                slot,
                parts,
            } => values::slot_category(&mut data, balance, *slot, parts),
            Commands::Expansions { detailed } => expansions::summarize(&mut data, *detailed),
            Commands::RefsTo { object } => refs::refs_to(&mut data, object),
            Commands::RefsFrom { object } => refs::refs_from(&mut data, object),
            Commands::ShortName { name } => refs::short_name(&mut data, name),
            Commands::Config => Ok(()),
        }
    }
}
