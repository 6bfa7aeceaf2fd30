//! CLI command for inspecting the config file

use std::path::Path;

use console::style;

use crate::config::Config;

pub fn show(config_file: Option<&Path>) -> anyhow::Result<()> {
    let path = match config_file {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()?,
    };
    println!("Config file: {}", path.display());

    let config = Config::load_from(&path)?;
    println!("  data_dir:        {}", config.data_dir().display());
    println!("  serializer_path: {}", config.serializer_path().display());

    match config.require_database() {
        Ok(()) => println!("  dbfile:          {}", config.dbfile().display()),
        Err(_) => println!("  dbfile:          {}", style("not configured").dim()),
    }

    if !config.data_dir().is_dir() {
        println!("{}", style("data_dir does not exist").yellow());
    }
    if !config.serializer_path().is_file() {
        println!("{}", style("serializer_path does not exist").yellow());
    }
    Ok(())
}
