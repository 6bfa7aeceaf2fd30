//! CLI commands for reading objects and searching the namespace

use crate::data::WlData;

fn print_json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

pub fn get(data: &mut WlData, object: &str, compact: bool) -> anyhow::Result<()> {
    match data.get_data(object)? {
        Some(asset) => print_json(&*asset, compact),
        None => anyhow::bail!("No serialization available for {object}"),
    }
}

pub fn export(data: &mut WlData, object: &str, index: usize) -> anyhow::Result<()> {
    match data.export_by_index(object, index)? {
        Some(export) => print_json(&export, false),
        None => anyhow::bail!("No export {index} in {object}"),
    }
}

pub fn exports(data: &mut WlData, object: &str, export_type: &str) -> anyhow::Result<()> {
    let found = data.exports_of_type(object, export_type)?;
    if found.is_empty() {
        eprintln!("No {export_type} exports in {object}");
        return Ok(());
    }
    print_json(&found, false)
}

pub fn find(data: &WlData, base: &str, prefix: &str, exact: bool) -> anyhow::Result<()> {
    let mut count = 0;
    for name in data.find(base, prefix, exact) {
        println!("{name}");
        count += 1;
    }
    eprintln!("{count} object(s)");
    Ok(())
}

pub fn glob(data: &WlData, pattern: &str) -> anyhow::Result<()> {
    let mut count = 0;
    for name in data.glob(pattern)? {
        println!("{name}");
        count += 1;
    }
    eprintln!("{count} object(s)");
    Ok(())
}

pub fn table(data: &mut WlData, table: &str, row: &str, column: &str) -> anyhow::Result<()> {
    match data.datatable_lookup(table, row, column)? {
        Some(cell) => print_json(&cell, false),
        None => anyhow::bail!("No cell {row}/{column} in {table}"),
    }
}
