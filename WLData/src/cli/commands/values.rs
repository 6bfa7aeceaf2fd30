//! CLI commands for computed values

use anyhow::Context;

use crate::data::WlData;

pub fn resolve(data: &mut WlData, json: &str, table: Option<&str>) -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(json).context("BVC struct must be valid JSON")?;
    let resolved = data.resolve_bvc_struct(&value, table)?;
    println!("{resolved}");
    Ok(())
}

pub fn category(data: &mut WlData, parts: &[String]) -> anyhow::Result<()> {
    for part in parts {
        let label = data.guess_part_category(part)?;
        println!("{part}\t{}", label.as_deref().unwrap_or("-"));
    }
    Ok(())
}

pub fn slot_category(data: &mut WlData, balance: &str, slot: usize, parts: &[String]) -> anyhow::Result<()> {
    match data.parts_category(parts, balance, slot)? {
        Some(label) => println!("{label}"),
        None => eprintln!("No label for slot {slot} of {balance}"),
    }
    Ok(())
}
