//! CLI commands for the reference database

use crate::data::WlData;

fn print_names(names: &[String]) {
    for name in names {
        println!("{name}");
    }
    eprintln!("{} object(s)", names.len());
}

pub fn refs_to(data: &mut WlData, object: &str) -> anyhow::Result<()> {
    print_names(&data.refs_to(object)?);
    Ok(())
}

pub fn refs_from(data: &mut WlData, object: &str) -> anyhow::Result<()> {
    print_names(&data.refs_from(object)?);
    Ok(())
}

pub fn short_name(data: &mut WlData, name: &str) -> anyhow::Result<()> {
    print_names(&data.refs_objects_by_short_name(name)?);
    Ok(())
}
