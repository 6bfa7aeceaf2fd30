//! CLI command for the expansion scan

use std::time::Instant;

use crate::cli::progress::{print_done, simple_spinner, LOOKING_GLASS};
use crate::data::WlData;

pub fn summarize(data: &mut WlData, detailed: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let pb = simple_spinner(&format!("{LOOKING_GLASS}Scanning for expansion objects..."));
    let loaded = data.ensure_expansions_loaded();
    pb.finish_and_clear();
    loaded?;
    print_done(started.elapsed());

    let parts = data.expansion_parts()?;
    println!("Part set expansions: {}", parts.len());
    for (partset, expansion) in parts {
        println!("  {partset} ({} contributions)", expansion.contributions.len());
        if detailed {
            for contribution in &expansion.contributions {
                println!("    {}", contribution.expansion);
                for list in &contribution.lists {
                    println!("      {}", list.part_type);
                    for (part, _) in &list.parts {
                        println!("        {part}");
                    }
                }
            }
        }
    }

    let deps = data.expansion_dependencies()?;
    println!("Dependency expansions: {}", deps.len());
    for (target, expansion) in deps {
        println!(
            "  {target} ({} dependencies, {} excluders)",
            expansion.dependencies.len(),
            expansion.excluders.len()
        );
        if detailed {
            for dep in &expansion.dependencies {
                println!("    + {dep}");
            }
            for excl in &expansion.excluders {
                println!("    - {excl}");
            }
        }
    }

    Ok(())
}
