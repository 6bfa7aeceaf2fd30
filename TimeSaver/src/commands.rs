//! `timesaver` subcommands

use clap::Subcommand;
use timesaver::timing::{self, CURVE_DATA_VERSION};
use timesaver::AttributeTweak;
use wldata::WlData;

#[derive(Subcommand)]
pub enum Commands {
    /// Speed up an AnimSequence
    Anim {
        path: String,

        /// Divisor for notify timings (and the new RateScale)
        #[arg(short, long)]
        scale: f64,

        /// Divisor for SequenceLength (defaults to --scale)
        #[arg(long)]
        seqlen_scale: Option<f64>,
    },

    /// Shorten a ParticleSystem's lifetimes
    Particles {
        path: String,

        #[arg(short, long)]
        scale: f64,
    },

    /// Speed up an interactive object's timelines
    Io {
        path: String,

        #[arg(short, long)]
        scale: f64,

        /// Timeline to leave alone (repeatable)
        #[arg(long)]
        skip: Vec<String>,

        /// The object has no main TimelineLength; don't mention it
        #[arg(long)]
        no_timeline_length: bool,
    },

    /// Speed up an NPC's movement
    Char {
        path: String,

        /// Walk speed multiplier
        #[arg(short, long)]
        scale: f64,

        /// Sprint speed multiplier (defaults to --scale)
        #[arg(long)]
        sprint_scale: Option<f64>,

        /// Disable slowdown near the navigation goal even if none is set
        #[arg(long)]
        force_slowdown: bool,
    },

    /// Speed up loot flying to the player
    Pickup {
        path: String,

        /// Speed multiplier
        #[arg(short, long)]
        factor: f64,
    },

    /// Shorten the mass-pickup delays
    PickupDelays {
        #[arg(short, long)]
        scale: f64,
    },

    /// Check that an object's serialization carries full curve data
    CheckVersion {
        path: String,

        #[arg(long, default_value_t = CURVE_DATA_VERSION)]
        min: u64,
    },
}

impl Commands {
    /// Run the planner and return its tweaks
    pub fn execute(&self, data: &mut WlData) -> anyhow::Result<Vec<AttributeTweak>> {
        let tweaks = match self {
            Commands::Anim {
                path,
                scale,
                seqlen_scale,
            } => timing::scale_anim_sequence(data, path, *scale, seqlen_scale.unwrap_or(*scale))?,
            Commands::Particles { path, scale } => timing::scale_particle_system(data, path, *scale)?,
            Commands::Io {
                path,
                scale,
                skip,
                no_timeline_length,
            } => {
                let skip: Vec<&str> = skip.iter().map(String::as_str).collect();
                timing::scale_interactive_object(data, path, *scale, &skip, !no_timeline_length)?
            }
            Commands::Char {
                path,
                scale,
                sprint_scale,
                force_slowdown,
            } => timing::scale_character_movement(data, path, *scale, *sprint_scale, *force_slowdown)?,
            Commands::Pickup { path, factor } => timing::scale_pickup_flyto(data, path, *factor)?,
            Commands::PickupDelays { scale } => timing::scale_mass_pickup_delays(data, *scale)?,
            Commands::CheckVersion { path, min } => {
                timing::require_data_version(data, path, *min)?;
                eprintln!("{path}: OK");
                Vec::new()
            }
        };
        Ok(tweaks)
    }
}

pub fn print_tweaks(tweaks: &[AttributeTweak], json: bool) -> anyhow::Result<()> {
    for tweak in tweaks {
        if json {
            println!("{}", serde_json::to_string(tweak)?);
        } else {
            println!("{tweak}");
        }
    }
    Ok(())
}
