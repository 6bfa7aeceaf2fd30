//! Subcommand definitions

pub mod config;
pub mod execute;
pub mod expansions;
pub mod lookup;
pub mod refs;
pub mod values;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print an object's serialized JSON
    Get {
        /// Object name (e.g. /Game/GameData/GameplayGlobals)
        object: String,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Print one export of an object by 1-based index
    Export {
        object: String,
        index: usize,
    },

    /// Print every export of a given type
    Exports {
        object: String,
        export_type: String,
    },

    /// Find objects under a path by name prefix (case-insensitive)
    Find {
        /// Path to search under (e.g. /Game/Gear)
        base: String,

        /// Object name prefix
        prefix: String,

        /// Match the whole name rather than a prefix
        #[arg(short = 'x', long)]
        exact: bool,
    },

    /// Find objects by shell glob (e.g. "/Game/Gear/**/Balance_*")
    Glob {
        pattern: String,
    },

    /// Look up a data table cell
    Table {
        table: String,
        row: String,

        /// Column name ("None" reads the row's Value column)
        #[arg(default_value = "None")]
        column: String,
    },

    /// Resolve a BVC struct given as JSON
    Resolve {
        /// e.g. '{"BaseValueConstant": 1, "BaseValueScale": 2}'
        json: String,

        /// Data table the struct lives in
        #[arg(long)]
        table: Option<String>,
    },

    /// Guess the category label of parts
    Category {
        #[arg(required = true)]
        parts: Vec<String>,
    },

    /// Choose the category label for one part slot of a balance
    SlotCategory {
        balance: String,
        slot: usize,
        parts: Vec<String>,
    },

    /// Scan expansion objects and summarize them
    Expansions {
        /// List every part and dependency
        #[arg(short, long)]
        detailed: bool,
    },

    /// List objects that reference an object
    RefsTo {
        object: String,
    },

    /// List objects an object references
    RefsFrom {
        object: String,
    },

    /// List objects by their last path component
    ShortName {
        name: String,
    },

    /// Show the config file location and check it
    Config,
}
