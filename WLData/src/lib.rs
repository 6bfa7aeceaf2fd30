//! # WLData
//!
//! Programmatic access to serialized Wonderlands game data.
//!
//! Game assets are extracted to a directory tree whose paths match object
//! names, and converted to JSON on demand by an external serializer. This
//! crate wraps that tree:
//!
//! - **Asset cache** - serialize on demand, re-serialize stale output, and
//!   keep every result for the life of the process
//! - **Navigation** - exports by index or type, prefix and glob search,
//!   data table lookups
//! - **BVC resolution** - evaluate "base value constant" expressions through
//!   data tables, attributes and initializers
//! - **Part categories** - label part slots the way the item inspector would
//! - **Expansions** - part set and dependency expansion tables
//! - **References** - cross-references from the SQLite reference database
//!
//! ## Quick Start
//!
//! ```no_run
//! use wldata::prelude::*;
//!
//! let mut data = WlData::load()?;
//!
//! // Read one export
//! if let Some(export) = data.export_by_index("/Game/GameData/GameplayGlobals", 1)? {
//!     println!("{}", export.export_type());
//! }
//!
//! // Evaluate a serialized BVC
//! let value = data.resolve_bvc_struct(&serde_json::json!({"BaseValueConstant": 2}), None)?;
//! assert_eq!(value, 2.0);
//! # Ok::<(), wldata::Error>(())
//! ```
//!
//! The first call to [`WlData::load`] writes a sample config file and fails;
//! see [`config`] for what to fill in.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `wldata` command-line binary

pub mod bvc;
pub mod categories;
pub mod config;
pub mod data;
pub mod error;
pub mod expansions;
pub mod refs;

// Re-exports for convenience
pub use config::Config;
pub use data::{Asset, Export, WlData, DATA_VERSION};
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::bvc::{round6, Bvc, BvcOverride, DataTableValue};
    pub use crate::config::Config;
    pub use crate::data::asset::{dig, export_ref, object_path};
    pub use crate::data::{Asset, Export, ProcessSerializer, Serializer, WlData};
    pub use crate::error::{Error, Result};
    pub use crate::expansions::{DependencyExpansion, PartSetExpansion};
    pub use crate::refs::{ReferenceStore, SqliteReferences};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
