//! # TimeSaver
//!
//! Plans timing speedups for Wonderlands: shorter animations, faster doors
//! and machines, quicker particle effects, brisker NPCs and loot pickups.
//!
//! Each planner reads the relevant object through [`wldata::WlData`] and
//! returns a list of [`AttributeTweak`]s. Writing those out as a mod is left
//! to the caller.
//!
//! ```no_run
//! use timesaver::timing::scale_anim_sequence;
//!
//! let mut data = wldata::WlData::load()?;
//! for tweak in scale_anim_sequence(&mut data, "/Game/Anims/AS_OpenChest", 2.0, 2.0)? {
//!     println!("{tweak}");
//! }
//! # Ok::<(), timesaver::Error>(())
//! ```

pub use wldata;

pub mod error;
pub mod timing;
pub mod tweak;

pub use error::{Error, Result};
pub use tweak::{AttributeTweak, TweakValue};
