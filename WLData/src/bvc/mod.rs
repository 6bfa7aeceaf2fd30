//! BVC ("base value constant") expressions
//!
//! Numeric game values are rarely plain numbers. A BVC starts from a constant
//! which may be replaced by a data-table cell (itself possibly another BVC),
//! replaced again by a gameplay attribute, adjusted by an attribute
//! initializer, and then scaled.
//!
//! ```no_run
//! use wldata::bvc::{Bvc, DataTableValue};
//! use wldata::WlData;
//!
//! let mut data = WlData::load()?;
//! let bvc = Bvc::constant(1.0)
//!     .with_data_table(DataTableValue::new("/Game/GameData/DT_Weights", "Common", "Weight"))
//!     .with_scale(2.0);
//! let weight = data.resolve_bvc(&bvc)?;
//! # Ok::<(), wldata::Error>(())
//! ```

pub mod assumptions;
mod resolver;
pub mod types;

pub use assumptions::{assumed_attribute_value, InitializerAssumption, ASSUMED_ATTRIBUTE_VALUES};
pub use types::{is_none_sentinel, Bvc, BvcOverride, DataTableValue, NONE_SENTINEL};

/// Round to 6 decimal places
#[must_use]
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
