//! Timing speedups
//!
//! Each planner reads one object through [`WlData`] and returns the attribute
//! changes that make it run faster. "Scale" here divides durations: a scale
//! of 2 halves every timing it touches. Speeds are multiplied instead.

pub mod anim;
pub mod movement;
pub mod particles;
pub mod pickups;
pub mod timeline;

use serde_json::Value;
use wldata::bvc::round6;
use wldata::data::asset::export_ref;
use wldata::{Asset, Export, WlData};

use crate::error::{Error, Result};

pub use anim::scale_anim_sequence;
pub use movement::scale_character_movement;
pub use particles::scale_particle_system;
pub use pickups::{scale_mass_pickup_delays, scale_pickup_flyto};
pub use timeline::scale_interactive_object;

/// Oldest serialization whose curve data is complete enough to tweak
pub const CURVE_DATA_VERSION: u64 = 19;

/// Fail unless `path` was serialized at `required` or newer
///
/// Objects that can't be serialized at all pass; there's nothing to tweak.
pub fn require_data_version(data: &mut WlData, path: &str, required: u64) -> Result<()> {
    let Some(asset) = data.get_data(path)? else {
        return Ok(());
    };
    let found = asset.data_version();
    if found.is_none_or(|v| v < required) {
        return Err(Error::DataVersionTooOld {
            object: path.to_string(),
            found,
            required,
        });
    }
    Ok(())
}

/// Duration after dividing by `scale`
pub(crate) fn scaled(value: f64, scale: f64) -> f64 {
    round6(value / scale)
}

/// Follow an `{"export": N}` value within `asset`
pub(crate) fn follow<'a>(asset: &'a Asset, reference: Option<&Value>) -> Option<&'a Export> {
    reference.and_then(export_ref).and_then(|idx| asset.export(idx))
}

/// Last path component of an object path
pub(crate) fn last_component(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A number, unless it's missing or zero
pub(crate) fn nonzero(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| *v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_rounds() {
        assert_eq!(scaled(1.0, 3.0), 0.333_333);
        assert_eq!(scaled(4.0, 2.0), 2.0);
    }

    #[test]
    fn test_last_component() {
        assert_eq!(last_component("/Game/Anims/AS_Open"), "AS_Open");
        assert_eq!(last_component("Bare"), "Bare");
    }

    #[test]
    fn test_follow() {
        let asset: Asset = serde_json::from_value(serde_json::json!([
            {"export_type": "A", "Next": {"export": 2}, "Nothing": {"export": 0}},
            {"export_type": "B"},
        ]))
        .unwrap();
        let first = asset.export(1).unwrap();
        assert_eq!(follow(&asset, first.get("Next")).unwrap().export_type(), "B");
        assert!(follow(&asset, first.get("Nothing")).is_none());
        assert!(follow(&asset, first.get("Missing")).is_none());
    }
}
