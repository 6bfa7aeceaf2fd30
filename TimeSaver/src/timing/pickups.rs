//! Item pickup speedups

use wldata::WlData;

use super::scaled;
use crate::error::{Error, Result};
use crate::tweak::AttributeTweak;

/// Fly-to speed when the settings object doesn't override it
pub const DEFAULT_LINEAR_SPEED: f64 = 1000.0;

/// Global settings holding the mass-pickup delays
pub const GAMEPLAY_GLOBALS: &str = "/Game/GameData/GameplayGlobals";

/// Mass-pickup delays, with the values the game ships with
pub const MASS_PICKUP_DELAYS: [(&str, f64); 3] = [
    ("MassPickupMaxDelay", 0.075),
    ("MassPickupMaxTotalDelay", 1.5),
    ("MassPickupMinDelay", 0.06),
];

/// Make loot fly to the player faster
///
/// Multiplies `LinearSpeed` and `LinearAcceleration` of the
/// `PickupFlyToData` at `path` by `factor`.
///
/// # Errors
/// Fails without a `PickupFlyToData` export, or if it has no
/// `LinearAcceleration`.
pub fn scale_pickup_flyto(data: &mut WlData, path: &str, factor: f64) -> Result<Vec<AttributeTweak>> {
    let Some(flyto) = data.exports_of_type(path, "PickupFlyToData")?.into_iter().next() else {
        return Err(wldata::Error::MissingExport {
            object: path.to_string(),
            export_type: "PickupFlyToData".to_string(),
        }
        .into());
    };

    let speed = flyto.get_f64("LinearSpeed").unwrap_or(DEFAULT_LINEAR_SPEED);
    let Some(accel) = flyto.get_f64("LinearAcceleration") else {
        return Err(Error::MissingAttribute {
            object: path.to_string(),
            attribute: "LinearAcceleration".to_string(),
        });
    };

    Ok(vec![
        AttributeTweak::number(path, "LinearSpeed", speed * factor),
        AttributeTweak::number(path, "LinearAcceleration", accel * factor),
    ])
}

/// Shorten the delays between picking up piles of items
///
/// Reads the current delays from [`GAMEPLAY_GLOBALS`] where it sets them,
/// falling back to the shipped values.
pub fn scale_mass_pickup_delays(data: &mut WlData, scale: f64) -> Result<Vec<AttributeTweak>> {
    let globals = data.export_by_index(GAMEPLAY_GLOBALS, 1)?;
    Ok(MASS_PICKUP_DELAYS
        .iter()
        .map(|&(attr, default)| {
            let current = globals
                .as_ref()
                .and_then(|g| g.get_f64(attr))
                .unwrap_or(default);
            AttributeTweak::number(GAMEPLAY_GLOBALS, attr, scaled(current, scale))
        })
        .collect())
}
