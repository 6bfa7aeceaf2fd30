//! NPC movement speedups

use serde_json::Value;
use wldata::WlData;

use super::{follow, last_component};
use crate::error::{Error, Result};
use crate::tweak::AttributeTweak;

/// Engine defaults when the movement component doesn't override them
pub const DEFAULT_WALK_SPEED: f64 = 600.0;
pub const DEFAULT_SPRINT_SPEED: f64 = 900.0;

const MOVEMENT: &str = "OakCharacterMovement";

/// Speed up the character blueprint at `path`
///
/// Walk speed is multiplied by `scale` and sprint speed by `sprint_scale`
/// (`scale` when not given). Characters that slow down near their navigation
/// goal get that turned off too; `force_slowdown` turns it off even when the
/// movement component doesn't set a slowdown speed of its own.
///
/// # Errors
/// Fails if the blueprint has no `Default__<Name>_C` export, or that export
/// has no movement component.
pub fn scale_character_movement(
    data: &mut WlData,
    path: &str,
    scale: f64,
    sprint_scale: Option<f64>,
    force_slowdown: bool,
) -> Result<Vec<AttributeTweak>> {
    let default_name = format!("Default__{}_C", last_component(path));
    let object = format!("{path}.{default_name}");

    let asset = data.get_data(path)?;
    let Some(defaults) = asset.as_deref().and_then(|a| {
        a.exports()
            .iter()
            .find(|e| e.object_name().is_some_and(|n| n.eq_ignore_ascii_case(&default_name)))
    }) else {
        return Err(Error::MissingPrimaryExport {
            object: path.to_string(),
            export: default_name,
        });
    };
    let Some(movement) = asset
        .as_deref()
        .and_then(|a| follow(a, defaults.get(MOVEMENT)))
    else {
        return Err(Error::MissingMovement {
            object: path.to_string(),
        });
    };

    let speed = |attr: &str, default: f64| {
        movement
            .dig(&[attr, "BaseValue"])
            .and_then(Value::as_f64)
            .unwrap_or(default)
    };
    let walk = speed("MaxWalkSpeed", DEFAULT_WALK_SPEED) * scale;
    let sprint = speed("MaxSprintSpeed", DEFAULT_SPRINT_SPEED) * sprint_scale.unwrap_or(scale);

    let mut tweaks = vec![
        AttributeTweak::text(&object, format!("{MOVEMENT}.Object..MaxWalkSpeed"), attribute_value(walk)),
        AttributeTweak::text(&object, format!("{MOVEMENT}.Object..MaxSprintSpeed"), attribute_value(sprint)),
    ];

    if force_slowdown || movement.dig(&["NavSlowdownOptions", "SlowdownSpeed"]).is_some() {
        tweaks.push(AttributeTweak::text(
            &object,
            format!("{MOVEMENT}.Object..NavSlowdownOptions.bSlowdownNearGoal"),
            "False",
        ));
        tweaks.push(AttributeTweak::number(
            &object,
            format!("{MOVEMENT}.Object..NavSlowdownOptions.SlowdownSpeed.Value"),
            1.0,
        ));
    }

    Ok(tweaks)
}

/// A gameplay attribute struct with both values set
fn attribute_value(value: f64) -> String {
    let value = wldata::bvc::round6(value);
    format!("(Value={value},BaseValue={value})")
}
