//! Interactive object speedups
//!
//! Doors, switches and other machines animate through timeline components
//! hanging off their blueprint class. Each timeline has a length and a set of
//! curve tracks whose key times are what actually drive the motion.

use std::collections::HashSet;

use serde_json::Value;
use wldata::data::asset::export_ref;
use wldata::{Asset, Export, WlData};

use super::{follow, last_component, nonzero, require_data_version, scaled, CURVE_DATA_VERSION};
use crate::error::{Error, Result};
use crate::tweak::AttributeTweak;

/// Timeline track arrays, and the attribute each track keeps its curve in
const TRACKS: [(&str, &str); 3] = [
    ("EventTracks", "CurveKeys"),
    ("FloatTracks", "CurveFloat"),
    ("VectorTracks", "CurveVector"),
];

const CURVE_VARS: [&str; 2] = ["FloatCurve", "FloatCurves"];

/// Export attribute naming the object an export reference points at
const EXPORT_DST_NAME_KEY: &str = "_jwp_export_dst_name";

/// Speed up every timeline of the interactive object at `path`
///
/// Timelines named in `skip` are left alone. Tweaks target
/// `<path>.<Name>_C`, the blueprint's generated class. Pass `expect_length`
/// as false for objects known to have no main `TimelineLength`, to quiet the
/// notice about it.
///
/// # Errors
/// Fails if the object was serialized before [`CURVE_DATA_VERSION`], or if
/// it has no `<Name>_C` export. Objects that can't be serialized at all only
/// log a warning.
pub fn scale_interactive_object(
    data: &mut WlData,
    path: &str,
    scale: f64,
    skip: &[&str],
    expect_length: bool,
) -> Result<Vec<AttributeTweak>> {
    let Some(asset) = data.get_data(path)? else {
        tracing::warn!("Could not be serialized: {path}");
        return Ok(Vec::new());
    };
    require_data_version(data, path, CURVE_DATA_VERSION)?;

    let class_name = format!("{}_C", last_component(path));
    let Some(primary) = asset
        .exports()
        .iter()
        .find(|e| e.object_name() == Some(class_name.as_str()))
    else {
        return Err(Error::MissingPrimaryExport {
            object: path.to_string(),
            export: class_name,
        });
    };

    let mut planner = Planner {
        asset: &asset,
        object: format!("{path}.{class_name}"),
        scale,
        skip: skip.iter().copied().collect(),
        tweaks: Vec::new(),
        did_length: false,
        did_curve: false,
    };
    planner.timelines(primary);

    if let Some(notice) = missing_timings(planner.did_length, planner.did_curve, expect_length) {
        tracing::info!("{notice} for {path}");
    }
    Ok(planner.tweaks)
}

/// What's worth pointing out about the timings an object turned up
fn missing_timings(did_length: bool, did_curve: bool, expect_length: bool) -> Option<&'static str> {
    match (did_length, did_curve) {
        (false, false) => Some("No timing parameters found"),
        (false, true) if expect_length => Some("No main TimelineLength found"),
        (true, false) => Some("No curve timings found"),
        _ => None,
    }
}

struct Planner<'a> {
    asset: &'a Asset,
    object: String,
    scale: f64,
    skip: HashSet<&'a str>,
    tweaks: Vec<AttributeTweak>,
    did_length: bool,
    did_curve: bool,
}

impl Planner<'_> {
    fn push(&mut self, attribute: String, value: f64) {
        self.tweaks
            .push(AttributeTweak::number(&self.object, attribute, scaled(value, self.scale)));
    }

    fn timelines(&mut self, primary: &Export) {
        let asset = self.asset;
        let timelines = primary.get("Timelines").and_then(Value::as_array);

        for (idx, timeline_ref) in timelines.into_iter().flatten().enumerate() {
            let name = timeline_ref
                .get(EXPORT_DST_NAME_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default();
            if self.skip.contains(name) {
                tracing::debug!("Skipping timeline {idx} ({name})");
                continue;
            }
            let Some(timeline) = follow(asset, Some(timeline_ref)) else {
                continue;
            };
            tracing::debug!("Processing timeline {idx} ({name})");
            self.timeline(timeline, &format!("Timelines.Timelines[{idx}].Object.."));
        }
    }

    fn timeline(&mut self, timeline: &Export, prefix: &str) {
        if let Some(len) = nonzero(timeline.get("TimelineLength")) {
            self.did_length = true;
            self.push(format!("{prefix}TimelineLength"), len);
        }

        let asset = self.asset;
        for (track_name, curve_var) in TRACKS {
            let tracks = timeline.get(track_name).and_then(Value::as_array);
            for (track_idx, track) in tracks.into_iter().flatten().enumerate() {
                let curve_ref = track.get(curve_var);
                if curve_ref.and_then(export_ref).is_none_or(|i| i == 0) {
                    continue;
                }
                let Some(curve) = follow(asset, curve_ref) else {
                    continue;
                };
                let track_prefix =
                    format!("{prefix}{track_name}.{track_name}[{track_idx}].{curve_var}.Object..");
                self.curve(curve, &track_prefix);
            }
        }
    }

    fn curve(&mut self, curve: &Export, prefix: &str) {
        for inner in CURVE_VARS {
            let keys = curve.dig(&[inner, "Keys"]).and_then(Value::as_array);
            for (key_idx, key) in keys.into_iter().flatten().enumerate() {
                if let Some(time) = nonzero(key.get("time")) {
                    self.did_curve = true;
                    self.push(format!("{prefix}{inner}.Keys.Keys[{key_idx}].Time"), time);
                }
            }
        }
    }
}
