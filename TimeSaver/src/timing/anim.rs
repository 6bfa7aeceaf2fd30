//! `AnimSequence` speedups

use serde_json::Value;
use wldata::data::asset::export_ref;
use wldata::WlData;

use super::{nonzero, scaled};
use crate::error::Result;
use crate::tweak::AttributeTweak;

/// Notify timings that scale with the animation
const NOTIFY_TIMINGS: [&str; 3] = ["SegmentBeginTime", "SegmentLength", "LinkValue"];

/// Speed up the animation sequence at `path`
///
/// Sets `RateScale` to `scale` and divides notify timings by it.
/// `SequenceLength` gets its own `seqlen_scale`: some sequences (vehicle
/// seats, mostly) freeze before finishing when it's scaled along with the
/// rest.
///
/// # Errors
/// Returns [`wldata::Error::MissingExport`] if there's no `AnimSequence` export.
pub fn scale_anim_sequence(
    data: &mut WlData,
    path: &str,
    scale: f64,
    seqlen_scale: f64,
) -> Result<Vec<AttributeTweak>> {
    let Some(seq) = data.exports_of_type(path, "AnimSequence")?.into_iter().next() else {
        return Err(wldata::Error::MissingExport {
            object: path.to_string(),
            export_type: "AnimSequence".to_string(),
        }
        .into());
    };

    let mut tweaks = vec![AttributeTweak::number(path, "RateScale", scale)];

    let notifies = seq.get("Notifies").and_then(Value::as_array);
    for (idx, notify) in notifies.into_iter().flatten().enumerate() {
        let prefix = format!("Notifies.Notifies[{idx}]");
        push_timings(&mut tweaks, path, &prefix, notify, scale);

        if let Some(end_link) = notify.get("EndLink")
            && links_anything(end_link)
        {
            push_timings(&mut tweaks, path, &format!("{prefix}.EndLink"), end_link, scale);
        }
    }

    if let Some(len) = seq.get_f64("SequenceLength") {
        tweaks.push(AttributeTweak::number(path, "SequenceLength", scaled(len, seqlen_scale)));
    }

    Ok(tweaks)
}

fn push_timings(tweaks: &mut Vec<AttributeTweak>, path: &str, prefix: &str, value: &Value, scale: f64) {
    for var in NOTIFY_TIMINGS {
        if let Some(v) = nonzero(value.get(var)) {
            tweaks.push(AttributeTweak::number(path, format!("{prefix}.{var}"), scaled(v, scale)));
        }
    }
}

/// Whether an `EndLink` points at a montage or sequence
fn links_anything(end_link: &Value) -> bool {
    let is_null = |key: &str| end_link.get(key).is_none_or(|v| export_ref(v) == Some(0));
    !(is_null("LinkedMontage") && is_null("LinkedSequence"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_links_anything() {
        let null = json!({"LinkedMontage": {"export": 0}, "LinkedSequence": {"export": 0}});
        assert!(!links_anything(&null));

        let montage = json!({"LinkedMontage": {"export": 3}, "LinkedSequence": {"export": 0}});
        assert!(links_anything(&montage));

        let external = json!({"LinkedMontage": {"export": 0}, "LinkedSequence": ["AS_Other", "/Game/AS_Other"]});
        assert!(links_anything(&external));
    }
}
