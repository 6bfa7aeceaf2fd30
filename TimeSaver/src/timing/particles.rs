//! `ParticleSystem` speedups

use serde_json::Value;
use wldata::data::asset::dig;
use wldata::{Asset, Export, WlData};

use super::{follow, scaled};
use crate::error::Result;
use crate::tweak::AttributeTweak;

const REQUIRED_MODULE_TIMINGS: [&str; 2] = ["EmitterDuration", "EmitterDelay"];
const LIFETIME_BOUNDS: [&str; 2] = ["MinValue", "MaxValue"];

/// Shorten every emitter lifetime and duration in the particle system at `path`
///
/// Walks emitters, then their LOD levels, then each level's modules. Logs a
/// warning if nothing in the system had timings to change.
pub fn scale_particle_system(data: &mut WlData, path: &str, scale: f64) -> Result<Vec<AttributeTweak>> {
    let mut tweaks = Vec::new();

    if let Some(asset) = data.get_data(path)?
        && let Some(system) = asset.exports_of_type("ParticleSystem").next()
    {
        let mut planner = Planner {
            asset: &asset,
            path,
            scale,
            tweaks: &mut tweaks,
        };
        planner.system(system);
    }

    if tweaks.is_empty() {
        tracing::warn!("ParticleSystem had no edits: {path}");
    }
    Ok(tweaks)
}

struct Planner<'a> {
    asset: &'a Asset,
    path: &'a str,
    scale: f64,
    tweaks: &'a mut Vec<AttributeTweak>,
}

impl Planner<'_> {
    fn push(&mut self, attribute: String, value: f64) {
        self.tweaks
            .push(AttributeTweak::number(self.path, attribute, scaled(value, self.scale)));
    }

    fn system(&mut self, system: &Export) {
        let asset = self.asset;
        for (emitter_idx, emitter_ref) in refs(system.get("Emitters")).enumerate() {
            let Some(emitter) = follow(asset, Some(emitter_ref)) else {
                continue;
            };
            for (lod_idx, lod_ref) in refs(emitter.get("LODLevels")).enumerate() {
                let Some(lod) = follow(asset, Some(lod_ref)) else {
                    continue;
                };
                let prefix = format!(
                    "Emitters.Emitters[{emitter_idx}].Object..LODLevels.LODLevels[{lod_idx}].Object.."
                );
                self.lod(lod, &prefix);
            }
        }
    }

    fn lod(&mut self, lod: &Export, prefix: &str) {
        let asset = self.asset;

        if let Some(tdm) = follow(asset, lod.get("TypeDataModule"))
            && let Some(lifetime) = tdm.dig(&["EmitterInfo", "MaxLifetime"]).and_then(Value::as_f64)
        {
            self.push(format!("{prefix}TypeDataModule.Object..EmitterInfo.MaxLifetime"), lifetime);
        }

        if let Some(required) = follow(asset, lod.get("RequiredModule")) {
            for attr in REQUIRED_MODULE_TIMINGS {
                if let Some(v) = required.get_f64(attr) {
                    self.push(format!("{prefix}RequiredModule.Object..{attr}"), v);
                }
            }
        }

        for (module_idx, module_ref) in refs(lod.get("Modules")).enumerate() {
            if let Some(module) = follow(asset, Some(module_ref))
                && let Some(lifetime) = module.get("Lifetime")
            {
                let module_prefix = format!("{prefix}Modules.Modules[{module_idx}].Object..Lifetime");
                self.lifetime(lifetime, &module_prefix);
            }
        }
    }

    fn lifetime(&mut self, lifetime: &Value, prefix: &str) {
        for attr in LIFETIME_BOUNDS {
            if let Some(v) = lifetime.get(attr).and_then(Value::as_f64) {
                self.push(format!("{prefix}.{attr}"), v);
            }
        }

        let values = dig(lifetime, &["Table", "Values"]).and_then(Value::as_array);
        for (idx, v) in values.into_iter().flatten().enumerate() {
            if let Some(v) = v.as_f64() {
                self.push(format!("{prefix}.Table.Values.Values[{idx}]"), v);
            }
        }

        if let Some(dist) = follow(self.asset, lifetime.get("Distribution"))
            && let Some(constant) = dist.get_f64("Constant")
        {
            self.push(format!("{prefix}.Distribution.Object..Constant"), constant);
        }
    }
}

fn refs(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value.and_then(Value::as_array).into_iter().flatten()
}
