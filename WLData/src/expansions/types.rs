//! Expansion table entries

use std::collections::BTreeSet;

use serde_json::Value;

use crate::bvc::Bvc;
use crate::data::asset::object_path;
use crate::data::Export;
use crate::error::Result;

/// Extra dependencies and excluders attached to one part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyExpansion {
    pub target: String,
    pub dependencies: BTreeSet<String>,
    pub excluders: BTreeSet<String>,
}

impl DependencyExpansion {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Merge the `Dependencies` and `Excluders` of an excluder-expansion export
    pub fn merge_export(&mut self, export: &Export) {
        self.dependencies.extend(paths(export.get("Dependencies")));
        self.excluders.extend(paths(export.get("Excluders")));
    }
}

/// A weighted list of parts for one part type
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionPartList {
    pub part_type: String,
    pub parts: Vec<(String, Bvc)>,
}

/// The part lists one expansion object adds to a part set
#[derive(Debug, Clone, PartialEq)]
pub struct PartSetContribution {
    pub expansion: String,
    pub lists: Vec<ExpansionPartList>,
}

/// Everything expansions add to one part set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartSetExpansion {
    pub partset: String,
    pub contributions: Vec<PartSetContribution>,
}

impl PartSetExpansion {
    #[must_use]
    pub fn new(partset: impl Into<String>) -> Self {
        Self {
            partset: partset.into(),
            contributions: Vec::new(),
        }
    }

    /// Add the `ActorPartLists` of a part-set expansion export
    pub fn add_export(&mut self, expansion: &str, export: &Export) -> Result<()> {
        let mut lists = Vec::new();
        for list in export
            .get("ActorPartLists")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let part_type = list
                .get("PartTypeEnum")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let mut parts = Vec::new();
            for part in list.get("Parts").and_then(Value::as_array).into_iter().flatten() {
                let Some(name) = part.get("PartData").and_then(object_path) else {
                    continue;
                };
                let weight = match part.get("Weight") {
                    Some(w) => Bvc::from_data_struct(w, None)?,
                    None => Bvc::constant(1.0),
                };
                parts.push((name.to_string(), weight));
            }
            lists.push(ExpansionPartList { part_type, parts });
        }

        self.contributions.push(PartSetContribution {
            expansion: expansion.to_string(),
            lists,
        });
        Ok(())
    }

    /// Every part any contribution adds, in load order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.contributions
            .iter()
            .flat_map(|c| &c.lists)
            .flat_map(|l| &l.parts)
            .map(|(name, _)| name.as_str())
    }
}

/// Object paths out of an array of object references
pub(crate) fn paths(value: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(object_path)
        .map(str::to_string)
}
