//! Part category labels
//!
//! The game doesn't name its part slots, so labels come from inspector titles,
//! naming conventions, and a handful of fixed tables. Guesses are cached per
//! part for the life of the [`WlData`].

pub mod heuristics;
pub mod slots;

use indexmap::IndexMap;
use serde_json::Value;

use crate::bvc::is_none_sentinel;
use crate::data::asset::object_path;
use crate::data::WlData;
use crate::error::Result;

pub use heuristics::{label_from_name, label_from_title, strip_markup, NAME_RULES};
pub use slots::{tie_break, FixedSlotKind, TIE_BREAKS};

/// Export type prefix of inventory part definitions
const PART_EXPORT_PREFIX: &str = "BPInvPart_";

impl WlData {
    /// Best-guess category label for a single part
    ///
    /// The result, including "no label", is computed once per part.
    pub fn guess_part_category(&mut self, part: &str) -> Result<Option<String>> {
        if let Some(slot) = self.categories.lookup(part) {
            return Ok(slot.to_option());
        }
        let label = self.compute_part_category(part)?;
        self.categories.store(part.to_string(), label.clone());
        Ok(label)
    }

    fn compute_part_category(&mut self, part: &str) -> Result<Option<String>> {
        if is_none_sentinel(part) {
            return Ok(None);
        }
        if heuristics::is_hardcoded_barrel(part) {
            return Ok(Some(heuristics::BARREL_LABEL.to_string()));
        }

        let Some(asset) = self.get_data(part)? else {
            return Ok(None);
        };
        let Some(export) = asset
            .exports()
            .iter()
            .find(|e| e.export_type().starts_with(PART_EXPORT_PREFIX))
        else {
            return Ok(None);
        };

        if let Some(title_ref) = export.get("PartInspectionTitleOverride") {
            let Some(title_name) = title_ref.get(0).and_then(object_path) else {
                return Ok(None);
            };
            let title = self.get_data(title_name)?;
            let text = title
                .as_deref()
                .and_then(|t| t.exports().first())
                .and_then(|e| e.dig(&["Text", "string"]))
                .and_then(Value::as_str);
            if text.is_none() {
                tracing::debug!("No inspector title text in {title_name} for {part}");
            }
            return Ok(text.map(label_from_title));
        }

        Ok(label_from_name(part).map(str::to_string))
    }

    /// Category label for one part slot of a balance
    ///
    /// Wards, armor, rings, amulets and spell mods use fixed labels by `slot`.
    /// Other gear takes the most common guessed label among `parts`; a tie is
    /// only resolved through [`TIE_BREAKS`], otherwise there's no label.
    pub fn parts_category<S: AsRef<str>>(
        &mut self,
        parts: &[S],
        balance: &str,
        slot: usize,
    ) -> Result<Option<String>> {
        if let Some(kind) = FixedSlotKind::for_balance(balance) {
            return Ok(kind.label(slot).map(str::to_string));
        }

        let mut histogram: IndexMap<String, usize> = IndexMap::new();
        for part in parts {
            if let Some(label) = self.guess_part_category(part.as_ref())? {
                *histogram.entry(label).or_default() += 1;
            }
        }

        let Some(max) = histogram.values().copied().max() else {
            return Ok(None);
        };
        let mut leaders = histogram.into_iter().filter(|(_, count)| *count == max);
        let Some((label, _)) = leaders.next() else {
            return Ok(None);
        };
        if leaders.next().is_none() {
            return Ok(Some(label));
        }

        let resolved = tie_break(balance, slot);
        if resolved.is_none() {
            tracing::debug!("Unresolved category tie in {balance} slot {slot}");
        }
        Ok(resolved.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Serializer;
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};

    #[derive(Clone, Default)]
    struct Counting(Rc<Cell<usize>>);

    impl Serializer for Counting {
        fn serialize(&self, _base_path: &Path) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn write(dir: &Path, name: &str, value: &Value) {
        let path = dir.join(format!("{}.json", name.trim_start_matches('/')));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, value.to_string()).unwrap();
    }

    fn part(dir: &Path, name: &str) {
        write(dir, name, &serde_json::json!([{"export_type": "BPInvPart_Thing_C"}]));
    }

    fn setup() -> (TempDir, WlData, Rc<Cell<usize>>) {
        let dir = tempdir().unwrap();
        let counter = Counting::default();
        let calls = counter.0.clone();
        let data = WlData::with_serializer(dir.path(), counter);
        (dir, data, calls)
    }

    #[test]
    fn test_sentinel_and_barrels() {
        let (_dir, mut data, calls) = setup();
        assert_eq!(data.guess_part_category("None").unwrap(), None);
        assert_eq!(data.guess_part_category("").unwrap(), None);
        assert_eq!(
            data.guess_part_category("/Game/Gear/Part_SM_TED_Barrel_Magic_Dark").unwrap().as_deref(),
            Some("BARREL")
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_title_override() {
        let (dir, mut data, _calls) = setup();
        write(
            dir.path(),
            "/Game/Gear/Part_Ward_Frost",
            &serde_json::json!([{
                "export_type": "BPInvPart_Ward_C",
                "PartInspectionTitleOverride": [["Title", "/Game/UI/Title_Frost"]],
            }]),
        );
        write(
            dir.path(),
            "/Game/UI/Title_Frost",
            &serde_json::json!([{"export_type": "UIStatPriorityData", "Text": {"string": "[x]FROST[/x] WARD"}}]),
        );
        assert_eq!(
            data.guess_part_category("/Game/Gear/Part_Ward_Frost").unwrap().as_deref(),
            Some("WARD TYPE")
        );
    }

    #[test]
    fn test_absent_and_non_part_assets() {
        let (dir, mut data, calls) = setup();
        write(dir.path(), "/Game/Gear/Part_Mag_Thing", &serde_json::json!([{"export_type": "Other"}]));

        // No BPInvPart export, so the name isn't consulted
        assert_eq!(data.guess_part_category("/Game/Gear/Part_Mag_Thing").unwrap(), None);
        assert_eq!(data.guess_part_category("/Game/Gear/Part_Missing_Mag_").unwrap(), None);
        assert_eq!(data.guess_part_category("/Game/Gear/Part_Missing_Mag_").unwrap(), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_histogram_majority() {
        let (dir, mut data, _calls) = setup();
        for name in ["/G/Part_A_Mag_1", "/G/Part_B_Mag_2", "/G/Part_C_Sight_1"] {
            part(dir.path(), name);
        }
        let parts = ["/G/Part_A_Mag_1", "/G/Part_B_Mag_2", "/G/Part_C_Sight_1", "None"];
        assert_eq!(
            data.parts_category(&parts, "/Game/Gear/Weapons/Balance_X", 0).unwrap().as_deref(),
            Some("MAGAZINE")
        );
    }

    #[test]
    fn test_fixed_lists() {
        let (_dir, mut data, calls) = setup();
        let none: [&str; 0] = [];
        assert_eq!(
            data.parts_category(&none, "/Game/Gear/Rings/Balance/Balance_Ring", 2).unwrap().as_deref(),
            Some("MINOR")
        );
        assert_eq!(data.parts_category(&none, "/Game/Gear/Rings/Balance/Balance_Ring", 9).unwrap(), None);
        assert_eq!(calls.get(), 0);
    }
}
