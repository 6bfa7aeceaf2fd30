//! Label rules for single parts
//!
//! Category labels aren't stored in the game data. The in-game inspector
//! titles are a decent guide when a part has one; otherwise we fall back to
//! naming conventions.


use regex::Regex;

/// Parts that report as barrel mods but are full barrels
pub const BARREL_SUFFIXES: &[&str] = &[
    "/Part_SM_TED_Barrel_Magic_Lightning",
    "/Part_SM_TED_Barrel_Magic_Cryo",
    "/Part_SM_TED_Barrel_Magic_Dark",
    "/Part_SM_TED_Barrel_Magic_Fire",
    "/Part_SM_TED_Barrel_Magic_Poison",
];

pub const BARREL_LABEL: &str = "BARREL";

/// How a rule tests a lower-cased part name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Contains(&'static str),
    EndsWith(&'static str),
}

impl NameMatch {
    fn matches(self, name: &str) -> bool {
        match self {
            Self::Contains(s) => name.contains(s),
            Self::EndsWith(s) => name.ends_with(s),
        }
    }
}

/// A label and the name patterns that select it
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    pub label: &'static str,
    pub patterns: &'static [NameMatch],
}

use NameMatch::{Contains, EndsWith};

/// Name rules in priority order; the first match wins
///
/// The rarity suffixes could catch unrelated parts, which is why material
/// comes first.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        label: "MATERIAL",
        patterns: &[Contains("material"), Contains("_mat_"), EndsWith("_mat")],
    },
    NameRule {
        label: "CAPS",
        patterns: &[Contains("slidecap")],
    },
    NameRule {
        label: "UNDERBARREL TYPE",
        patterns: &[Contains("underbarrel")],
    },
    NameRule {
        label: "MAGAZINE",
        patterns: &[Contains("magazine"), Contains("_mag_")],
    },
    NameRule {
        label: "SIGHT",
        patterns: &[Contains("_sight_")],
    },
    NameRule {
        label: "BODY ACCESSORY",
        patterns: &[Contains("_trigger_")],
    },
    NameRule {
        label: "RAIL",
        patterns: &[EndsWith("/part_ar_cov_scopemount")],
    },
    NameRule {
        label: "BODY",
        patterns: &[
            EndsWith("/part_sg_jak_body"),
            EndsWith("/part_ps_mal_body"),
            EndsWith("/part_ps_vla_body"),
        ],
    },
    NameRule {
        label: "RARITY",
        patterns: &[
            EndsWith("_01_common"),
            EndsWith("_02_uncommon"),
            EndsWith("_03_rare"),
            EndsWith("_04_veryrare"),
            EndsWith("_05_legendary"),
        ],
    },
    NameRule {
        label: "PINCUSHION",
        // Both spellings exist in the data
        patterns: &[Contains("_pincushiontype_"), Contains("_pincuhiontype_")],
    },
    NameRule {
        label: "TOOTHERATOR",
        patterns: &[EndsWith("/part_sr_hyp_tootherator")],
    },
    NameRule {
        label: "FRONT SIGHT",
        patterns: &[EndsWith("_frontsight"), EndsWith("_frontsight2"), EndsWith("_fs")],
    },
    NameRule {
        label: "ELEMENTAL",
        patterns: &[EndsWith("_ele_nonelemental"), EndsWith("_ele_none")],
    },
    NameRule {
        label: "WHITE RIDER",
        patterns: &[EndsWith("/part_sm_dal_mode_whiterider")],
    },
    NameRule {
        label: "GREED WARDEN",
        patterns: &[EndsWith("/part_m_blunt_shieldbash")],
    },
    NameRule {
        label: "PETTY TANTRUM",
        patterns: &[EndsWith("/part_m_blunt_hammerquake")],
    },
    NameRule {
        label: "RAGE HANDLE",
        patterns: &[EndsWith("/part_axe_blade_ragehandle")],
    },
];

/// Whether `part` is one of the hardcoded full barrels
#[must_use]
pub fn is_hardcoded_barrel(part: &str) -> bool {
    BARREL_SUFFIXES.iter().any(|s| part.ends_with(s))
}

/// Label from naming conventions alone
#[must_use]
pub fn label_from_name(part: &str) -> Option<&'static str> {
    let lower = part.to_lowercase();
    NAME_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| p.matches(&lower)))
        .map(|rule| rule.label)
}

/// Label from an inspector title, after markup is removed
#[must_use]
pub fn label_from_title(title: &str) -> String {
    let title = strip_markup(title);
    if title.starts_with("TRACKING ") {
        "TRACKING METHOD".to_string()
    } else if title.ends_with(" WARD") {
        "WARD TYPE".to_string()
    } else if title.ends_with(" MODULE") {
        "RELOAD TYPE".to_string()
    } else if title.starts_with("UNDERBARREL ") {
        "UNDERBARREL TYPE".to_string()
    } else {
        title
    }
}

lazy_static::lazy_static! {
    static ref MARKUP: Regex = Regex::new(r"\[/?.*?\]").expect("valid markup regex");
}

/// Remove `[tag]`/`[/tag]` rich-text markup
#[must_use]
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}
