//! Category labels for whole part slots of a balance

/// Gear whose slot labels are fixed instead of guessed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSlotKind {
    Wards,
    Armor,
    Rings,
    Amulets,
    SpellMods,
}

impl FixedSlotKind {
    /// Pick the kind from a balance path
    #[must_use]
    pub fn for_balance(balance: &str) -> Option<Self> {
        if balance.contains("/Shield/") || balance.contains("/Shields/") || balance.contains("/Wards") {
            Some(Self::Wards)
        } else if balance.contains("/Pauldrons/") {
            Some(Self::Armor)
        } else if balance.contains("/Rings/") {
            Some(Self::Rings)
        } else if balance.contains("/Amulets/") {
            Some(Self::Amulets)
        } else if balance.contains("/SpellMods/") {
            Some(Self::SpellMods)
        } else {
            None
        }
    }

    /// Labels by slot index
    #[must_use]
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Wards => &["BODY", "RARITY", "UNIQUE", "AUGMENT", "ELEMENT", "MATERIAL"],
            Self::Armor => &[
                "WEIGHT",
                "CLASS",
                "SECONDARY BODY",
                "SECONDARY CLASS",
                "CLASS STAT",
                "SECONDARY CLASS STAT",
                "UNIQUE",
                "COMBO TYPE",
                "COMBO SKILL",
                "PLAYER STAT",
                "RARITY",
            ],
            Self::Rings => &["RARITY", "MAJOR", "MINOR", "UNIQUE"],
            Self::Amulets => &["UNIQUE", "CLASS", "ELEMENT", "EFFECT", "RARITY"],
            Self::SpellMods => &[
                "CAST TYPE",
                "DELIVERY",
                "MOD",
                "UNIQUE",
                "ENHANCEMENT",
                "ELEMENT",
                "RARITY",
                "MATERIAL",
            ],
        }
    }

    #[must_use]
    pub fn label(self, slot: usize) -> Option<&'static str> {
        self.labels().get(slot).copied()
    }
}

/// A hand-picked label for a slot whose guessed labels tie
#[derive(Debug, Clone, Copy)]
pub struct TieBreak {
    pub balance: &'static str,
    /// `None` applies to every slot of the balance
    pub slot: Option<usize>,
    pub label: &'static str,
}

pub const TIE_BREAKS: &[TieBreak] = &[
    // RAIL vs. IRON SIGHTS
    TieBreak {
        balance: "/Game/Gear/Weapons/AssaultRifles/Vladof/_Shared/_Design/_Unique/Donkey/Balance/Balance_AR_VLA_Donkey",
        slot: Some(10),
        label: "RAIL",
    },
    // HYDRA ARCANISM vs. FERIORE ARCANISM
    TieBreak {
        balance: "/Game/Gear/Weapons/SMGs/Tediore/_Shared/_Design/_Unique/FragmentRain/Balance/Balance_SM_TED_05_FragmentRain",
        slot: None,
        label: "ARCANISM",
    },
];

/// Hand-picked label for a tied slot, if there is one
#[must_use]
pub fn tie_break(balance: &str, slot: usize) -> Option<&'static str> {
    TIE_BREAKS
        .iter()
        .find(|t| t.balance == balance && t.slot.is_none_or(|s| s == slot))
        .map(|t| t.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_kinds() {
        assert_eq!(
            FixedSlotKind::for_balance("/Game/Gear/Wards/_Shared/Balance/Balance_Ward_01"),
            Some(FixedSlotKind::Wards)
        );
        assert_eq!(
            FixedSlotKind::for_balance("/Game/Gear/Pauldrons/Balance/Balance_Armor_01"),
            Some(FixedSlotKind::Armor)
        );
        assert_eq!(FixedSlotKind::for_balance("/Game/Gear/Weapons/Pistols/Balance_PS"), None);

        assert_eq!(FixedSlotKind::Rings.label(1), Some("MAJOR"));
        assert_eq!(FixedSlotKind::Armor.label(10), Some("RARITY"));
        assert_eq!(FixedSlotKind::Rings.label(4), None);
    }

    #[test]
    fn test_tie_breaks() {
        let donkey = TIE_BREAKS[0].balance;
        assert_eq!(tie_break(donkey, 10), Some("RAIL"));
        assert_eq!(tie_break(donkey, 9), None);

        let rain = TIE_BREAKS[1].balance;
        assert_eq!(tie_break(rain, 0), Some("ARCANISM"));
        assert_eq!(tie_break(rain, 7), Some("ARCANISM"));

        assert_eq!(tie_break("/Game/Gear/Other", 10), None);
    }
}
