//! Values we can't compute from data and have to assume
//!
//! Some attributes depend on live game state (party composition, owned DLC,
//! player count). Each one we know about has a fixed assumption here; anything
//! not listed is resolved from data or rejected.

/// Attribute values assumed instead of resolved
///
/// Class weights are the base weight for a class nobody in the party is
/// playing. The DLC4 licence assumes the DLC is owned (it would be 0 otherwise).
pub const ASSUMED_ATTRIBUTE_VALUES: &[(&str, f64)] = &[
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Barb", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_GunMage", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Heavy", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Knight", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Light", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Medium", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Necro", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Ranger", 0.25),
    ("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Rogue", 0.25),
    ("/Game/PatchDLC/Indigo4/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Shaman", 0.25),
    ("/Game/PatchDLC/Indigo4/GameData/Attributes/PlayerClass/Att_Licensed_Shaman", 1.0),
];

/// Assumed value for `attribute`, if it's one we don't resolve
#[must_use]
pub fn assumed_attribute_value(attribute: &str) -> Option<f64> {
    ASSUMED_ATTRIBUTE_VALUES
        .iter()
        .find(|(name, _)| *name == attribute)
        .map(|(_, value)| *value)
}

/// Attribute initializers we know how to treat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerAssumption {
    /// Scales with player count and game mode; assumed single-player normal
    /// mode, where the factor is 1
    SinglePlayerNormalMode,
    /// Companion-dependent stat weight; left unchanged
    PetClassStatWeight,
}

impl InitializerAssumption {
    pub const ALL: [Self; 2] = [Self::SinglePlayerNormalMode, Self::PetClassStatWeight];

    /// Object path of the initializer this assumption covers
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SinglePlayerNormalMode => {
                "/Game/GameData/Balance/WeightingPlayerCount/Enemy_MajorUpgrade_PerPlayer"
            }
            Self::PetClassStatWeight => {
                "/Game/GameData/Loot/CharacterWeighting/Init_CharacterWeight_Armor_PetClasses_StatWeight"
            }
        }
    }

    /// Look up the assumption for an initializer path
    #[must_use]
    pub fn for_initializer(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.path() == path)
    }

    /// Apply the assumption to the value resolved so far
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::SinglePlayerNormalMode => {
                tracing::warn!("Assuming 1-player normal mode while processing Enemy_MajorUpgrade_PerPlayer");
            }
            // Shows up on nearly every armor balance
            Self::PetClassStatWeight => {
                tracing::debug!("Leaving Init_CharacterWeight_Armor_PetClasses_StatWeight unchanged");
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assumed_attributes() {
        assert_eq!(
            assumed_attribute_value("/Game/GameData/Loot/CharacterWeighting/Att_CharacterWeight_ArmorUsers_Necro"),
            Some(0.25)
        );
        assert_eq!(
            assumed_attribute_value("/Game/PatchDLC/Indigo4/GameData/Attributes/PlayerClass/Att_Licensed_Shaman"),
            Some(1.0)
        );
        assert_eq!(assumed_attribute_value("/Game/Att_Whatever"), None);
    }

    #[test]
    fn test_initializers_leave_value_alone() {
        for assumption in InitializerAssumption::ALL {
            assert_eq!(InitializerAssumption::for_initializer(assumption.path()), Some(assumption));
            assert_eq!(assumption.apply(4.5), 4.5);
        }
        assert_eq!(InitializerAssumption::for_initializer("/Game/Init_Unknown"), None);
    }
}
