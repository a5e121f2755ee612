//! Selectable record fields: grouping dimensions, numeric stats, and defense kinds.
//!
//! These enums are the recognized control values of the dashboard. Each parses
//! case-insensitively from its option name and serializes to the same name.

use crate::{damage::DamageTypeSet, monster::Monster};

/// Categorical field used to bucket monsters into groups.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    #[display("environment")]
    Environment,
    #[display("type")]
    Type,
    #[display("size")]
    Size,
}

impl Dimension {
    pub const ALL: [Self; 3] = [Self::Environment, Self::Type, Self::Size];

    /// Human readable label, e.g. for axis titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Type => "monster type",
            Self::Size => "size",
        }
    }

    /// The monster's group key for this dimension.
    ///
    /// Only the environment dimension can be absent; type and size fall back
    /// to a visible `"Unknown"` group during normalization.
    #[must_use]
    pub fn key_of(self, monster: &Monster) -> Option<&str> {
        match self {
            Self::Environment => monster.environment_group.as_deref(),
            Self::Type => Some(&monster.type_group),
            Self::Size => Some(&monster.size_group),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Numeric stat plotted against challenge rating.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    #[default]
    #[display("hp")]
    Hp,
    #[display("ac")]
    Ac,
    #[display("str")]
    Str,
    #[display("dex")]
    Dex,
    #[display("con")]
    Con,
    #[display("int")]
    Int,
    #[display("wis")]
    Wis,
    #[display("cha")]
    Cha,
}

impl StatKey {
    pub const ALL: [Self; 8] = [
        Self::Hp,
        Self::Ac,
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hp => "Hit Points",
            Self::Ac => "Armor Class",
            Self::Str => "Strength",
            Self::Dex => "Dexterity",
            Self::Con => "Constitution",
            Self::Int => "Intelligence",
            Self::Wis => "Wisdom",
            Self::Cha => "Charisma",
        }
    }

    #[must_use]
    pub fn value_of(self, monster: &Monster) -> Option<f64> {
        match self {
            Self::Hp => monster.hit_points,
            Self::Ac => monster.armor_class,
            Self::Str => monster.strength,
            Self::Dex => monster.dexterity,
            Self::Con => monster.constitution,
            Self::Int => monster.intelligence,
            Self::Wis => monster.wisdom,
            Self::Cha => monster.charisma,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Which damage defense a heatmap examines.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DefenseKind {
    #[default]
    #[display("resist")]
    Resist,
    #[display("immune")]
    Immune,
    #[display("vuln")]
    Vuln,
}

impl DefenseKind {
    pub const ALL: [Self; 3] = [Self::Resist, Self::Immune, Self::Vuln];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resist => "resistance",
            Self::Immune => "immunity",
            Self::Vuln => "vulnerability",
        }
    }

    #[must_use]
    pub fn set_of(self, monster: &Monster) -> DamageTypeSet {
        match self {
            Self::Resist => monster.resistant_to,
            Self::Immune => monster.immune_to,
            Self::Vuln => monster.vulnerable_to,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Returns the element after `current` in `all`, wrapping around.
pub(crate) fn cycle<T>(all: &[T], current: T) -> T
where
    T: Copy + PartialEq,
{
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_values() {
        assert_eq!("environment".parse::<Dimension>().unwrap(), Dimension::Environment);
        assert_eq!("size".parse::<Dimension>().unwrap(), Dimension::Size);
        assert_eq!("int".parse::<StatKey>().unwrap(), StatKey::Int);
        assert_eq!("vuln".parse::<DefenseKind>().unwrap(), DefenseKind::Vuln);
        assert!("habitat".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_display_matches_option_names() {
        assert_eq!(Dimension::Type.to_string(), "type");
        assert_eq!(StatKey::Cha.to_string(), "cha");
        assert_eq!(DefenseKind::Immune.to_string(), "immune");
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Dimension::Size.next(), Dimension::Environment);
        assert_eq!(StatKey::Hp.next(), StatKey::Ac);
        assert_eq!(DefenseKind::Vuln.next(), DefenseKind::Resist);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Dimension::Environment).unwrap(), r#""environment""#);
        assert_eq!(serde_json::to_string(&StatKey::Str).unwrap(), r#""str""#);
    }
}
