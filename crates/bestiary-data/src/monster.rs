//! Monster records and normalization of raw CSV rows.
//!
//! A [`MonsterRow`] is one CSV row as loosely-typed text. [`normalize`] turns
//! it into a typed [`Monster`], or rejects it when the challenge rating cannot
//! be parsed. Every other field degrades gracefully:
//!
//! | Source field | Missing / unparseable becomes |
//! |---|---|
//! | `environment` / `env_list` | `None` (excluded from environment groupings) |
//! | `type`, `size` | `"Unknown"` (a visible group) |
//! | `hp`, `ac`, ability scores | `None` (excluded from averages) |
//! | `speed_*` | `0` (cannot move that way) |
//! | `damage_*` | empty set |

use crate::{
    challenge_rating::{parse_challenge_rating, parse_finite},
    damage::DamageTypeSet,
};

/// Group label used when `type` or `size` is blank.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Raw CSV row. Every column is optional and unrecognized columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct MonsterRow {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
    pub size: Option<String>,
    pub environment: Option<String>,
    pub env_list: Option<String>,
    pub cr: Option<String>,
    pub hp: Option<String>,
    pub ac: Option<String>,
    #[serde(rename = "str")]
    pub strength: Option<String>,
    #[serde(rename = "dex")]
    pub dexterity: Option<String>,
    #[serde(rename = "con")]
    pub constitution: Option<String>,
    #[serde(rename = "int")]
    pub intelligence: Option<String>,
    #[serde(rename = "wis")]
    pub wisdom: Option<String>,
    #[serde(rename = "cha")]
    pub charisma: Option<String>,
    pub speed_walk: Option<String>,
    pub speed_fly: Option<String>,
    pub speed_swim: Option<String>,
    pub speed_burrow: Option<String>,
    pub speed_climb: Option<String>,
    pub damage_resistances: Option<String>,
    pub damage_immunities: Option<String>,
    pub damage_vulnerabilities: Option<String>,
}

/// A normalized monster. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Monster {
    pub name: String,
    /// Always finite.
    pub challenge_rating: f64,
    pub hit_points: Option<f64>,
    pub armor_class: Option<f64>,
    pub strength: Option<f64>,
    pub dexterity: Option<f64>,
    pub constitution: Option<f64>,
    pub intelligence: Option<f64>,
    pub wisdom: Option<f64>,
    pub charisma: Option<f64>,
    /// First listed environment, canonicalized. `None` when not listed.
    pub environment_group: Option<String>,
    pub size_group: String,
    pub type_group: String,
    pub can_fly: bool,
    pub can_swim: bool,
    pub can_burrow: bool,
    pub can_climb: bool,
    pub resistant_to: DamageTypeSet,
    pub immune_to: DamageTypeSet,
    pub vulnerable_to: DamageTypeSet,
}

/// Normalizes a raw row into a [`Monster`].
///
/// Returns `None` when the challenge rating is missing or unparseable; such
/// rows never enter the working set.
#[must_use]
pub fn normalize(row: &MonsterRow) -> Option<Monster> {
    let challenge_rating = parse_challenge_rating(row.cr.as_deref())?;

    let environment_group = non_blank(row.environment.as_deref())
        .or_else(|| non_blank(row.env_list.as_deref()))
        .and_then(first_listed)
        .map(canonicalize_label);

    Some(Monster {
        name: row.name.as_deref().map(str::trim).unwrap_or_default().to_owned(),
        challenge_rating,
        hit_points: parse_number(row.hp.as_deref()),
        armor_class: parse_number(row.ac.as_deref()),
        strength: parse_number(row.strength.as_deref()),
        dexterity: parse_number(row.dexterity.as_deref()),
        constitution: parse_number(row.constitution.as_deref()),
        intelligence: parse_number(row.intelligence.as_deref()),
        wisdom: parse_number(row.wisdom.as_deref()),
        charisma: parse_number(row.charisma.as_deref()),
        environment_group,
        size_group: label_or_unknown(row.size.as_deref()),
        type_group: label_or_unknown(row.creature_type.as_deref()),
        can_fly: has_speed(row.speed_fly.as_deref()),
        can_swim: has_speed(row.speed_swim.as_deref()),
        can_burrow: has_speed(row.speed_burrow.as_deref()),
        can_climb: has_speed(row.speed_climb.as_deref()),
        resistant_to: detect_defenses(row.damage_resistances.as_deref()),
        immune_to: detect_defenses(row.damage_immunities.as_deref()),
        vulnerable_to: detect_defenses(row.damage_vulnerabilities.as_deref()),
    })
}

/// Uppercases the first character and lowercases the rest.
///
/// ```
/// use bestiary_data::monster::canonicalize_label;
///
/// assert_eq!(canonicalize_label("UNDERDARK"), "Underdark");
/// assert_eq!(canonicalize_label("forest"), "Forest");
/// ```
#[must_use]
pub fn canonicalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// Text before the first comma, or `None` if it is blank.
fn first_listed(list: &str) -> Option<&str> {
    list.split(',').next().and_then(|first| non_blank(Some(first)))
}

fn label_or_unknown(field: Option<&str>) -> String {
    non_blank(field).map_or_else(|| UNKNOWN_GROUP.to_owned(), canonicalize_label)
}

fn parse_number(field: Option<&str>) -> Option<f64> {
    non_blank(field).and_then(parse_finite)
}

fn has_speed(field: Option<&str>) -> bool {
    parse_number(field).is_some_and(|speed| speed > 0.0)
}

fn detect_defenses(field: Option<&str>) -> DamageTypeSet {
    field.map_or(DamageTypeSet::EMPTY, DamageTypeSet::detect)
}
