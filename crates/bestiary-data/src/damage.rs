//! Canonical damage types and keyword detection in free-text defense fields.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq as _, Serializer};

/// One of the 13 canonical damage categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum DamageType {
    Acid,
    Cold,
    Fire,
    Lightning,
    Thunder,
    Necrotic,
    Radiant,
    Poison,
    Psychic,
    Force,
    Bludgeoning,
    Piercing,
    Slashing,
}

impl DamageType {
    /// All damage types in canonical order.
    pub const ALL: [Self; 13] = [
        Self::Acid,
        Self::Cold,
        Self::Fire,
        Self::Lightning,
        Self::Thunder,
        Self::Necrotic,
        Self::Radiant,
        Self::Poison,
        Self::Psychic,
        Self::Force,
        Self::Bludgeoning,
        Self::Piercing,
        Self::Slashing,
    ];

    /// Lowercase keyword searched for in defense text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Acid => "acid",
            Self::Cold => "cold",
            Self::Fire => "fire",
            Self::Lightning => "lightning",
            Self::Thunder => "thunder",
            Self::Necrotic => "necrotic",
            Self::Radiant => "radiant",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Force => "force",
            Self::Bludgeoning => "bludgeoning",
            Self::Piercing => "piercing",
            Self::Slashing => "slashing",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of damage types, iterated in canonical order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DamageTypeSet(u16);

impl DamageTypeSet {
    pub const EMPTY: Self = Self(0);

    /// Scans defense text for damage type keywords.
    ///
    /// Matching is a case-insensitive substring search, so
    /// `"bludgeoning, piercing, and slashing from nonmagical attacks"` flags
    /// all three physical types, and `"forcefield"` would flag `Force`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bestiary_data::damage::{DamageType, DamageTypeSet};
    ///
    /// let set = DamageTypeSet::detect("Cold; Fire, Nonmagical Bludgeoning");
    /// assert!(set.contains(DamageType::Fire));
    /// assert!(set.contains(DamageType::Bludgeoning));
    /// assert!(!set.contains(DamageType::Acid));
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        DamageType::ALL
            .into_iter()
            .filter(|ty| text.contains(ty.keyword()))
            .collect()
    }

    pub fn insert(&mut self, ty: DamageType) {
        self.0 |= ty.bit();
    }

    #[must_use]
    pub const fn contains(self, ty: DamageType) -> bool {
        self.0 & ty.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = DamageType> {
        DamageType::ALL
            .into_iter()
            .filter(move |ty| self.contains(*ty))
    }
}

impl FromIterator<DamageType> for DamageTypeSet {
    fn from_iter<T: IntoIterator<Item = DamageType>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for ty in iter {
            set.insert(ty);
        }
        set
    }
}

impl fmt::Debug for DamageTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for DamageTypeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for ty in self.iter() {
            seq.serialize_element(&ty)?;
        }
        seq.end()
    }
}
