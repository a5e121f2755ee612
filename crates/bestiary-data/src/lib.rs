//! Monster data model and loading.
//!
//! This crate turns a loosely-typed monster CSV into a working set of typed
//! [`Monster`](monster::Monster) records. Every record in the working set has a
//! finite challenge rating; rows whose challenge rating cannot be parsed are
//! dropped once, at load time.
//!
//! # Overview
//!
//! 1. **Read rows** ([`loader::Bestiary::from_path`]): CSV with a header row,
//!    every column optional
//! 2. **Parse challenge ratings** ([`challenge_rating::parse_challenge_rating`]):
//!    fractions, `+` suffixes, plain numbers
//! 3. **Normalize** ([`monster::normalize`]): numeric coercion, label
//!    canonicalization, movement flags, damage type detection
//!
//! The selectable fields of a monster (grouping dimension, plotted stat,
//! defense kind) are described in [`field`].
//!
//! # Example
//!
//! ```
//! use bestiary_data::{field::Dimension, loader::Bestiary};
//!
//! let csv = "name,environment,cr,hp\nWolf,Forest,1/4,11\nWraith,,5,67\nBlob,Cave,?,1\n";
//! let bestiary = Bestiary::from_reader(csv.as_bytes()).unwrap();
//!
//! assert_eq!(bestiary.monsters().len(), 2);
//! assert_eq!(bestiary.dropped(), 1);
//! let wolf = &bestiary.monsters()[0];
//! assert_eq!(Dimension::Environment.key_of(wolf), Some("Forest"));
//! ```

use crate::monster::Monster;

pub mod challenge_rating;
pub mod damage;
pub mod field;
pub mod loader;
pub mod monster;

/// Inclusive challenge rating bounds.
///
/// Bounds are stored as entered; [`CrRange::ordered`] swaps them when
/// `min > max` so a reversed range is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrRange {
    pub min: f64,
    pub max: f64,
}

impl Default for CrRange {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl CrRange {
    /// Range used when no monster has a challenge rating.
    pub const FALLBACK: Self = Self {
        min: 0.0,
        max: 30.0,
    };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The same bounds with `min <= max`.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.min > self.max {
            Self {
                min: self.max,
                max: self.min,
            }
        } else {
            self
        }
    }

    /// Whether `cr` lies within the ordered bounds, inclusive.
    ///
    /// ```
    /// use bestiary_data::CrRange;
    ///
    /// let reversed = CrRange::new(5.0, 1.0);
    /// assert!(reversed.contains(1.0));
    /// assert!(reversed.contains(5.0));
    /// assert!(!reversed.contains(5.5));
    /// ```
    #[must_use]
    pub fn contains(self, cr: f64) -> bool {
        let Self { min, max } = self.ordered();
        (min..=max).contains(&cr)
    }

    /// Smallest range covering every monster's challenge rating.
    #[must_use]
    pub fn observed(monsters: &[Monster]) -> Option<Self> {
        let mut crs = monsters.iter().map(|m| m.challenge_rating);
        let first = crs.next()?;
        Some(crs.fold(Self::new(first, first), |range, cr| {
            Self::new(range.min.min(cr), range.max.max(cr))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_swaps_reversed_bounds() {
        let range = CrRange::new(10.0, 2.0).ordered();
        assert_eq!(range, CrRange::new(2.0, 10.0));
        assert_eq!(CrRange::new(1.0, 3.0).ordered(), CrRange::new(1.0, 3.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = CrRange::new(1.0, 2.0);
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(!range.contains(0.5));
    }

    #[test]
    fn test_observed_covers_every_monster() {
        let csv = "name,cr\nGoblin,1/4\nDragon,10\nOgre,2\n";
        let monsters = loader::Bestiary::from_reader(csv.as_bytes())
            .unwrap()
            .into_monsters();
        assert_eq!(
            CrRange::observed(&monsters),
            Some(CrRange::new(0.25, 10.0))
        );
        assert_eq!(CrRange::observed(&[]), None);
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(CrRange::default(), CrRange::new(0.0, 30.0));
    }
}
