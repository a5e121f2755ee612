//! Shared selection and filter state.
//!
//! [`SelectionState`] is the single source of truth read by every view. It is
//! only changed through [`SelectionState::apply`], which enforces the
//! cross-field rules:
//!
//! - changing the grouping dimension clears the selected group, because a key
//!   from one dimension means nothing in another
//! - every other change (metric, CR bounds, movement filters, stat, defense
//!   options, comparison pair) leaves the selected group alone

use bestiary_data::{
    CrRange,
    field::{DefenseKind, Dimension, StatKey},
};

use crate::metric::Metric;

/// One side of the paired environment comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonSide {
    Left,
    Right,
}

impl ComparisonSide {
    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// A discrete user interaction that mutates [`SelectionState`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    SetDimension(Dimension),
    SetMetric(Metric),
    /// Ignored when not finite.
    SetCrMin(f64),
    /// Ignored when not finite.
    SetCrMax(f64),
    SetOnlyFlying(bool),
    SetOnlySwimming(bool),
    /// Selects the group, or clears the selection if it is already selected.
    ToggleGroup(String),
    ClearGroup,
    SetStat(StatKey),
    SetDefenseKind(DefenseKind),
    SetDefenseDimension(Dimension),
    SetComparison(ComparisonSide, Option<String>),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    dimension: Dimension,
    metric: Metric,
    cr_range: CrRange,
    only_flying: bool,
    only_swimming: bool,
    selected_group: Option<String>,
    stat: StatKey,
    defense_kind: DefenseKind,
    defense_dimension: Dimension,
    comparison: [Option<String>; 2],
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(CrRange::FALLBACK)
    }
}

impl SelectionState {
    /// Default state with the given CR bounds (normally the observed data range).
    #[must_use]
    pub fn new(cr_range: CrRange) -> Self {
        Self {
            dimension: Dimension::default(),
            metric: Metric::default(),
            cr_range,
            only_flying: false,
            only_swimming: false,
            selected_group: None,
            stat: StatKey::default(),
            defense_kind: DefenseKind::default(),
            defense_dimension: Dimension::default(),
            comparison: [None, None],
        }
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// CR bounds as entered. Use [`CrRange::ordered`] or
    /// [`CrRange::contains`] before comparing.
    #[must_use]
    pub fn cr_range(&self) -> CrRange {
        self.cr_range
    }

    #[must_use]
    pub fn only_flying(&self) -> bool {
        self.only_flying
    }

    #[must_use]
    pub fn only_swimming(&self) -> bool {
        self.only_swimming
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<&str> {
        self.selected_group.as_deref()
    }

    #[must_use]
    pub fn stat(&self) -> StatKey {
        self.stat
    }

    #[must_use]
    pub fn defense_kind(&self) -> DefenseKind {
        self.defense_kind
    }

    #[must_use]
    pub fn defense_dimension(&self) -> Dimension {
        self.defense_dimension
    }

    #[must_use]
    pub fn comparison(&self, side: ComparisonSide) -> Option<&str> {
        self.comparison[side.index()].as_deref()
    }

    /// Applies an event. Returns `true` if the state changed and views need
    /// to be recomputed.
    pub fn apply(&mut self, event: SelectionEvent) -> bool {
        match event {
            SelectionEvent::SetDimension(dimension) => {
                if self.dimension == dimension {
                    return false;
                }
                self.dimension = dimension;
                self.selected_group = None;
                true
            }
            SelectionEvent::SetMetric(metric) => replace(&mut self.metric, metric),
            SelectionEvent::SetCrMin(min) if min.is_finite() => {
                replace(&mut self.cr_range.min, min)
            }
            SelectionEvent::SetCrMax(max) if max.is_finite() => {
                replace(&mut self.cr_range.max, max)
            }
            SelectionEvent::SetCrMin(_) | SelectionEvent::SetCrMax(_) => false,
            SelectionEvent::SetOnlyFlying(on) => replace(&mut self.only_flying, on),
            SelectionEvent::SetOnlySwimming(on) => replace(&mut self.only_swimming, on),
            SelectionEvent::ToggleGroup(key) => {
                if self.selected_group.as_deref() == Some(key.as_str()) {
                    self.selected_group = None;
                } else {
                    self.selected_group = Some(key);
                }
                true
            }
            SelectionEvent::ClearGroup => self.selected_group.take().is_some(),
            SelectionEvent::SetStat(stat) => replace(&mut self.stat, stat),
            SelectionEvent::SetDefenseKind(kind) => replace(&mut self.defense_kind, kind),
            SelectionEvent::SetDefenseDimension(dimension) => {
                replace(&mut self.defense_dimension, dimension)
            }
            SelectionEvent::SetComparison(side, env) => {
                replace(&mut self.comparison[side.index()], env)
            }
        }
    }
}

fn replace<T>(slot: &mut T, value: T) -> bool
where
    T: PartialEq,
{
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_group() -> SelectionState {
        let mut state = SelectionState::default();
        assert!(state.apply(SelectionEvent::ToggleGroup("Forest".into())));
        assert_eq!(state.selected_group(), Some("Forest"));
        state
    }

    #[test]
    fn test_dimension_change_resets_group() {
        for dimension in [Dimension::Type, Dimension::Size] {
            let mut state = with_group();
            assert!(state.apply(SelectionEvent::SetDimension(dimension)));
            assert_eq!(state.selected_group(), None);
        }
    }

    #[test]
    fn test_same_dimension_is_not_a_change() {
        let mut state = with_group();
        assert!(!state.apply(SelectionEvent::SetDimension(Dimension::Environment)));
        assert_eq!(state.selected_group(), Some("Forest"));
    }

    #[test]
    fn test_other_changes_keep_group() {
        let events = [
            SelectionEvent::SetMetric(Metric::AvgHp),
            SelectionEvent::SetCrMin(2.0),
            SelectionEvent::SetCrMax(4.0),
            SelectionEvent::SetOnlyFlying(true),
            SelectionEvent::SetOnlySwimming(true),
            SelectionEvent::SetStat(StatKey::Wis),
            SelectionEvent::SetDefenseKind(DefenseKind::Immune),
            SelectionEvent::SetDefenseDimension(Dimension::Size),
            SelectionEvent::SetComparison(ComparisonSide::Right, Some("Swamp".into())),
        ];
        for event in events {
            let mut state = with_group();
            assert!(state.apply(event.clone()), "{event:?} should change state");
            assert_eq!(state.selected_group(), Some("Forest"), "{event:?}");
        }
    }

    #[test]
    fn test_toggle_same_group_clears() {
        let mut state = with_group();
        assert!(state.apply(SelectionEvent::ToggleGroup("Forest".into())));
        assert_eq!(state.selected_group(), None);
        assert!(!state.apply(SelectionEvent::ClearGroup));
    }

    #[test]
    fn test_toggle_other_group_switches() {
        let mut state = with_group();
        assert!(state.apply(SelectionEvent::ToggleGroup("Cave".into())));
        assert_eq!(state.selected_group(), Some("Cave"));
    }

    #[test]
    fn test_non_finite_cr_bound_is_ignored() {
        let mut state = SelectionState::new(CrRange::new(0.0, 10.0));
        assert!(!state.apply(SelectionEvent::SetCrMin(f64::NAN)));
        assert!(!state.apply(SelectionEvent::SetCrMax(f64::INFINITY)));
        assert_eq!(state.cr_range(), CrRange::new(0.0, 10.0));
    }

    #[test]
    fn test_reversed_bounds_are_kept_as_entered() {
        let mut state = SelectionState::new(CrRange::new(0.0, 10.0));
        state.apply(SelectionEvent::SetCrMin(12.0));
        assert_eq!(state.cr_range(), CrRange::new(12.0, 10.0));
        assert_eq!(state.cr_range().ordered(), CrRange::new(10.0, 12.0));
    }
}
