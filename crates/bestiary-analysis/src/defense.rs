//! Damage defense heatmap: share of each group having each damage type.

use bestiary_data::{
    damage::{DamageType, DamageTypeSet},
    field::{DefenseKind, Dimension},
    monster::Monster,
};
use bestiary_stats::average::percentage;

use crate::{
    group::group_by,
    view::{NoDataReason, View},
};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseCell {
    pub group: String,
    pub damage_type: DamageType,
    /// In `[0, 100]`.
    pub percent: f64,
    pub count: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseHeatmap {
    pub defense_kind: DefenseKind,
    pub group_dimension: Dimension,
    /// Damage types present at least once, in canonical order.
    pub active_damage_types: Vec<DamageType>,
    /// Group keys, ascending.
    pub groups: Vec<String>,
    /// Row-major: one row per group, one column per active damage type.
    pub cells: Vec<DefenseCell>,
}

impl DefenseHeatmap {
    /// The cells of one group row, in active damage type order.
    #[must_use]
    pub fn row(&self, group_index: usize) -> &[DefenseCell] {
        let width = self.active_damage_types.len();
        &self.cells[group_index * width..(group_index + 1) * width]
    }

    /// Highest percentage in the matrix, for scaling cell intensity.
    #[must_use]
    pub fn max_percent(&self) -> f64 {
        self.cells.iter().map(|c| c.percent).fold(0.0, f64::max)
    }
}

/// Computes the defense heatmap over `subset` grouped by `dimension`.
///
/// Monsters without a key for `dimension` are excluded. Damage types that no
/// remaining monster has are left out, and if none remain the view reports
/// [`NoDataReason::NoDefenses`] instead of an all-zero matrix.
#[must_use]
pub fn aggregate(
    subset: &[&Monster],
    dimension: Dimension,
    kind: DefenseKind,
) -> View<DefenseHeatmap> {
    let groups = group_by(subset, dimension);
    if groups.is_empty() {
        return View::NoData(NoDataReason::NoMonsters);
    }

    let present = groups
        .values()
        .flatten()
        .fold(DamageTypeSet::EMPTY, |acc, m| acc.union(kind.set_of(m)));
    if present.is_empty() {
        return View::NoData(NoDataReason::NoDefenses(kind));
    }
    let active_damage_types = present.iter().collect::<Vec<_>>();

    let mut cells = Vec::with_capacity(groups.len() * active_damage_types.len());
    for (&group, members) in &groups {
        let total = members.len();
        for &damage_type in &active_damage_types {
            let count = members
                .iter()
                .filter(|m| kind.set_of(m).contains(damage_type))
                .count();
            cells.push(DefenseCell {
                group: group.to_owned(),
                damage_type,
                percent: percentage(count, total).unwrap_or(0.0),
                count,
                total,
            });
        }
    }

    View::Data(DefenseHeatmap {
        defense_kind: kind,
        group_dimension: dimension,
        active_damage_types,
        groups: groups.into_keys().map(str::to_owned).collect(),
        cells,
    })
}
