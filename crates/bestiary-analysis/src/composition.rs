//! Monster type mix of the most populous environments.

use bestiary_data::{field::Dimension, monster::Monster};
use bestiary_stats::average::percentage;

use crate::{
    comparison::rank,
    group::group_by,
    view::{NoDataReason, View},
};

pub const TOP_ENVIRONMENTS: usize = 10;
pub const TOP_TYPES: usize = 8;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionCell {
    pub monster_type: String,
    pub environment: String,
    pub count: usize,
    /// Monsters of the listed types in this environment.
    pub total: usize,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeComposition {
    /// Most common types first.
    pub types: Vec<String>,
    /// Most populous environments first.
    pub environments: Vec<String>,
    /// Row-major: one row per type, one column per environment.
    pub cells: Vec<CompositionCell>,
}

impl TypeComposition {
    #[must_use]
    pub fn row(&self, type_index: usize) -> &[CompositionCell] {
        let width = self.environments.len();
        &self.cells[type_index * width..(type_index + 1) * width]
    }
}

/// Share of each of the top types within each of the top environments.
///
/// Monsters without an environment are ignored.
#[must_use]
pub fn composition(subset: &[&Monster]) -> View<TypeComposition> {
    let located = subset
        .iter()
        .copied()
        .filter(|m| m.environment_group.is_some())
        .collect::<Vec<_>>();
    if located.is_empty() {
        return View::NoData(NoDataReason::NoMonsters);
    }

    let top = |dimension, limit| {
        let mut ranked = rank(&group_by(&located, dimension));
        ranked.truncate(limit);
        ranked.into_iter().map(|(key, _)| key).collect::<Vec<_>>()
    };
    let environments = top(Dimension::Environment, TOP_ENVIRONMENTS);
    let types = top(Dimension::Type, TOP_TYPES);

    let by_environment = group_by(&located, Dimension::Environment);
    let mut cells = Vec::with_capacity(types.len() * environments.len());
    for monster_type in &types {
        for environment in &environments {
            let members = by_environment
                .get(environment.as_str())
                .map_or(&[][..], Vec::as_slice);
            let listed = members
                .iter()
                .filter(|m| types.contains(&m.type_group))
                .collect::<Vec<_>>();
            let count = listed
                .iter()
                .filter(|m| m.type_group == *monster_type)
                .count();
            cells.push(CompositionCell {
                monster_type: monster_type.clone(),
                environment: environment.clone(),
                count,
                total: listed.len(),
                percent: percentage(count, listed.len()),
            });
        }
    }

    View::Data(TypeComposition {
        types,
        environments,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use bestiary_data::monster::{MonsterRow, normalize};

    use super::*;

    fn monster(env: &str, ty: &str) -> Monster {
        normalize(&MonsterRow {
            environment: Some(env.into()),
            creature_type: Some(ty.into()),
            cr: Some("1".into()),
            ..MonsterRow::default()
        })
        .unwrap()
    }

    #[test]
    fn test_percentages_within_environment() {
        let monsters = [
            monster("Forest", "beast"),
            monster("Forest", "beast"),
            monster("Forest", "fey"),
            monster("Forest", "fey"),
            monster("Cave", "beast"),
            monster("", "dragon"),
        ];
        let subset = monsters.iter().collect::<Vec<_>>();
        let view = composition(&subset).into_data().unwrap();

        assert_eq!(view.environments, ["Forest", "Cave"]);
        assert_eq!(view.types, ["Beast", "Fey"]);

        let beast = view.row(0);
        assert_eq!(beast[0].percent, Some(50.0));
        assert_eq!(beast[1].percent, Some(100.0));
        let fey = view.row(1);
        assert_eq!((fey[0].count, fey[0].total), (2, 4));
        assert_eq!(fey[1].percent, Some(0.0));
    }

    #[test]
    fn test_limits_types() {
        let monsters = (0..10)
            .map(|i| monster("Forest", &format!("type{i}")))
            .collect::<Vec<_>>();
        let subset = monsters.iter().collect::<Vec<_>>();
        let view = composition(&subset).into_data().unwrap();
        assert_eq!(view.types.len(), TOP_TYPES);
        assert_eq!(view.environments.len(), 1);
        // Only the eight listed types count towards the total.
        assert!(view.cells.iter().all(|c| c.total == TOP_TYPES));
    }

    #[test]
    fn test_without_environments_is_no_data() {
        let monsters = [monster("", "beast")];
        let subset = monsters.iter().collect::<Vec<_>>();
        assert_eq!(
            composition(&subset).reason(),
            Some(NoDataReason::NoMonsters)
        );
    }
}
