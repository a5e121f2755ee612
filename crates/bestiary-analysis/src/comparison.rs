//! Side-by-side profiles of two environments.

use std::collections::BTreeMap;

use bestiary_data::{field::Dimension, monster::Monster};
use bestiary_stats::average::{mean, mean_defined, percentage_of};

use crate::{
    group::group_by,
    view::{NoDataReason, View},
};

/// Aggregate figures for the monsters of one environment.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProfile {
    pub environment: String,
    pub count: usize,
    pub avg_cr: Option<f64>,
    pub avg_hp: Option<f64>,
    pub avg_ac: Option<f64>,
    pub pct_fly: Option<f64>,
    pub pct_swim: Option<f64>,
    pub pct_burrow: Option<f64>,
    pub pct_climb: Option<f64>,
}

impl EnvironmentProfile {
    #[must_use]
    pub fn new(environment: &str, members: &[&Monster]) -> Self {
        Self {
            environment: environment.to_owned(),
            count: members.len(),
            avg_cr: mean(members.iter().map(|m| m.challenge_rating)),
            avg_hp: mean_defined(members.iter().map(|m| m.hit_points)),
            avg_ac: mean_defined(members.iter().map(|m| m.armor_class)),
            pct_fly: percentage_of(members, |m| m.can_fly),
            pct_swim: percentage_of(members, |m| m.can_swim),
            pct_burrow: percentage_of(members, |m| m.can_burrow),
            pct_climb: percentage_of(members, |m| m.can_climb),
        }
    }

    /// Labelled values in display order, for paired bar charts.
    #[must_use]
    pub fn measures(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("avg CR", self.avg_cr),
            ("avg HP", self.avg_hp),
            ("avg AC", self.avg_ac),
            ("% fly", self.pct_fly),
            ("% swim", self.pct_swim),
            ("% burrow", self.pct_burrow),
            ("% climb", self.pct_climb),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnvironmentComparison {
    pub left: Option<EnvironmentProfile>,
    pub right: Option<EnvironmentProfile>,
}

/// Environments by monster count descending, ties by name.
#[must_use]
pub fn ranked_environments(subset: &[&Monster]) -> Vec<(String, usize)> {
    rank(&group_by(subset, Dimension::Environment))
}

pub(crate) fn rank(groups: &BTreeMap<&str, Vec<&Monster>>) -> Vec<(String, usize)> {
    let mut ranked = groups
        .iter()
        .map(|(key, members)| ((*key).to_owned(), members.len()))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// The two most populous environments, used as the initial comparison pair.
#[must_use]
pub fn default_pair(monsters: &[Monster]) -> [Option<String>; 2] {
    let subset = monsters.iter().collect::<Vec<_>>();
    let mut ranked = ranked_environments(&subset).into_iter().map(|(env, _)| env);
    [ranked.next(), ranked.next()]
}

/// Compares two environments over the filtered subset.
///
/// An environment with no members gets a profile with `count == 0` and no
/// averages. The view has no data when neither side is chosen or neither side
/// has members.
#[must_use]
pub fn compare(
    subset: &[&Monster],
    left: Option<&str>,
    right: Option<&str>,
) -> View<EnvironmentComparison> {
    if left.is_none() && right.is_none() {
        return View::NoData(NoDataReason::NoEnvironments);
    }
    let groups = group_by(subset, Dimension::Environment);
    let profile = |env: &str| {
        let members = groups.get(env).map_or(&[][..], Vec::as_slice);
        EnvironmentProfile::new(env, members)
    };
    let comparison = EnvironmentComparison {
        left: left.map(profile),
        right: right.map(profile),
    };
    let populated = [&comparison.left, &comparison.right]
        .into_iter()
        .flatten()
        .any(|p| p.count > 0);
    if !populated {
        return View::NoData(NoDataReason::NoMonsters);
    }
    View::Data(comparison)
}

#[cfg(test)]
mod tests {
    use bestiary_data::monster::{MonsterRow, normalize};

    use super::*;

    fn monster(env: &str, cr: &str, hp: Option<&str>, fly: bool, burrow: bool) -> Monster {
        normalize(&MonsterRow {
            environment: Some(env.into()),
            cr: Some(cr.into()),
            hp: hp.map(Into::into),
            speed_fly: fly.then(|| "60".into()),
            speed_burrow: burrow.then(|| "20".into()),
            ..MonsterRow::default()
        })
        .unwrap()
    }

    fn sample() -> Vec<Monster> {
        vec![
            monster("Desert", "1", Some("10"), false, true),
            monster("Mountain", "5", Some("80"), true, false),
            monster("Desert", "3", None, true, false),
            monster("", "1", Some("4"), false, false),
            monster("Mountain", "9", Some("120"), true, false),
            monster("Coastal", "2", Some("20"), false, false),
        ]
    }

    #[test]
    fn test_profile() {
        let monsters = sample();
        let subset = monsters.iter().collect::<Vec<_>>();
        let view = compare(&subset, Some("Desert"), Some("Mountain"));
        let comparison = view.into_data().unwrap();

        let desert = comparison.left.unwrap();
        assert_eq!(desert.count, 2);
        assert_eq!(desert.avg_cr, Some(2.0));
        assert_eq!(desert.avg_hp, Some(10.0));
        assert_eq!(desert.avg_ac, None);
        assert_eq!(desert.pct_fly, Some(50.0));
        assert_eq!(desert.pct_burrow, Some(50.0));

        let mountain = comparison.right.unwrap();
        assert_eq!(mountain.count, 2);
        assert_eq!(mountain.pct_fly, Some(100.0));
        assert_eq!(mountain.pct_climb, Some(0.0));
    }

    #[test]
    fn test_absent_environment_has_empty_profile() {
        let monsters = sample();
        let subset = monsters.iter().collect::<Vec<_>>();
        let comparison = compare(&subset, Some("Coastal"), Some("Underdark"))
            .into_data()
            .unwrap();
        let underdark = comparison.right.unwrap();
        assert_eq!(underdark.count, 0);
        assert_eq!(underdark.avg_cr, None);
        assert_eq!(underdark.pct_fly, None);
    }

    #[test]
    fn test_no_data_states() {
        let monsters = sample();
        let subset = monsters.iter().collect::<Vec<_>>();
        assert_eq!(
            compare(&subset, None, None).reason(),
            Some(NoDataReason::NoEnvironments)
        );
        assert_eq!(
            compare(&subset, Some("Arctic"), None).reason(),
            Some(NoDataReason::NoMonsters)
        );
        assert_eq!(
            compare(&[], Some("Desert"), Some("Mountain")).reason(),
            Some(NoDataReason::NoMonsters)
        );
    }

    #[test]
    fn test_default_pair_is_most_populous() {
        let monsters = sample();
        assert_eq!(
            default_pair(&monsters),
            [Some("Desert".to_owned()), Some("Mountain".to_owned())]
        );
        assert_eq!(default_pair(&monsters[3..4]), [None, None]);
        assert_eq!(default_pair(&monsters[..1]), [Some("Desert".to_owned()), None]);
    }
}
