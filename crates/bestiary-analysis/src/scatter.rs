//! Stat versus challenge rating: points, correlation, and trend line.

use bestiary_data::{field::StatKey, monster::Monster};
use bestiary_stats::{
    correlation::{self, Regression},
    descriptive::DescriptiveStats,
};

use crate::view::{NoDataReason, View};

/// A numeric monster field usable as a scatter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    ChallengeRating,
    Stat(StatKey),
}

impl NumericField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ChallengeRating => "Challenge Rating",
            Self::Stat(stat) => stat.label(),
        }
    }

    #[must_use]
    pub fn value_of(self, monster: &Monster) -> Option<f64> {
        match self {
            Self::ChallengeRating => Some(monster.challenge_rating),
            Self::Stat(stat) => stat.value_of(monster),
        }
    }
}

/// `(x, y)` pairs of monsters where both fields are defined.
fn pairs<'a>(
    subset: &'a [&Monster],
    x: NumericField,
    y: NumericField,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    subset
        .iter()
        .filter_map(move |m| Some((x.value_of(m)?, y.value_of(m)?)))
}

/// Pearson correlation of `x` and `y` over the subset.
///
/// `None` when fewer than two monsters define both fields or either axis has
/// no variance.
#[must_use]
pub fn pearson(subset: &[&Monster], x: NumericField, y: NumericField) -> Option<f64> {
    correlation::pearson(pairs(subset, x, y))
}

/// Least squares fit of `y` on `x` over the same pairs as [`pearson`].
#[must_use]
pub fn linear_regression(subset: &[&Monster], x: NumericField, y: NumericField) -> Regression {
    correlation::linear_regression(pairs(subset, x, y))
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterView {
    pub stat: StatKey,
    pub points: Vec<ScatterPoint>,
    pub correlation: Option<f64>,
    pub regression: Regression,
    /// Summary of the plotted stat values.
    pub y_stats: DescriptiveStats,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ScatterView {
    /// Trend line endpoints across the x bounds, if the fit is valid.
    #[must_use]
    pub fn trend_line(&self) -> Option<[(f64, f64); 2]> {
        let [lo, hi] = self.x_bounds;
        Some([
            (lo, self.regression.predict(lo)?),
            (hi, self.regression.predict(hi)?),
        ])
    }

    /// Correlation formatted to two decimals, or `n/a`.
    #[must_use]
    pub fn correlation_label(&self) -> String {
        self.correlation
            .map_or_else(|| "n/a".to_owned(), |r| format!("{r:.2}"))
    }
}

/// Builds the scatter view of `stat` against challenge rating.
#[must_use]
pub fn scatter(subset: &[&Monster], stat: StatKey) -> View<ScatterView> {
    if subset.is_empty() {
        return View::NoData(NoDataReason::NoMonsters);
    }
    let x = NumericField::ChallengeRating;
    let y = NumericField::Stat(stat);

    let points = subset
        .iter()
        .filter_map(|m| {
            Some(ScatterPoint {
                x: x.value_of(m)?,
                y: y.value_of(m)?,
                label: m.name.clone(),
            })
        })
        .collect::<Vec<_>>();
    let Some(y_stats) = DescriptiveStats::new(points.iter().map(|p| p.y)) else {
        return View::NoData(NoDataReason::NoPoints);
    };
    let x_bounds = points
        .iter()
        .fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], p| {
            [lo.min(p.x), hi.max(p.x)]
        });

    View::Data(ScatterView {
        stat,
        correlation: pearson(subset, x, y),
        regression: linear_regression(subset, x, y),
        y_bounds: [y_stats.min, y_stats.max],
        y_stats,
        x_bounds,
        points,
    })
}

#[cfg(test)]
mod tests {
    use bestiary_data::monster::{MonsterRow, normalize};

    use super::*;

    fn monster(name: &str, cr: &str, hp: Option<&str>) -> Monster {
        normalize(&MonsterRow {
            name: Some(name.into()),
            cr: Some(cr.into()),
            hp: hp.map(Into::into),
            ..MonsterRow::default()
        })
        .unwrap()
    }

    const X: NumericField = NumericField::ChallengeRating;
    const HP: NumericField = NumericField::Stat(StatKey::Hp);

    #[test]
    fn test_perfectly_linear() {
        let monsters = [
            monster("a", "0", Some("0")),
            monster("b", "1", Some("2")),
            monster("c", "2", Some("4")),
        ];
        let subset = monsters.iter().collect::<Vec<_>>();
        let r = pearson(&subset, X, HP).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let fit = linear_regression(&subset, X, HP);
        assert!(fit.valid);
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_constant_y_has_no_correlation() {
        let monsters = [
            monster("a", "1", Some("7")),
            monster("b", "2", Some("7")),
            monster("c", "3", Some("7")),
        ];
        let subset = monsters.iter().collect::<Vec<_>>();
        assert_eq!(pearson(&subset, X, HP), None);
        let view = scatter(&subset, StatKey::Hp).into_data().unwrap();
        assert_eq!(view.correlation_label(), "n/a");
        assert!(view.regression.valid);
    }

    #[test]
    fn test_same_cr_is_degenerate() {
        let monsters = [monster("a", "1", Some("7")), monster("b", "1", Some("9"))];
        let subset = monsters.iter().collect::<Vec<_>>();
        assert_eq!(pearson(&subset, X, HP), None);
        assert_eq!(linear_regression(&subset, X, HP), Regression::INVALID);
        let view = scatter(&subset, StatKey::Hp).into_data().unwrap();
        assert!(view.trend_line().is_none());
    }

    #[test]
    fn test_missing_stats_are_skipped() {
        let monsters = [
            monster("a", "0", Some("1")),
            monster("b", "5", None),
            monster("c", "2", Some("5")),
        ];
        let subset = monsters.iter().collect::<Vec<_>>();
        let view = scatter(&subset, StatKey::Hp).into_data().unwrap();
        assert_eq!(view.points.len(), 2);
        assert_eq!(view.x_bounds, [0.0, 2.0]);
        assert_eq!(view.y_bounds, [1.0, 5.0]);
        assert_eq!(view.y_stats.count, 2);
        assert_eq!(view.trend_line(), Some([(0.0, 1.0), (2.0, 5.0)]));
    }

    #[test]
    fn test_no_data_states() {
        assert_eq!(
            scatter(&[], StatKey::Ac).reason(),
            Some(NoDataReason::NoMonsters)
        );
        let monsters = [monster("a", "1", Some("3"))];
        let subset = monsters.iter().collect::<Vec<_>>();
        assert_eq!(
            scatter(&subset, StatKey::Ac).reason(),
            Some(NoDataReason::NoPoints)
        );
        let view = scatter(&subset, StatKey::Hp).into_data().unwrap();
        assert_eq!(view.correlation, None);
        assert!(!view.regression.valid);
    }
}
