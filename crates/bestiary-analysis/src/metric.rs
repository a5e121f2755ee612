use bestiary_data::monster::Monster;
use bestiary_stats::average::{mean, mean_defined, percentage_of};

/// Per-group value shown as bar height.
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
pub enum Metric {
    #[default]
    #[display("count")]
    #[serde(rename = "count")]
    Count,
    #[display("avgCR")]
    #[serde(rename = "avgCR")]
    AvgCr,
    #[display("avgHP")]
    #[serde(rename = "avgHP")]
    AvgHp,
    #[display("avgAC")]
    #[serde(rename = "avgAC")]
    AvgAc,
    #[display("pctFly")]
    #[serde(rename = "pctFly")]
    PctFly,
    #[display("pctSwim")]
    #[serde(rename = "pctSwim")]
    PctSwim,
}

impl Metric {
    pub const ALL: [Self; 6] = [
        Self::Count,
        Self::AvgCr,
        Self::AvgHp,
        Self::AvgAc,
        Self::PctFly,
        Self::PctSwim,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Count => "Number of monsters",
            Self::AvgCr => "Average challenge rating",
            Self::AvgHp => "Average hit points",
            Self::AvgAc => "Average armor class",
            Self::PctFly => "Percent of monsters that can fly",
            Self::PctSwim => "Percent of monsters that can swim",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Computes the metric over one group's members.
    ///
    /// Averages skip members without the field; a group where no member has
    /// it yields `None`, as does an empty group.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute(self, members: &[&Monster]) -> Option<f64> {
        if members.is_empty() {
            return None;
        }
        match self {
            Self::Count => Some(members.len() as f64),
            Self::AvgCr => mean(members.iter().map(|m| m.challenge_rating)),
            Self::AvgHp => mean_defined(members.iter().map(|m| m.hit_points)),
            Self::AvgAc => mean_defined(members.iter().map(|m| m.armor_class)),
            Self::PctFly => percentage_of(members, |m| m.can_fly),
            Self::PctSwim => percentage_of(members, |m| m.can_swim),
        }
    }

    /// Formats a value of this metric for labels and tooltips.
    ///
    /// ```
    /// use bestiary_analysis::metric::Metric;
    ///
    /// assert_eq!(Metric::Count.format_value(1234.0), "1,234");
    /// assert_eq!(Metric::PctFly.format_value(12.345), "12.3%");
    /// assert_eq!(Metric::AvgCr.format_value(3.14159), "3.14");
    /// assert_eq!(Metric::AvgHp.format_value(45.67), "45.7");
    /// ```
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Count => format_thousands(value),
            Self::PctFly | Self::PctSwim => format!("{value:.1}%"),
            Self::AvgCr => format!("{value:.2}"),
            Self::AvgHp | Self::AvgAc => format!("{value:.1}"),
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use bestiary_data::monster::{MonsterRow, normalize};

    use super::*;

    fn monster(cr: &str, hp: Option<&str>, fly: bool) -> Monster {
        normalize(&MonsterRow {
            cr: Some(cr.into()),
            hp: hp.map(Into::into),
            speed_fly: fly.then(|| "30".into()),
            ..MonsterRow::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_metric_names() {
        assert_eq!("avgCR".parse::<Metric>().unwrap(), Metric::AvgCr);
        assert_eq!("pctSwim".parse::<Metric>().unwrap(), Metric::PctSwim);
        assert_eq!("count".parse::<Metric>().unwrap(), Metric::Count);
        assert_eq!(Metric::AvgHp.to_string(), "avgHP");
        assert_eq!(
            serde_json::to_string(&Metric::AvgCr).unwrap(),
            r#""avgCR""#
        );
    }

    #[test]
    fn test_compute_metrics() {
        let a = monster("1", Some("10"), false);
        let b = monster("2", None, true);
        let c = monster("3", Some("30"), true);
        let members = [&a, &b, &c];

        assert_eq!(Metric::Count.compute(&members), Some(3.0));
        assert_eq!(Metric::AvgCr.compute(&members), Some(2.0));
        assert_eq!(Metric::AvgHp.compute(&members), Some(20.0));
        assert_eq!(Metric::AvgAc.compute(&members), None);
        let pct = Metric::PctFly.compute(&members).unwrap();
        assert!((pct - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(Metric::PctSwim.compute(&members), Some(0.0));
    }

    #[test]
    fn test_empty_group_is_none() {
        for metric in Metric::ALL {
            assert_eq!(metric.compute(&[]), None);
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
    }
}
