use bestiary_data::field::DefenseKind;

/// Output of a view computation: either data to render or an explicit
/// "no data" state the renderer must show instead of an empty chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum View<T> {
    Data(T),
    NoData(NoDataReason),
}

impl<T> View<T> {
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::NoData(_) => None,
        }
    }

    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::NoData(_) => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<NoDataReason> {
        match self {
            Self::Data(_) => None,
            Self::NoData(reason) => Some(*reason),
        }
    }
}

/// Why a view has nothing to show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, serde::Serialize,
)]
#[serde(tag = "reason", content = "defenseKind", rename_all = "camelCase")]
pub enum NoDataReason {
    /// Filters and selection left no monsters.
    #[display("No monsters match the current filters. Widen the CR range or turn off one of the movement filters.")]
    NoMonsters,
    /// Monsters matched, but no group had a defined value for the metric.
    #[display("No group has a value for this metric. Try another metric or widen the filters.")]
    NoGroups,
    /// No matched monster has the plotted stat.
    #[display("No monster in the selection has this stat. Pick another stat or clear the group selection.")]
    NoPoints,
    /// No matched monster has any damage type for this defense kind.
    #[display("No monster in the selection has any damage {}. Pick another defense kind or widen the filters.", _0.label())]
    NoDefenses(DefenseKind),
    /// No environment is available to compare.
    #[display("No environments to compare. Choose environments with monsters in the current CR range.")]
    NoEnvironments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message_guides_user() {
        let msg = NoDataReason::NoMonsters.to_string();
        assert!(msg.contains("Widen the CR range"));
        let msg = NoDataReason::NoDefenses(DefenseKind::Vuln).to_string();
        assert!(msg.contains("vulnerability"));
    }

    #[test]
    fn test_serialized_shape() {
        let view: View<Vec<u32>> = View::NoData(NoDataReason::NoDefenses(DefenseKind::Immune));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "noData");
        assert_eq!(json["data"]["reason"], "noDefenses");
        assert_eq!(json["data"]["defenseKind"], "immune");

        let view = View::Data(vec![1, 2]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "data");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
