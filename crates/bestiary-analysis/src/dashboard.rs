//! The controller owning the working set and the selection state.

use bestiary_data::{CrRange, field::Dimension, monster::Monster};

use crate::{
    comparison::{self, EnvironmentComparison},
    composition::{self, TypeComposition},
    defense::{self, DefenseHeatmap},
    filter,
    group::{self, GroupAggregate},
    metric::Metric,
    scatter::{self, ScatterView},
    selection::{ComparisonSide, SelectionEvent, SelectionState},
    view::{NoDataReason, View},
};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartView {
    pub dimension: Dimension,
    pub metric: Metric,
    pub groups: Vec<GroupAggregate>,
    pub selected_group: Option<String>,
    /// Monsters remaining after the CR and movement filters.
    pub matched: usize,
    pub caption: String,
    pub summary: String,
}

/// Every view model for the current state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    pub state: SelectionState,
    pub observed_cr_range: CrRange,
    pub bar_chart: View<BarChartView>,
    pub scatter: View<ScatterView>,
    pub defense_heatmap: View<DefenseHeatmap>,
    pub comparison: View<EnvironmentComparison>,
    pub composition: View<TypeComposition>,
}

/// Describes what each bar shows.
#[must_use]
pub fn caption(dimension: Dimension, metric: Metric) -> String {
    format!(
        "Each bar shows the {} for each {}, after applying the CR range and movement filters.",
        metric.label().to_lowercase(),
        dimension.label(),
    )
}

/// One-line summary of a bar chart result.
#[must_use]
pub fn summary(
    groups: &[GroupAggregate],
    dimension: Dimension,
    metric: Metric,
    matched: usize,
) -> String {
    let mut text = format!(
        "Showing {} {} groups ({matched} monsters after filters).",
        groups.len(),
        dimension.label(),
    );
    if let Some(top) = groups.first() {
        text.push_str(&format!(
            " Top group: {} ({}: {}).",
            top.key,
            metric.label(),
            metric.format_value(top.value),
        ));
    }
    text
}

/// Owns the loaded monsters and the single [`SelectionState`].
///
/// Views are recomputed from scratch on every call.
#[derive(Debug, Clone)]
pub struct Dashboard {
    monsters: Vec<Monster>,
    observed_cr_range: CrRange,
    state: SelectionState,
}

impl Dashboard {
    /// Initializes the default state from the data: the CR bounds span the
    /// observed range and the comparison pair is the two most populous
    /// environments.
    #[must_use]
    pub fn new(monsters: Vec<Monster>) -> Self {
        let observed_cr_range = CrRange::observed(&monsters).unwrap_or_default();
        let mut dashboard = Self {
            monsters,
            observed_cr_range,
            state: SelectionState::new(observed_cr_range),
        };
        dashboard.reset();
        dashboard
    }

    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn observed_cr_range(&self) -> CrRange {
        self.observed_cr_range
    }

    /// Applies a user event; returns whether views must be redrawn.
    pub fn apply(&mut self, event: SelectionEvent) -> bool {
        tracing::debug!(?event, "applying selection event");
        let changed = self.state.apply(event);
        if !changed {
            tracing::trace!("selection unchanged");
        }
        changed
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        self.state = SelectionState::new(self.observed_cr_range);
        let [left, right] = comparison::default_pair(&self.monsters);
        self.state
            .apply(SelectionEvent::SetComparison(ComparisonSide::Left, left));
        self.state
            .apply(SelectionEvent::SetComparison(ComparisonSide::Right, right));
    }

    /// All environments in the working set, most populous first.
    #[must_use]
    pub fn environments(&self) -> Vec<String> {
        let all = self.monsters.iter().collect::<Vec<_>>();
        comparison::ranked_environments(&all)
            .into_iter()
            .map(|(env, _)| env)
            .collect()
    }

    /// Monsters passing the CR and movement filters.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Monster> {
        filter::filter(&self.monsters, &self.state)
    }

    /// Filtered monsters narrowed to the selected group, if any.
    #[must_use]
    pub fn selected_subset(&self) -> Vec<&Monster> {
        filter::select_group(&self.filtered(), &self.state)
    }

    #[must_use]
    pub fn bar_chart(&self) -> View<BarChartView> {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return View::NoData(NoDataReason::NoMonsters);
        }
        let dimension = self.state.dimension();
        let metric = self.state.metric();
        let groups = group::aggregate(&filtered, dimension, metric);
        if groups.is_empty() {
            return View::NoData(NoDataReason::NoGroups);
        }
        View::Data(BarChartView {
            dimension,
            metric,
            selected_group: self.state.selected_group().map(str::to_owned),
            matched: filtered.len(),
            caption: caption(dimension, metric),
            summary: summary(&groups, dimension, metric, filtered.len()),
            groups,
        })
    }

    #[must_use]
    pub fn scatter(&self) -> View<ScatterView> {
        scatter::scatter(&self.selected_subset(), self.state.stat())
    }

    #[must_use]
    pub fn defense_heatmap(&self) -> View<DefenseHeatmap> {
        defense::aggregate(
            &self.selected_subset(),
            self.state.defense_dimension(),
            self.state.defense_kind(),
        )
    }

    #[must_use]
    pub fn comparison(&self) -> View<EnvironmentComparison> {
        comparison::compare(
            &self.filtered(),
            self.state.comparison(ComparisonSide::Left),
            self.state.comparison(ComparisonSide::Right),
        )
    }

    #[must_use]
    pub fn composition(&self) -> View<TypeComposition> {
        composition::composition(&self.filtered())
    }

    #[must_use]
    pub fn views(&self) -> DashboardViews {
        DashboardViews {
            state: self.state.clone(),
            observed_cr_range: self.observed_cr_range,
            bar_chart: self.bar_chart(),
            scatter: self.scatter(),
            defense_heatmap: self.defense_heatmap(),
            comparison: self.comparison(),
            composition: self.composition(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bestiary_data::{
        field::{DefenseKind, StatKey},
        loader::Bestiary,
    };

    use super::*;

    const CSV: &str = "\
name,type,size,environment,cr,hp,ac,speed_fly,damage_resistances
Wolf,beast,medium,Forest,1,10,13,,
Owlbear,monstrosity,large,Forest,2,20,13,30,
Bat,beast,tiny,Cave,1,5,12,,
Ghost,undead,medium,,4,45,11,40,acid; fire
Lich,undead,medium,Tomb,21,135,17,,cold
Bad Row,beast,small,Forest,?,1,1,,
";

    fn dashboard() -> Dashboard {
        Dashboard::new(Bestiary::from_reader(CSV.as_bytes()).unwrap().into_monsters())
    }

    #[test]
    fn test_defaults_follow_data() {
        let dashboard = dashboard();
        assert_eq!(dashboard.monsters().len(), 5);
        assert_eq!(dashboard.observed_cr_range(), CrRange::new(1.0, 21.0));
        assert_eq!(dashboard.state().cr_range(), CrRange::new(1.0, 21.0));
        assert_eq!(
            dashboard.state().comparison(ComparisonSide::Left),
            Some("Forest")
        );
        assert_eq!(
            dashboard.state().comparison(ComparisonSide::Right),
            Some("Cave")
        );
        assert_eq!(dashboard.environments(), ["Forest", "Cave", "Tomb"]);
    }

    #[test]
    fn test_empty_working_set_uses_fallback_range() {
        let dashboard = Dashboard::new(Vec::new());
        assert_eq!(dashboard.state().cr_range(), CrRange::FALLBACK);
        assert_eq!(
            dashboard.bar_chart().reason(),
            Some(NoDataReason::NoMonsters)
        );
        assert_eq!(
            dashboard.comparison().reason(),
            Some(NoDataReason::NoEnvironments)
        );
    }

    #[test]
    fn test_end_to_end_count_by_environment() {
        let mut dashboard = dashboard();
        dashboard.apply(SelectionEvent::SetCrMin(1.0));
        dashboard.apply(SelectionEvent::SetCrMax(2.0));
        let chart = dashboard.bar_chart().into_data().unwrap();
        assert_eq!(
            chart.groups,
            [
                GroupAggregate {
                    key: "Forest".into(),
                    value: 2.0
                },
                GroupAggregate {
                    key: "Cave".into(),
                    value: 1.0
                },
            ]
        );
        assert_eq!(chart.matched, 3);
        assert_eq!(
            chart.summary,
            "Showing 2 environment groups (3 monsters after filters). \
             Top group: Forest (Number of monsters: 2)."
        );
    }

    #[test]
    fn test_group_selection_narrows_scatter_and_heatmap() {
        let mut dashboard = dashboard();
        dashboard.apply(SelectionEvent::SetDimension(Dimension::Type));
        dashboard.apply(SelectionEvent::ToggleGroup("Undead".into()));

        let scatter = dashboard.scatter().into_data().unwrap();
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.stat, StatKey::Hp);

        dashboard.apply(SelectionEvent::SetDefenseDimension(Dimension::Size));
        let heatmap = dashboard.defense_heatmap().into_data().unwrap();
        assert_eq!(heatmap.groups, ["Medium"]);
        assert_eq!(heatmap.active_damage_types.len(), 3);
        assert_eq!(heatmap.cells[0].percent, 50.0);

        // The bar chart itself still shows every group.
        let chart = dashboard.bar_chart().into_data().unwrap();
        assert_eq!(chart.groups.len(), 3);
        assert_eq!(chart.selected_group.as_deref(), Some("Undead"));
    }

    #[test]
    fn test_heatmap_without_resistances_reports_no_data() {
        let mut dashboard = dashboard();
        dashboard.apply(SelectionEvent::SetCrMax(2.0));
        assert_eq!(
            dashboard.defense_heatmap().reason(),
            Some(NoDataReason::NoDefenses(DefenseKind::Resist))
        );
    }

    #[test]
    fn test_filters_that_match_nothing() {
        let mut dashboard = dashboard();
        dashboard.apply(SelectionEvent::SetCrMin(5.0));
        dashboard.apply(SelectionEvent::SetCrMax(6.0));
        let views = dashboard.views();
        assert_eq!(views.bar_chart.reason(), Some(NoDataReason::NoMonsters));
        assert_eq!(views.scatter.reason(), Some(NoDataReason::NoMonsters));
        assert_eq!(
            views.defense_heatmap.reason(),
            Some(NoDataReason::NoMonsters)
        );
        assert_eq!(views.comparison.reason(), Some(NoDataReason::NoMonsters));
        assert_eq!(views.composition.reason(), Some(NoDataReason::NoMonsters));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut dashboard = dashboard();
        let initial = dashboard.state().clone();
        dashboard.apply(SelectionEvent::SetOnlyFlying(true));
        dashboard.apply(SelectionEvent::ToggleGroup("Forest".into()));
        dashboard.reset();
        assert_eq!(dashboard.state(), &initial);
    }

    #[test]
    fn test_views_are_idempotent_and_serializable() {
        let dashboard = dashboard();
        assert_eq!(dashboard.views(), dashboard.views());

        let json = serde_json::to_value(dashboard.views()).unwrap();
        assert_eq!(json["barChart"]["status"], "data");
        assert_eq!(json["barChart"]["data"]["metric"], "count");
        assert_eq!(json["state"]["dimension"], "environment");
        assert_eq!(json["comparison"]["data"]["left"]["environment"], "Forest");
    }
}
