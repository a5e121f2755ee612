use anyhow::ensure;
use bestiary_analysis::{
    dashboard::Dashboard,
    metric::Metric,
    selection::{ComparisonSide, SelectionEvent},
};
use bestiary_data::{
    field::{DefenseKind, Dimension, StatKey},
    monster::canonicalize_label,
};

/// Initial dashboard selection, shared by every command.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SelectionArg {
    /// Grouping dimension (environment, type, size)
    #[arg(long, default_value = "environment")]
    dimension: Dimension,
    /// Bar metric (count, avgCR, avgHP, avgAC, pctFly, pctSwim)
    #[arg(long, default_value = "count")]
    metric: Metric,
    /// Lowest challenge rating to include [default: lowest in the data]
    #[arg(long, allow_negative_numbers = true)]
    cr_min: Option<f64>,
    /// Highest challenge rating to include [default: highest in the data]
    #[arg(long, allow_negative_numbers = true)]
    cr_max: Option<f64>,
    /// Only monsters that can fly
    #[arg(long)]
    only_flying: bool,
    /// Only monsters that can swim
    #[arg(long)]
    only_swimming: bool,
    /// Group to select, e.g. "Forest"
    #[arg(long, value_name = "KEY")]
    group: Option<String>,
    /// Stat plotted against challenge rating (hp, ac, str, dex, con, int, wis, cha)
    #[arg(long, default_value = "hp")]
    stat: StatKey,
    /// Defense shown in the heatmap (resist, immune, vuln)
    #[arg(long, default_value = "resist")]
    defense_kind: DefenseKind,
    /// Grouping dimension of the heatmap
    #[arg(long, default_value = "environment")]
    defense_group: Dimension,
    /// Environments to compare [default: the two most populous]
    #[arg(long, value_delimiter = ',', value_name = "ENV_A,ENV_B")]
    compare: Vec<String>,
}

impl SelectionArg {
    /// Events that turn the default state into the requested one.
    ///
    /// The dimension comes before the group, since changing the dimension
    /// clears the group.
    pub(crate) fn events(&self) -> anyhow::Result<Vec<SelectionEvent>> {
        ensure!(
            self.compare.is_empty() || self.compare.len() == 2,
            "--compare takes exactly two environments, got {}",
            self.compare.len()
        );

        let mut events = vec![
            SelectionEvent::SetDimension(self.dimension),
            SelectionEvent::SetMetric(self.metric),
        ];
        events.extend(self.cr_min.map(SelectionEvent::SetCrMin));
        events.extend(self.cr_max.map(SelectionEvent::SetCrMax));
        events.extend([
            SelectionEvent::SetOnlyFlying(self.only_flying),
            SelectionEvent::SetOnlySwimming(self.only_swimming),
            SelectionEvent::SetStat(self.stat),
            SelectionEvent::SetDefenseKind(self.defense_kind),
            SelectionEvent::SetDefenseDimension(self.defense_group),
        ]);
        if let Some(group) = &self.group {
            events.push(SelectionEvent::ToggleGroup(canonicalize_label(group.trim())));
        }
        for (side, env) in [ComparisonSide::Left, ComparisonSide::Right]
            .into_iter()
            .zip(&self.compare)
        {
            events.push(SelectionEvent::SetComparison(
                side,
                Some(canonicalize_label(env.trim())),
            ));
        }
        Ok(events)
    }

    pub(crate) fn apply_to(&self, dashboard: &mut Dashboard) -> anyhow::Result<()> {
        for event in self.events()? {
            dashboard.apply(event);
        }
        Ok(())
    }
}
