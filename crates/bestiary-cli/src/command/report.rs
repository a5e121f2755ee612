use std::{io, path::PathBuf};

use bestiary_analysis::{
    comparison::{EnvironmentComparison, EnvironmentProfile},
    composition::TypeComposition,
    dashboard::{BarChartView, Dashboard, DashboardViews},
    defense::DefenseHeatmap,
    scatter::{NumericField, ScatterView},
    view::View,
};

use crate::{command::selection::SelectionArg, util};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Monster CSV file path
    monsters_file: PathBuf,
    #[clap(flatten)]
    selection: SelectionArg,
    /// Output format (json, text)
    #[arg(long, default_value = "json")]
    format: ReportFormat,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        monsters_file,
        selection,
        format,
        output,
    } = arg;

    let bestiary = util::read_monsters_file(monsters_file)?;
    let mut dashboard = Dashboard::new(bestiary.into_monsters());
    selection.apply_to(&mut dashboard)?;
    let views = dashboard.views();

    let mut output = util::Output::from_output_path(output.clone())?;
    match format {
        ReportFormat::Json => output.write_json(&views),
        ReportFormat::Text => output.write_with(|out| write_text(out, &views)),
    }
}

/// Plain-text rendering of every view.
pub(crate) fn write_text<W>(out: &mut W, views: &DashboardViews) -> io::Result<()>
where
    W: io::Write,
{
    let state = &views.state;
    let range = state.cr_range().ordered();
    writeln!(out, "Monster dashboard")?;
    writeln!(
        out,
        "  CR range: {} to {} (data: {} to {})",
        range.min, range.max, views.observed_cr_range.min, views.observed_cr_range.max
    )?;
    let filters = match (state.only_flying(), state.only_swimming()) {
        (false, false) => "none",
        (true, false) => "flying only",
        (false, true) => "swimming only",
        (true, true) => "flying and swimming only",
    };
    writeln!(out, "  Movement filters: {filters}")?;
    writeln!(
        out,
        "  Selected {}: {}",
        state.dimension().label(),
        state.selected_group().unwrap_or("none")
    )?;

    writeln!(out)?;
    section(out, "Bar chart", &views.bar_chart, write_bar_chart)?;
    section(out, "Scatter", &views.scatter, write_scatter)?;
    section(out, "Defense heatmap", &views.defense_heatmap, write_heatmap)?;
    section(out, "Environment comparison", &views.comparison, write_comparison)?;
    section(out, "Type composition", &views.composition, write_composition)?;
    Ok(())
}

fn section<W, T, F>(out: &mut W, title: &str, view: &View<T>, f: F) -> io::Result<()>
where
    W: io::Write,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    writeln!(out, "{title}")?;
    match view {
        View::Data(data) => f(out, data)?,
        View::NoData(reason) => writeln!(out, "  No data. {reason}")?,
    }
    writeln!(out)
}

fn write_bar_chart<W: io::Write>(out: &mut W, chart: &BarChartView) -> io::Result<()> {
    writeln!(out, "  {}", chart.caption)?;
    writeln!(out, "  {}", chart.summary)?;
    let width = label_width(chart.groups.iter().map(|g| g.key.as_str()));
    for group in &chart.groups {
        let marker = if chart.selected_group.as_deref() == Some(group.key.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            " {marker}{:<width$}  {:>10}",
            group.key,
            chart.metric.format_value(group.value)
        )?;
    }
    Ok(())
}

fn write_scatter<W: io::Write>(out: &mut W, scatter: &ScatterView) -> io::Result<()> {
    let stat = scatter.stat.label();
    writeln!(
        out,
        "  {stat} vs {}, {} points",
        NumericField::ChallengeRating.label(),
        scatter.points.len()
    )?;
    writeln!(out, "  r = {}", scatter.correlation_label())?;
    let regression = &scatter.regression;
    if regression.valid {
        writeln!(
            out,
            "  trend: y = {:.2} x + {:.2}",
            regression.slope, regression.intercept
        )?;
    } else {
        writeln!(out, "  trend: n/a")?;
    }
    let stats = &scatter.y_stats;
    writeln!(
        out,
        "  {stat}: min {:.1}, max {:.1}, mean {:.2}, median {:.1}, std dev {:.2}",
        stats.min, stats.max, stats.mean, stats.median, stats.std_dev
    )
}

fn write_heatmap<W: io::Write>(out: &mut W, heatmap: &DefenseHeatmap) -> io::Result<()> {
    writeln!(
        out,
        "  % of each {} with damage {}",
        heatmap.group_dimension.label(),
        heatmap.defense_kind.label()
    )?;
    let width = label_width(heatmap.groups.iter().map(String::as_str));
    write!(out, "  {:<width$}", "")?;
    for damage_type in &heatmap.active_damage_types {
        write!(out, " {:>11}", damage_type.to_string())?;
    }
    writeln!(out)?;
    for (i, group) in heatmap.groups.iter().enumerate() {
        write!(out, "  {group:<width$}")?;
        for cell in heatmap.row(i) {
            write!(out, " {:>10.1}%", cell.percent)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_comparison<W: io::Write>(
    out: &mut W,
    comparison: &EnvironmentComparison,
) -> io::Result<()> {
    let sides = [&comparison.left, &comparison.right];
    let names = sides.map(|p| p.as_ref().map_or("-", |p| p.environment.as_str()));
    writeln!(out, "  {:<10} {:>12} {:>12}", "", names[0], names[1])?;
    let counts = sides.map(|p| p.as_ref().map_or(0, |p| p.count));
    writeln!(out, "  {:<10} {:>12} {:>12}", "monsters", counts[0], counts[1])?;
    let measures = sides.map(|p| p.as_ref().map(EnvironmentProfile::measures));
    let Some(labels) = measures.iter().flatten().next() else {
        return Ok(());
    };
    for (i, (label, _)) in labels.iter().enumerate() {
        let values = measures
            .each_ref()
            .map(|m| m.as_ref().map_or_else(|| "-".to_owned(), |m| format_optional(m[i].1)));
        writeln!(out, "  {label:<10} {:>12} {:>12}", values[0], values[1])?;
    }
    Ok(())
}

fn write_composition<W: io::Write>(
    out: &mut W,
    composition: &TypeComposition,
) -> io::Result<()> {
    writeln!(out, "  % of each environment's listed monsters by type")?;
    let width = label_width(composition.types.iter().map(String::as_str));
    write!(out, "  {:<width$}", "")?;
    for env in &composition.environments {
        write!(out, " {env:>11}")?;
    }
    writeln!(out)?;
    for (i, monster_type) in composition.types.iter().enumerate() {
        write!(out, "  {monster_type:<width$}")?;
        for cell in composition.row(i) {
            match cell.percent {
                Some(pct) => write!(out, " {pct:>10.1}%")?,
                None => write!(out, " {:>11}", "-")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn label_width<'a, I>(labels: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use bestiary_analysis::selection::SelectionEvent;
    use bestiary_data::loader::Bestiary;

    use super::*;

    const CSV: &str = "\
name,type,size,environment,cr,hp,ac,speed_fly,damage_resistances
Wolf,beast,medium,Forest,1,10,13,,
Owlbear,monstrosity,large,Forest,2,20,13,30,
Bat,beast,tiny,Cave,1/8,1,12,30,
Ghost,undead,medium,Forest,4,45,11,40,acid; fire
";

    fn render(dashboard: &Dashboard) -> String {
        let mut out = Vec::new();
        write_text(&mut out, &dashboard.views()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Bestiary::from_reader(CSV.as_bytes()).unwrap().into_monsters())
    }

    #[test]
    fn test_text_report_lists_every_view() {
        let text = render(&dashboard());
        for title in [
            "Bar chart",
            "Scatter",
            "Defense heatmap",
            "Environment comparison",
            "Type composition",
        ] {
            assert!(text.contains(title), "missing {title}:\n{text}");
        }
        assert!(text.contains("Top group: Forest (Number of monsters: 3)."));
        assert!(text.contains("Acid"));
        assert!(text.contains("Hit Points vs Challenge Rating, 4 points"));
    }

    #[test]
    fn test_text_report_shows_no_data_guidance() {
        let mut dashboard = dashboard();
        dashboard.apply(SelectionEvent::SetCrMin(10.0));
        dashboard.apply(SelectionEvent::SetCrMax(20.0));
        let text = render(&dashboard);
        assert!(text.contains("No data. No monsters match the current filters."));
        assert!(!text.contains("Top group"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
    }
}
