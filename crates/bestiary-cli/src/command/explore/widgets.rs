use bestiary_analysis::{
    comparison::EnvironmentComparison,
    composition::TypeComposition,
    dashboard::BarChartView,
    defense::DefenseHeatmap,
    scatter::{NumericField, ScatterView},
    selection::{ComparisonSide, SelectionState},
    view::{NoDataReason, View},
};
use bestiary_data::CrRange;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Rect},
    style::{Color, Modifier, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::Line,
    widgets::{
        Axis, Bar, BarChart, Block, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
        Widget, Wrap,
    },
};

fn pane(title: impl Into<Line<'static>>) -> Block<'static> {
    Block::bordered()
        .merge_borders(MergeStrategy::Exact)
        .title(title)
}

fn render_no_data(title: String, reason: NoDataReason, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::raw(""),
        Line::styled("No data", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(reason.to_string()),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .centered()
    .wrap(Wrap { trim: true })
    .block(pane(title))
    .render(area, buf);
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(value: f64) -> u64 {
    (value * 100.0).round().max(0.0) as u64
}

/// Background shade for a percentage, relative to the largest one shown.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn heat(percent: f64, max: f64) -> Style {
    let t = if max > 0.0 {
        (percent / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mix = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    let bg = Color::Rgb(mix(30.0, 230.0), mix(30.0, 120.0), mix(46.0, 40.0));
    let fg = if t < 0.5 { Color::White } else { Color::Black };
    Style::default().fg(fg).bg(bg)
}

/// Display width of the widest label, in terminal columns.
fn label_width<'a, I>(labels: I) -> u16
where
    I: IntoIterator<Item = &'a str>,
{
    let width = labels
        .into_iter()
        .map(|label| Line::raw(label).width())
        .max()
        .unwrap_or(0);
    u16::try_from(width).unwrap_or(u16::MAX)
}

pub(crate) struct GroupBars<'a> {
    pub view: &'a View<BarChartView>,
    pub cursor: usize,
}

impl Widget for GroupBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let chart = match self.view {
            View::Data(chart) => chart,
            View::NoData(reason) => {
                render_no_data("Groups".to_owned(), *reason, area, buf);
                return;
            }
        };
        let bars = chart
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let selected = chart.selected_group.as_deref() == Some(group.key.as_str());
                let style = match (i == self.cursor, selected) {
                    (true, _) => Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                    (false, true) => Style::default().fg(Color::Magenta),
                    (false, false) => Style::default().fg(Color::Cyan),
                };
                let marker = if selected { "* " } else { "  " };
                Bar::with_label(format!("{marker}{}", group.key), bar_value(group.value))
                    .text_value(chart.metric.format_value(group.value))
                    .style(style)
            })
            .collect::<Vec<_>>();

        BarChart::new(bars)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .block(pane(format!(
                "{} by {}",
                chart.metric.label(),
                chart.dimension.label()
            )))
            .render(area, buf);
    }
}

pub(crate) struct ScatterPlot<'a> {
    pub view: &'a View<ScatterView>,
}

impl Widget for ScatterPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let scatter = match self.view {
            View::Data(scatter) => scatter,
            View::NoData(reason) => {
                render_no_data("Scatter".to_owned(), *reason, area, buf);
                return;
            }
        };
        let points = scatter
            .points
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        let trend = scatter.trend_line().map(Vec::from).unwrap_or_default();

        let pad = |[lo, hi]: [f64; 2]| {
            if hi > lo {
                [lo, hi]
            } else {
                [lo - 1.0, hi + 1.0]
            }
        };
        let x_bounds = pad(scatter.x_bounds);
        let y_bounds = pad(scatter.y_bounds);
        let labels = |[lo, hi]: [f64; 2]| {
            [
                format!("{lo:.1}"),
                format!("{:.1}", f64::midpoint(lo, hi)),
                format!("{hi:.1}"),
            ]
        };

        let mut datasets = vec![
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Cyan))
                .data(&points),
        ];
        if !trend.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Red))
                    .data(&trend),
            );
        }
        let stat = scatter.stat.label();
        Chart::new(datasets)
            .block(pane(format!(
                "{stat} vs CR (r = {})",
                scatter.correlation_label()
            )))
            .x_axis(
                Axis::default()
                    .title(NumericField::ChallengeRating.label())
                    .bounds(x_bounds)
                    .labels(labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(stat)
                    .bounds(y_bounds)
                    .labels(labels(y_bounds)),
            )
            .render(area, buf);
    }
}

pub(crate) struct StatPanel<'a> {
    pub view: &'a View<ScatterView>,
}

impl Widget for StatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Some(scatter) = self.view.data() else {
            Paragraph::new("n/a").block(pane("Stats")).render(area, buf);
            return;
        };
        let stats = &scatter.y_stats;
        let regression = &scatter.regression;
        let trend = if regression.valid {
            format!("{:.2}x{:+.2}", regression.slope, regression.intercept)
        } else {
            "n/a".to_owned()
        };
        let text = vec![
            Line::raw(format!("  Points: {:>10}", scatter.points.len())),
            Line::raw(format!("  r:      {:>10}", scatter.correlation_label())),
            Line::raw(format!("  Trend:  {trend:>10}")),
            Line::raw(""),
            Line::raw(format!("  Mean:   {:10.2}", stats.mean)),
            Line::raw(format!("  Median: {:10.2}", stats.median)),
            Line::raw(format!("  Min:    {:10.2}", stats.min)),
            Line::raw(format!("  Max:    {:10.2}", stats.max)),
            Line::raw(format!("  StdDev: {:10.2}", stats.std_dev)),
        ];
        Paragraph::new(text)
            .block(pane(scatter.stat.label()))
            .render(area, buf);
    }
}

pub(crate) struct DefenseTable<'a> {
    pub view: &'a View<DefenseHeatmap>,
}

impl Widget for DefenseTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let heatmap = match self.view {
            View::Data(heatmap) => heatmap,
            View::NoData(reason) => {
                render_no_data("Defenses".to_owned(), *reason, area, buf);
                return;
            }
        };
        let max = heatmap.max_percent();
        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(heatmap.active_damage_types.iter().map(|ty| Cell::from(ty.to_string()))),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = heatmap.groups.iter().enumerate().map(|(i, group)| {
            Row::new(
                std::iter::once(Cell::from(group.clone())).chain(heatmap.row(i).iter().map(
                    |cell| {
                        Cell::from(format!("{:>5.1}%", cell.percent))
                            .style(heat(cell.percent, max))
                    },
                )),
            )
        });
        let widths = std::iter::once(Constraint::Length(label_width(
            heatmap.groups.iter().map(String::as_str),
        )))
        .chain(heatmap.active_damage_types.iter().map(|_| Constraint::Length(11)));

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(pane(format!(
                "% with damage {} by {}",
                heatmap.defense_kind.label(),
                heatmap.group_dimension.label()
            )))
            .render(area, buf);
    }
}

pub(crate) struct ComparisonTable<'a> {
    pub view: &'a View<EnvironmentComparison>,
}

impl Widget for ComparisonTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let comparison = match self.view {
            View::Data(comparison) => comparison,
            View::NoData(reason) => {
                render_no_data("Comparison".to_owned(), *reason, area, buf);
                return;
            }
        };
        let sides = [&comparison.left, &comparison.right];
        let names = sides.map(|p| p.as_ref().map_or("-", |p| p.environment.as_str()));
        let counts = sides.map(|p| p.as_ref().map_or(0, |p| p.count));
        let measures = sides.map(|p| p.as_ref().map(|p| p.measures()));

        let header = Row::new([String::new(), names[0].to_owned(), names[1].to_owned()])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let mut rows = vec![Row::new([
            "monsters".to_owned(),
            counts[0].to_string(),
            counts[1].to_string(),
        ])];
        if let Some(labels) = measures.iter().flatten().next() {
            rows.extend(labels.iter().enumerate().map(|(i, (label, _))| {
                let value = |side: usize| {
                    measures[side]
                        .and_then(|m| m[i].1)
                        .map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"))
                };
                Row::new([(*label).to_owned(), value(0), value(1)])
            }));
        }

        Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(pane(format!("{} vs {}", names[0], names[1])))
        .render(area, buf);
    }
}

pub(crate) struct CompositionTable<'a> {
    pub view: &'a View<TypeComposition>,
}

impl Widget for CompositionTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let composition = match self.view {
            View::Data(composition) => composition,
            View::NoData(reason) => {
                render_no_data("Composition".to_owned(), *reason, area, buf);
                return;
            }
        };
        let header = Row::new(
            std::iter::once(String::new()).chain(composition.environments.iter().cloned()),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = composition.types.iter().enumerate().map(|(i, ty)| {
            Row::new(
                std::iter::once(Cell::from(ty.clone())).chain(composition.row(i).iter().map(
                    |cell| match cell.percent {
                        Some(pct) => Cell::from(format!("{pct:>5.1}%")).style(heat(pct, 100.0)),
                        None => Cell::from("    -"),
                    },
                )),
            )
        });
        let widths = std::iter::once(Constraint::Length(label_width(
            composition.types.iter().map(String::as_str),
        )))
        .chain(composition.environments.iter().map(|_| Constraint::Fill(1)));

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(pane("Type mix of the most populous environments"))
            .render(area, buf);
    }
}

pub(crate) struct StatusPanel<'a> {
    pub state: &'a SelectionState,
    pub observed: CrRange,
    pub bar_chart: &'a View<BarChartView>,
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.state;
        let range = state.cr_range().ordered();
        let flag = |on: bool| if on { "on" } else { "off" };
        let mut text = vec![
            Line::raw(format!("Dimension: {}", state.dimension().label())),
            Line::raw(format!("Metric:    {}", state.metric())),
            Line::raw(format!(
                "CR:        {} to {} (data {} to {})",
                range.min, range.max, self.observed.min, self.observed.max
            )),
            Line::raw(format!(
                "Flying:    {}  Swimming: {}",
                flag(state.only_flying()),
                flag(state.only_swimming())
            )),
            Line::raw(format!(
                "Selected:  {}",
                state.selected_group().unwrap_or("none")
            )),
            Line::raw(format!("Stat:      {}", state.stat().label())),
            Line::raw(format!(
                "Defense:   {} by {}",
                state.defense_kind().label(),
                state.defense_dimension().label()
            )),
            Line::raw(format!(
                "Compare:   {} / {}",
                state.comparison(ComparisonSide::Left).unwrap_or("-"),
                state.comparison(ComparisonSide::Right).unwrap_or("-")
            )),
        ];
        if let Some(chart) = self.bar_chart.data() {
            text.push(Line::raw(""));
            text.push(Line::styled(
                chart.summary.clone(),
                Style::default().fg(Color::Gray),
            ));
        }
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(pane("Selection"))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_scales_with_max() {
        assert_eq!(heat(0.0, 0.0), heat(0.0, 50.0));
        assert_eq!(heat(50.0, 50.0).bg, Some(Color::Rgb(230, 120, 40)));
        assert_eq!(heat(0.0, 50.0).bg, Some(Color::Rgb(30, 30, 46)));
        assert_eq!(heat(80.0, 50.0), heat(50.0, 50.0));
    }

    #[test]
    fn test_label_width_counts_columns() {
        assert_eq!(label_width(["Forest", "Cave"]), 6);
        assert_eq!(label_width(["Überwald", "Sea"]), 8);
        assert_eq!(label_width(["洞窟"]), 4);
        assert_eq!(label_width(std::iter::empty()), 0);
    }

    #[test]
    fn test_bar_value_keeps_two_decimals() {
        assert_eq!(bar_value(2.0), 200);
        assert_eq!(bar_value(12.345), 1235);
        assert_eq!(bar_value(-1.0), 0);
    }
}
