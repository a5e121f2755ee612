use bestiary_analysis::{
    dashboard::{Dashboard, DashboardViews},
    selection::{ComparisonSide, SelectionEvent},
};
use bestiary_runtime::{RenderMode, Runtime, Screen, ScreenTransition};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Spacing},
    style::{Color, Style},
    text::Text,
};

use super::HelpScreen;
use crate::command::explore::widgets::{
    ComparisonTable, CompositionTable, DefenseTable, GroupBars, ScatterPlot, StatPanel,
    StatusPanel,
};

/// Lower CR bound step: quarter steps below CR 1, whole steps above.
fn cr_step_down(cr: f64) -> f64 {
    if cr <= 1.0 {
        (cr - 0.25).max(0.0)
    } else {
        cr - 1.0
    }
}

fn cr_step_up(cr: f64) -> f64 {
    if cr < 1.0 { cr + 0.25 } else { cr + 1.0 }
}

const HELP_LINE: &str =
    "←/→: Move | Enter: Select | d/m: Dimension/Metric | Tab: Panel | ?: Keys | q: Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LowerPanel {
    #[default]
    Defenses,
    Comparison,
    Composition,
}

impl LowerPanel {
    fn next(self) -> Self {
        match self {
            Self::Defenses => Self::Comparison,
            Self::Comparison => Self::Composition,
            Self::Composition => Self::Defenses,
        }
    }
}

#[derive(Debug)]
pub(crate) struct DashboardScreen {
    dashboard: Dashboard,
    views: DashboardViews,
    environments: Vec<String>,
    cursor: usize,
    lower_panel: LowerPanel,
}

impl DashboardScreen {
    pub(crate) fn new(dashboard: Dashboard) -> Self {
        let views = dashboard.views();
        let environments = dashboard.environments();
        let mut screen = Self {
            dashboard,
            views,
            environments,
            cursor: 0,
            lower_panel: LowerPanel::default(),
        };
        screen.cursor = screen.selected_index().unwrap_or(0);
        screen
    }

    fn group_count(&self) -> usize {
        self.views.bar_chart.data().map_or(0, |chart| chart.groups.len())
    }

    fn cursor_group(&self) -> Option<&str> {
        let chart = self.views.bar_chart.data()?;
        chart.groups.get(self.cursor).map(|g| g.key.as_str())
    }

    fn selected_index(&self) -> Option<usize> {
        let chart = self.views.bar_chart.data()?;
        let selected = chart.selected_group.as_deref()?;
        chart.groups.iter().position(|g| g.key == selected)
    }

    fn refresh(&mut self) {
        self.views = self.dashboard.views();
        self.cursor = self.cursor.min(self.group_count().saturating_sub(1));
    }

    fn move_cursor(&mut self, forward: bool) {
        let count = self.group_count();
        if count == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
    }

    /// The environment after the current one on `side`, wrapping around.
    fn next_environment(&self, side: ComparisonSide) -> Option<String> {
        if self.environments.is_empty() {
            return None;
        }
        let next = self
            .dashboard
            .state()
            .comparison(side)
            .and_then(|current| self.environments.iter().position(|e| e == current))
            .map_or(0, |i| (i + 1) % self.environments.len());
        Some(self.environments[next].clone())
    }

    fn selection_event(&self, code: KeyCode) -> Option<SelectionEvent> {
        let state = self.dashboard.state();
        let range = state.cr_range();
        let event = match code {
            KeyCode::Char('d') => SelectionEvent::SetDimension(state.dimension().next()),
            KeyCode::Char('m') => SelectionEvent::SetMetric(state.metric().next()),
            KeyCode::Char('[') => SelectionEvent::SetCrMin(cr_step_down(range.min)),
            KeyCode::Char(']') => SelectionEvent::SetCrMin(cr_step_up(range.min)),
            KeyCode::Char('{') => SelectionEvent::SetCrMax(cr_step_down(range.max)),
            KeyCode::Char('}') => SelectionEvent::SetCrMax(cr_step_up(range.max)),
            KeyCode::Char('f') => SelectionEvent::SetOnlyFlying(!state.only_flying()),
            KeyCode::Char('s') => SelectionEvent::SetOnlySwimming(!state.only_swimming()),
            KeyCode::Enter => SelectionEvent::ToggleGroup(self.cursor_group()?.to_owned()),
            KeyCode::Char('c') => SelectionEvent::ClearGroup,
            KeyCode::Char('t') => SelectionEvent::SetStat(state.stat().next()),
            KeyCode::Char('k') => SelectionEvent::SetDefenseKind(state.defense_kind().next()),
            KeyCode::Char('g') => {
                SelectionEvent::SetDefenseDimension(state.defense_dimension().next())
            }
            KeyCode::Char('1') => SelectionEvent::SetComparison(
                ComparisonSide::Left,
                self.next_environment(ComparisonSide::Left),
            ),
            KeyCode::Char('2') => SelectionEvent::SetComparison(
                ComparisonSide::Right,
                self.next_environment(ComparisonSide::Right),
            ),
            _ => return None,
        };
        Some(event)
    }
}

impl Screen for DashboardScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::OnDirty);
        runtime.request_redraw();
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Char('?') => return ScreenTransition::Push(Box::new(HelpScreen)),
            KeyCode::Left | KeyCode::Up => {
                self.move_cursor(false);
                runtime.request_redraw();
            }
            KeyCode::Right | KeyCode::Down => {
                self.move_cursor(true);
                runtime.request_redraw();
            }
            KeyCode::Tab => {
                self.lower_panel = self.lower_panel.next();
                runtime.request_redraw();
            }
            KeyCode::Char('r') => {
                self.dashboard.reset();
                self.cursor = 0;
                self.refresh();
                runtime.request_redraw();
            }
            code => {
                if let Some(event) = self.selection_event(code)
                    && self.dashboard.apply(event)
                {
                    self.refresh();
                    runtime.request_redraw();
                }
            }
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [top_area, bottom_area] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);
        let [bars_area, scatter_area, stats_area] = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Fill(1),
            Constraint::Length(24),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(top_area);
        let [status_area, lower_area] =
            Layout::horizontal([Constraint::Length(48), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(bottom_area);

        let views = &self.views;
        frame.render_widget(
            GroupBars {
                view: &views.bar_chart,
                cursor: self.cursor,
            },
            bars_area,
        );
        frame.render_widget(
            ScatterPlot {
                view: &views.scatter,
            },
            scatter_area,
        );
        frame.render_widget(
            StatPanel {
                view: &views.scatter,
            },
            stats_area,
        );
        frame.render_widget(
            StatusPanel {
                state: &views.state,
                observed: views.observed_cr_range,
                bar_chart: &views.bar_chart,
            },
            status_area,
        );
        match self.lower_panel {
            LowerPanel::Defenses => frame.render_widget(
                DefenseTable {
                    view: &views.defense_heatmap,
                },
                lower_area,
            ),
            LowerPanel::Comparison => frame.render_widget(
                ComparisonTable {
                    view: &views.comparison,
                },
                lower_area,
            ),
            LowerPanel::Composition => frame.render_widget(
                CompositionTable {
                    view: &views.composition,
                },
                lower_area,
            ),
        }

        let help_text = Text::from(HELP_LINE)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }
}
