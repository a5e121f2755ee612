use bestiary_runtime::{Runtime, Screen, ScreenTransition};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

/// Key bindings, in display order.
pub(crate) const KEY_BINDINGS: &[(&str, &str)] = &[
    ("d / m", "cycle grouping dimension / bar metric"),
    ("[ / ]", "lower / raise the minimum CR"),
    ("{ / }", "lower / raise the maximum CR"),
    ("f / s", "toggle flying only / swimming only"),
    ("←/→ ↑/↓", "move the bar cursor"),
    ("Enter", "select or deselect the group under the cursor"),
    ("c", "clear the group selection"),
    ("t", "cycle the stat plotted against CR"),
    ("k / g", "cycle heatmap defense kind / grouping"),
    ("1 / 2", "cycle the left / right comparison environment"),
    ("Tab", "switch the lower panel"),
    ("r", "reset every filter and selection"),
    ("?", "show this help"),
    ("q / Esc", "quit"),
];

#[derive(Debug, Default)]
pub(crate) struct HelpScreen;

impl Screen for HelpScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event.as_key_press_event().map(|key| key.code) {
            Some(KeyCode::Char('q' | '?') | KeyCode::Esc | KeyCode::Enter) => {
                ScreenTransition::Pop
            }
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let lines = KEY_BINDINGS
            .iter()
            .map(|(keys, action)| Line::raw(format!("  {keys:<10} {action}")))
            .collect::<Vec<_>>();
        let paragraph = Paragraph::new(lines).block(Block::bordered().title("Keys"));
        frame.render_widget(paragraph, main_area);

        let help_text = Text::from("?/q/Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }
}
