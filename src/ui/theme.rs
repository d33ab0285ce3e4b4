use ratatui::style::{Color, Modifier, Style};

use crate::ledger::Mark;

/// Styles for every view, built once and handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub header: Style,
    pub untyped: Style,
    pub correct: Style,
    pub incorrect: Style,
    pub cursor: Style,
    pub legend: Style,
    pub highlight: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            title: bold.fg(Color::Cyan),
            header: bold,
            untyped: Style::default().fg(Color::DarkGray),
            correct: Style::default().fg(Color::White),
            incorrect: Style::default().fg(Color::LightRed),
            cursor: Style::default().add_modifier(Modifier::UNDERLINED),
            legend: Style::default().add_modifier(Modifier::ITALIC),
            highlight: bold.fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
        }
    }
}

impl Theme {
    pub fn style_for(&self, mark: Mark) -> Style {
        match mark {
            Mark::Untyped => self.untyped,
            Mark::Correct => self.correct,
            Mark::Incorrect => self.incorrect,
        }
    }
}
