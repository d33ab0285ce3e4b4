pub mod theme;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Screen},
    ledger::{ComparisonUnit, Ledger, Mark},
    picker::FilePicker,
    session::{Page, Session},
};
pub use theme::Theme;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const MAX_TEXT_WIDTH: u16 = 100;
const TITLE: &str = "ttype";

pub fn draw(app: &App, theme: &Theme, f: &mut Frame) {
    match app.screen() {
        Screen::Typing(session) => f.render_widget(SessionView::new(session, theme), f.area()),
        Screen::Picker(picker) => f.render_widget(PickerView::new(picker, theme), f.area()),
    }
}

/// Split `area` into a title row and a centered content column
fn frame_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let body = chunks[2];
    let width = body.width.min(MAX_TEXT_WIDTH);
    let centered = Rect {
        x: body.x + (body.width - width) / 2,
        width,
        ..body
    };
    (chunks[0], centered)
}

pub struct SessionView<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn header(&self) -> Line<'static> {
        let metrics = self.session.metrics();
        let space = "   ";
        Line::from(vec![
            Span::styled(format!("wpm: {}", metrics.wpm), self.theme.header),
            Span::raw(space),
            Span::styled(format!("accuracy: {}%", metrics.accuracy), self.theme.header),
            Span::raw(space),
            Span::styled(
                format!(
                    "time remaining: {}s",
                    self.session.clock().seconds_remaining()
                ),
                self.theme.header,
            ),
        ])
    }

    fn render_test_page(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(area);

        Paragraph::new(self.header()).render(chunks[0], buf);

        let spans = text_spans(self.session.ledger(), self.theme);
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);
    }

    fn render_results_page(&self, area: Rect, buf: &mut Buffer) {
        let metrics = self.session.metrics();
        let lines = vec![
            Line::from(Span::styled(format!("wpm: {}", metrics.wpm), self.theme.header)),
            Line::default(),
            Line::from(Span::styled(
                format!("accuracy: {}%", metrics.accuracy),
                self.theme.header,
            )),
            Line::default(),
            Line::from(Span::styled(
                "(tab/esc) restart / (ctrl+c) quit",
                self.theme.legend,
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_area, body) = frame_layout(area);
        Paragraph::new(Span::styled(TITLE, self.theme.title)).render(title_area, buf);

        match self.session.page() {
            Page::InProgress => self.render_test_page(body, buf),
            Page::Results => self.render_results_page(body, buf),
        }
    }
}

/// Styled spans for the target text, merging neighbours that share a style
pub fn text_spans(ledger: &dyn Ledger, theme: &Theme) -> Vec<Span<'static>> {
    let current = ledger.current_unit();
    let separator = match ledger.unit() {
        ComparisonUnit::Word => " ",
        ComparisonUnit::Char => "",
    };
    let units = ledger.classify();
    let count = units.len();

    units
        .into_iter()
        .enumerate()
        .flat_map(|(idx, unit)| {
            let mut style = theme.style_for(unit.mark);
            if idx == current {
                style = style.patch(theme.cursor);
            }
            let text = match (unit.mark, unit.text.as_str()) {
                (Mark::Incorrect, " ") => "·".to_owned(),
                _ => unit.text,
            };

            let mut pieces: Vec<(String, Style)> = vec![(text, style)];
            if !separator.is_empty() && idx + 1 < count {
                pieces.push((separator.to_owned(), theme.untyped));
            }
            pieces
        })
        .coalesce(|a, b| {
            if a.1 == b.1 {
                Ok((a.0 + &b.0, a.1))
            } else {
                Err((a, b))
            }
        })
        .map(|(text, style)| Span::styled(text, style))
        .collect()
}

pub struct PickerView<'a> {
    picker: &'a FilePicker,
    theme: &'a Theme,
}

impl<'a> PickerView<'a> {
    pub fn new(picker: &'a FilePicker, theme: &'a Theme) -> Self {
        Self { picker, theme }
    }
}

impl Widget for PickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_area, body) = frame_layout(area);
        Paragraph::new(Span::styled(TITLE, self.theme.title)).render(title_area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("select a file in {}", self.picker.dir().display()),
                self.theme.header,
            )),
            Line::default(),
        ];

        let max_name = body.width.saturating_sub(2) as usize;
        lines.extend(self.picker.entries().iter().enumerate().map(|(idx, path)| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = if name.width() > max_name {
                name.chars().take(max_name).collect()
            } else {
                name
            };

            if idx == self.picker.selected() {
                Line::from(Span::styled(format!("> {name}"), self.theme.highlight))
            } else {
                Line::from(Span::raw(format!("  {name}")))
            }
        }));

        lines.push(Line::default());
        if let Some(err) = self.picker.error() {
            lines.push(Line::from(Span::styled(err.to_owned(), self.theme.error)));
        }
        lines.push(Line::from(Span::styled(
            "(up/down) move / (enter) open / (ctrl+c) quit",
            self.theme.legend,
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{StreamLedger, WordLedger};
    use crate::session::{Event, KeyPress};
    use crate::source::{FixedText, Target};
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::tempdir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_test_page() {
        let app = App::new(Box::new(FixedText::new("hello world")), 30).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| draw(&app, &Theme::default(), f)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("ttype"));
        assert!(content.contains("wpm: 0"));
        assert!(content.contains("accuracy: 0%"));
        assert!(content.contains("time remaining: 30s"));
        assert!(content.contains("hello world"));
    }

    #[test]
    fn test_draw_results_page() {
        let mut app = App::new(Box::new(FixedText::new("hi")), 30).unwrap();
        for c in "hi".chars() {
            app.handle(Event::KeyPress(KeyPress::Char(c))).unwrap();
        }
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| draw(&app, &Theme::default(), f)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("accuracy: 100%"));
        assert!(content.contains("restart"));
        assert!(!content.contains("time remaining"));
    }

    #[test]
    fn test_draw_picker() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        let picker = FilePicker::open(dir.path()).unwrap();
        let app = App::with_picker(picker, 30);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| draw(&app, &Theme::default(), f)).unwrap();

        assert!(buffer_text(&terminal).contains("> notes.md"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let session = Session::new(Target::Words(vec!["hi".to_string()]), 30).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        terminal
            .draw(|f| f.render_widget(SessionView::new(&session, &Theme::default()), f.area()))
            .unwrap();
    }

    #[test]
    fn test_text_spans_merge_and_mark_cursor() {
        let theme = Theme::default();
        let mut ledger = WordLedger::from_text("aa bb cc").unwrap();
        ledger.insert_char('a');
        ledger.insert_char('a');
        ledger.advance();

        let spans = text_spans(&ledger, &theme);
        assert_eq!(spans[0].content, "aa");
        assert_eq!(spans[0].style, theme.correct);
        assert_eq!(spans[1].content, " ");
        assert_eq!(spans[2].content, "bb");
        assert_eq!(spans[2].style, theme.untyped.patch(theme.cursor));
        // trailing space and the last word share the untyped style
        assert_eq!(spans[3].content, " cc");
    }

    #[test]
    fn test_text_spans_show_wrong_space() {
        let theme = Theme::default();
        let mut ledger = StreamLedger::new("a b").unwrap();
        ledger.insert_char('a');
        ledger.insert_char('x');

        let spans = text_spans(&ledger, &theme);
        assert_eq!(spans[1].content, "·");
        assert_eq!(spans[1].style, theme.incorrect);
    }
}
