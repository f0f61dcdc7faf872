pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
};

use crate::app::{App, InputColor, NotificationKind, View};
use crate::ui::screen::{current_screen, Screen};

const HORIZONTAL_MARGIN: u16 = 2;
const VIEWS: [View; 2] = [View::Practice, View::Configuration];

pub fn input_style(color: InputColor) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    match color {
        InputColor::Affirmative => bold_style.fg(Color::Green),
        InputColor::Negative => bold_style.fg(Color::Red),
    }
}

fn help_text(view: View) -> &'static str {
    match view {
        View::Practice => "(←) retry / (→) next / (ctrl+n) new word / (tab) words / (esc)ape",
        View::Configuration => "(ctrl+s) save words / (tab) practice / (esc)ape",
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(3), // tabs
                Constraint::Min(0),    // active view
                Constraint::Length(1), // notification
                Constraint::Length(1), // help
            ])
            .split(area);

        let selected = VIEWS.iter().position(|v| *v == self.view()).unwrap_or(0);
        let tabs = Tabs::new(VIEWS.iter().map(|v| v.to_string()))
            .block(Block::default().borders(Borders::ALL).title("timeme"))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        tabs.render(chunks[0], buf);

        current_screen(self.view()).render(self, chunks[1], buf);

        if let Some(note) = self.notification() {
            let style = match note.kind {
                NotificationKind::Info => Style::default().fg(Color::Cyan),
                NotificationKind::Error => Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            };
            Paragraph::new(Span::styled(note.message.as_str(), style)).render(chunks[2], buf);
        }

        let help = Paragraph::new(Line::from(Span::styled(
            help_text(self.view()),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        help.render(chunks[3], buf);
    }
}
