use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::{App, View};
use crate::ui::input_style;

/// A UI Screen boundary: renders one view of the app into its area
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Target word, input field, timer and result
pub struct PracticeScreen;

impl Screen for PracticeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = bold_style.add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(1), // prompt
                Constraint::Length(1),
                Constraint::Length(3), // input
                Constraint::Length(1), // timer
                Constraint::Length(1), // result
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(app.prompt_text(), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let input = Line::from(vec![
            Span::styled(app.input(), input_style(app.input_color())),
            Span::styled("_", dim_bold_style),
        ]);
        Paragraph::new(input)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(app.timer_text(), dim_bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            app.result_text(),
            bold_style.fg(Color::Green),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}

/// Editable comma-separated word list
pub struct ConfigurationScreen;

impl Screen for ConfigurationScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(1)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} words, separated by commas", app.words().len()),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[0], buf);

        let editor = Line::from(vec![
            Span::raw(app.editor()),
            Span::styled("_", Style::default().add_modifier(Modifier::DIM)),
        ]);
        Paragraph::new(editor)
            .block(Block::default().borders(Borders::ALL).title("Word list"))
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Practice => Box::new(PracticeScreen),
        View::Configuration => Box::new(ConfigurationScreen),
    }
}
