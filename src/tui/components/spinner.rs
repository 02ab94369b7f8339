use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Loading indicator, shown in place of the result list.
pub struct Spinner {
    frame_index: usize,
}

impl Spinner {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame_index % FRAMES.len()]
    }
}

impl Component for Spinner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Sits a little below the search box, like a centered activity indicator.
        let [_, row, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let line = Line::from(vec![
            Span::styled(self.glyph(), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled("Searching…", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
}
