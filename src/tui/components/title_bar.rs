//! # TitleBar Component
//!
//! Top status line: app name, the search host, and a short status
//! ("Searching…" / "N results"). Purely presentational; failures are never
//! shown here.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Host of the search endpoint (or the raw endpoint if it has none)
    pub host: String,
    /// Status text, may be empty
    pub status: String,
}

impl TitleBar {
    pub fn new(endpoint: &str, status: String) -> Self {
        let host = reqwest::Url::parse(endpoint)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| endpoint.to_string());
        Self { host, status }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status.is_empty() {
            format!("filesearch | {}", self.host)
        } else {
            format!("filesearch | {} | {}", self.host, self.status)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
