//! # SearchBox Component
//!
//! Single-line text input for the query.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste)
//! - Handle editing (backspace, delete, cursor movement, Ctrl+U)
//! - Keep the cursor visible by scrolling horizontally
//! - Emit `QueryChanged` after every edit that changes the text
//!
//! The buffer is internal state; the parent forwards the emitted text to
//! `core::update` as `Action::QueryChanged`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows taken by the box: one line of text plus top and bottom border.
pub const SEARCH_BOX_HEIGHT: u16 = 3;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchBoxEvent {
    /// The text is now this value
    QueryChanged(String),
}

pub struct SearchBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Display columns scrolled off the left edge
    scroll_x: u16,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_x: 0,
        }
    }

    /// Create a box pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let buffer = sanitize(text);
        Self {
            cursor: buffer.len(),
            buffer,
            scroll_x: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor, counted from the start of the text.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Adjust `scroll_x` so the cursor stays inside `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            self.scroll_x = 0;
            return;
        }
        let col = self.cursor_column();
        if col < self.scroll_x {
            self.scroll_x = col;
        } else if col >= self.scroll_x + inner_width {
            self.scroll_x = col + 1 - inner_width;
        }
    }

    fn changed(&self) -> Option<SearchBoxEvent> {
        Some(SearchBoxEvent::QueryChanged(self.buffer.clone()))
    }
}

/// Queries are single-line; pasted line breaks become spaces.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        self.update_scroll(inner_width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Search");

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, self.scroll_x))
            .style(Style::default().fg(Color::Green));

        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + self.cursor_column().saturating_sub(self.scroll_x);
        let cursor_x = cursor_x.min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchBoxEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let c = if *c == '\n' || *c == '\r' { ' ' } else { *c };
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let text = sanitize(text);
                if text.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::ClearInput => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                self.cursor = 0;
                self.scroll_x = 0;
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}
