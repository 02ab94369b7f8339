use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::search::SearchResultItem;

/// Every row is the key line plus one detail line.
pub const ROW_HEIGHT: u16 = 2;

const DETAIL_SEPARATOR: &str = " · ";

/// A stateless component that renders one search hit.
///
/// Created fresh each frame by `ResultList`. The first line is the item's
/// key; the second holds whatever optional fields the service sent (title,
/// author, size, upload time, url) and is blank when there are none.
#[derive(Clone, Copy)]
pub struct ResultRow<'a> {
    pub item: &'a SearchResultItem,
    pub is_selected: bool,
}

impl<'a> ResultRow<'a> {
    pub fn new(item: &'a SearchResultItem, is_selected: bool) -> Self {
        Self { item, is_selected }
    }

    /// The dim second line, built from the optional fields present.
    pub fn detail_text(item: &SearchResultItem) -> String {
        let mut parts: Vec<String> = Vec::new();
        match (&item.title, &item.author_name) {
            (Some(title), Some(author)) => parts.push(format!("{title} by {author}")),
            (Some(title), None) => parts.push(title.clone()),
            (None, Some(author)) => parts.push(format!("by {author}")),
            (None, None) => {}
        }
        if let Some(size) = item.size {
            parts.push(format_size(size));
        }
        if let Some(uploaded) = &item.uploaded {
            parts.push(format_uploaded(uploaded));
        }
        if let Some(url) = &item.url {
            parts.push(url.clone());
        }
        parts.join(DETAIL_SEPARATOR)
    }
}

/// Human-readable byte count using binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// RFC 3339 timestamps are shown in local time; anything else verbatim.
pub fn format_uploaded(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

impl<'a> Widget for ResultRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (marker, key_style) = if self.is_selected {
            (
                "▶ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            ("  ", Style::default().add_modifier(Modifier::BOLD))
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(self.item.key.as_str(), key_style),
            ]),
            Line::from(Span::styled(
                format!("  {}", Self::detail_text(self.item)),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_text_empty_when_only_key() {
        let item = SearchResultItem::with_key("a");
        assert_eq!(ResultRow::detail_text(&item), "");
    }

    #[test]
    fn detail_text_joins_present_fields() {
        let item = SearchResultItem {
            title: Some("Report".to_string()),
            author_name: Some("Ada".to_string()),
            size: Some(512),
            url: Some("https://files.example/r".to_string()),
            ..SearchResultItem::with_key("r")
        };
        assert_eq!(
            ResultRow::detail_text(&item),
            "Report by Ada · 512 B · https://files.example/r"
        );
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn format_uploaded_passes_through_unparseable() {
        assert_eq!(format_uploaded("yesterday"), "yesterday");
        let formatted = format_uploaded("2024-05-01T10:00:00Z");
        assert!(formatted.starts_with("2024-05-0"));
    }
}
