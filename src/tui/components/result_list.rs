//! # ResultList Component
//!
//! Scrollable view of the current search results.
//!
//! ## Responsibilities
//!
//! - Show the spinner instead of the list while a search is loading
//! - Render one `ResultRow` per item, in server order
//! - Track the selected row by row identity (`key_index`) so a selection
//!   survives a result replacement when the same row is still there
//! - Keep the selected row inside the viewport
//!
//! The scroll view renders its whole content area every frame, so at most
//! [`MAX_ROWS`] rows are laid out. Results past that are counted in the
//! title bar but not listed.
//!
//! `ResultList` is a transient component (created each frame) that wraps
//! `&'a mut ResultListState` (persistent state) and the result slice (props).

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::search::SearchResultItem;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::result_row::{ROW_HEIGHT, ResultRow};
use crate::tui::components::spinner::Spinner;
use crate::tui::event::TuiEvent;

/// Most rows laid out in the scroll view.
pub const MAX_ROWS: usize = 1_000;

/// Top offset of row `index` in content cells, saturating at `u16::MAX`.
fn row_top(index: usize) -> u16 {
    u16::try_from(index).map_or(u16::MAX, |i| i.saturating_mul(ROW_HEIGHT))
}

/// Selection and scroll state for the result list.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct ResultListState {
    pub scroll_state: ScrollViewState,
    /// Index of the selected row
    pub selected_index: Option<usize>,
    /// Identity of the selected row, used to restore selection after a refresh
    selected_row_id: Option<String>,
    /// Row identities of the last synced result set, capped at `MAX_ROWS`
    row_ids: Vec<String>,
    /// Last known viewport height (for paging and scroll clamping)
    pub viewport_height: u16,
}

impl ResultListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows laid out (never more than `MAX_ROWS`).
    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }

    /// Whether `results` is the result set this state was last synced with.
    pub fn is_synced_with(&self, results: &[SearchResultItem]) -> bool {
        self.row_ids.len() == results.len().min(MAX_ROWS)
            && results
                .iter()
                .zip(&self.row_ids)
                .enumerate()
                .all(|(i, (item, id))| item.row_id(i) == *id)
    }

    /// Reconcile selection with a freshly replaced result set.
    ///
    /// Keeps the selected row if a row with the same identity exists,
    /// otherwise selects the first row and scrolls to the top.
    pub fn sync(&mut self, results: &[SearchResultItem]) {
        if results.len() > MAX_ROWS {
            warn!(
                "Listing the first {} of {} results",
                MAX_ROWS,
                results.len()
            );
        }
        self.row_ids = results
            .iter()
            .take(MAX_ROWS)
            .enumerate()
            .map(|(i, item)| item.row_id(i))
            .collect();

        let kept = self
            .selected_row_id
            .as_ref()
            .and_then(|wanted| self.row_ids.iter().position(|id| id == wanted));

        match kept {
            Some(index) => self.selected_index = Some(index),
            None => {
                self.selected_index = (!self.row_ids.is_empty()).then_some(0);
                self.scroll_state.set_offset(Position { x: 0, y: 0 });
            }
        }
        self.selected_row_id = self.selected_index.and_then(|i| self.row_ids.get(i).cloned());
        self.scroll_to_selected();
    }

    /// Move the selection by `delta` rows, clamped to the list bounds.
    fn move_selection(&mut self, delta: isize) -> Option<usize> {
        if self.row_ids.is_empty() {
            return None;
        }
        let current = self.selected_index.unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, self.row_ids.len() as isize - 1) as usize;
        if Some(target) == self.selected_index {
            return None;
        }
        self.selected_index = Some(target);
        self.selected_row_id = self.row_ids.get(target).cloned();
        self.scroll_to_selected();
        Some(target)
    }

    fn rows_per_page(&self) -> isize {
        (self.viewport_height / ROW_HEIGHT).max(1) as isize
    }

    /// Scroll the viewport so the selected row is fully visible.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let item_top = row_top(idx);
        let item_bottom = item_top.saturating_add(ROW_HEIGHT);
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if self.viewport_height > 0
            && item_bottom > offset_y.saturating_add(self.viewport_height)
        {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        let total = row_top(self.row_ids.len());
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Emitted when the selected row changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged(pub usize);

/// Event handling lives on the state because `ResultList` is rebuilt every frame.
impl EventHandler for ResultListState {
    type Event = SelectionChanged;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let delta = match event {
            TuiEvent::SelectUp => -1,
            TuiEvent::SelectDown => 1,
            TuiEvent::SelectPageUp => -self.rows_per_page(),
            TuiEvent::SelectPageDown => self.rows_per_page(),
            _ => return None,
        };
        self.move_selection(delta).map(SelectionChanged)
    }
}

/// Scrollable result view component.
/// Created fresh each frame with references to state and data.
pub struct ResultList<'a> {
    pub state: &'a mut ResultListState,
    pub results: &'a [SearchResultItem],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> ResultList<'a> {
    pub fn new(
        state: &'a mut ResultListState,
        results: &'a [SearchResultItem],
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            results,
            is_loading,
            spinner_frame,
        }
    }

    /// Row indices that intersect the viewport at `scroll_offset`.
    fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let start = (scroll_offset / ROW_HEIGHT) as usize;
        let end = (scroll_offset.saturating_add(viewport_height).div_ceil(ROW_HEIGHT) as usize)
            .min(self.state.len());
        start.min(end)..end
    }
}

impl<'a> Component for ResultList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.is_loading {
            Spinner::new(self.spinner_frame).render(frame, area);
            return;
        }

        self.state.viewport_height = area.height;
        if !self.state.is_synced_with(self.results) {
            self.state.sync(self.results);
        }
        if self.state.is_empty() {
            return;
        }
        self.state.clamp_scroll();

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let total_height = row_top(self.state.len());
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_offset = self.state.scroll_state.offset().y;
        for i in self.visible_range(scroll_offset, area.height) {
            let row = ResultRow::new(&self.results[i], self.state.selected_index == Some(i));
            let row_rect = Rect::new(0, row_top(i), content_width, ROW_HEIGHT);
            scroll_view.render_widget(row, row_rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
