use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::search_box::SEARCH_BOX_HEIGHT;
use crate::tui::components::{ResultList, TitleBar};

/// Title line, search box, then the result area filling the rest.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(SEARCH_BOX_HEIGHT), Min(0)]);
    let [title_area, search_area, results_area] = layout.areas(frame.area());

    TitleBar::new(&tui.endpoint, app.status_line()).render(frame, title_area);
    tui.search_box.render(frame, search_area);
    ResultList::new(
        &mut tui.result_list,
        &app.results,
        app.is_loading,
        spinner_frame,
    )
    .render(frame, results_area);
}
