//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top line with endpoint and result count
//! - `ResultRow`: one search hit
//! - `Spinner`: loading indicator shown in place of the list
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: single-line query input, emits `QueryChanged`
//! - `ResultList`: scrollable list of `ResultRow`s with a selected row
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── search_box.rs
//! ├── result_row.rs
//! ├── result_list.rs
//! └── spinner.rs
//! ```

pub mod result_list;
pub mod result_row;
pub mod search_box;
pub mod spinner;
mod title_bar;

pub use result_list::{ResultList, ResultListState};
pub use result_row::ResultRow;
pub use search_box::{SearchBox, SearchBoxEvent};
pub use spinner::Spinner;
pub use title_bar::TitleBar;
