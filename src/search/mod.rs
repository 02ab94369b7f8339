//! # Search Collaborator
//!
//! The remote search service, hidden behind the [`SearchProvider`] trait so the
//! core and the TUI never talk to reqwest directly.

pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpSearchProvider;
pub use provider::{SearchError, SearchProvider};
pub use types::{RawRecord, SearchResponse, SearchResultItem};
