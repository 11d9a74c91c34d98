/// Interactive search
///
/// `SearchSession` owns the debounce/request epochs and decides which responses may
/// commit. `SearchController` runs it against a real clock and a `CatalogClient`.
pub mod controller;
pub mod session;

pub use controller::{SearchController, SEARCH_DEBOUNCE};
pub use session::{SearchSession, SearchSnapshot, SearchStatus, MIN_QUERY_CHARS};
