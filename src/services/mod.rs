pub mod browse;
pub mod catalog;
pub mod playback;
pub mod search;

pub use catalog::{CatalogClient, TmdbCatalog};
pub use playback::{PlaybackSession, EMBED_PROVIDERS};
pub use search::SearchController;
