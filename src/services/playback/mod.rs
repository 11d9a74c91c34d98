/// Playback source resolution
///
/// `providers` is the data: which embed sites exist and how their URLs look.
/// `session` is the state machine that walks through them.
pub mod providers;
pub mod session;

pub use providers::{provider_by_id, EmbedProvider, EMBED_PROVIDERS};
pub use session::{LoadSignal, LoadState, PlaybackSession, PlaybackSnapshot};
