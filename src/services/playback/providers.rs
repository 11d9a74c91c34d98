use serde::Serialize;

use crate::models::{MediaKind, PlaybackRequest};

/// A third-party embed site and its URL templates
///
/// Templates use `{id}`, `{season}` and `{episode}` placeholders. Sites name the
/// query parameters differently but all encode the same three values.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EmbedProvider {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    movie_template: &'static str,
    /// Whole show, used when no specific episode is targeted
    #[serde(skip)]
    series_template: &'static str,
    #[serde(skip)]
    episode_template: &'static str,
}

/// Cycle order for a playback session. Adding a provider means adding a row here.
pub static EMBED_PROVIDERS: [EmbedProvider; 3] = [
    EmbedProvider {
        id: "vidsrc",
        label: "Vidsrc",
        movie_template: "https://vidsrc.xyz/embed/movie?tmdb={id}",
        series_template: "https://vidsrc.xyz/embed/tv?tmdb={id}",
        episode_template: "https://vidsrc.xyz/embed/tv?tmdb={id}&season={season}&episode={episode}",
    },
    EmbedProvider {
        id: "2embed",
        label: "2Embed",
        movie_template: "https://2embed.org/embed/movie?tmdb={id}",
        series_template: "https://2embed.org/embed/tv?tmdb={id}",
        episode_template: "https://2embed.org/embed/tv?tmdb={id}&s={season}&e={episode}",
    },
    EmbedProvider {
        id: "superembed",
        label: "SuperEmbed",
        movie_template: "https://multiembed.mov/?video=tmdb:{id}",
        series_template: "https://multiembed.mov/?video=tmdb:{id}",
        episode_template: "https://multiembed.mov/?video=tmdb:{id}&s={season}&e={episode}",
    },
];

impl EmbedProvider {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        movie_template: &'static str,
        series_template: &'static str,
        episode_template: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            movie_template,
            series_template,
            episode_template,
        }
    }

    /// Player URL for `request`. Pure: same provider and request, same URL.
    pub fn embed_url(&self, request: &PlaybackRequest) -> String {
        let template = match (request.media_kind, request.episode_target()) {
            (MediaKind::Movie, _) => self.movie_template,
            (MediaKind::Series, Some(_)) => self.episode_template,
            (MediaKind::Series, None) => self.series_template,
        };

        let (season, episode) = request.episode_target().unwrap_or_default();

        template
            .replace("{id}", &request.catalog_id.to_string())
            .replace("{season}", &season.to_string())
            .replace("{episode}", &episode.to_string())
    }
}

/// Looks a provider up by id in the default table
pub fn provider_by_id(id: &str) -> Option<&'static EmbedProvider> {
    EMBED_PROVIDERS.iter().find(|p| p.id == id)
}
