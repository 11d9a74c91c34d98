//! Playback source resolver.
//!
//! One session per open player. The session picks a provider from the table, builds
//! its URL, and waits for the embed's load or error signal. On failure the user may
//! cycle to the next provider; nothing is retried automatically.

use serde::{Deserialize, Serialize};

use super::providers::{EmbedProvider, EMBED_PROVIDERS};
use crate::{
    error::{AppError, AppResult},
    models::PlaybackRequest,
};

pub const PROVIDER_FAILED_MESSAGE: &str =
    "Failed to load the video player. Please try a different source.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Pending,
    Playing,
    Failed,
}

/// Signal raised by the embedded player frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadSignal {
    Loaded,
    Error,
}

/// Render-ready view of a playback session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub request: PlaybackRequest,
    pub provider: EmbedProvider,
    pub provider_index: usize,
    pub provider_count: usize,
    pub embed_url: String,
    pub load_state: LoadState,
    /// Bumped on every URL build; load signals quote it back
    pub attempt: u64,
    pub advisory_visible: bool,
    pub error: Option<String>,
    /// Leaving the page while playing should ask first
    pub confirm_on_leave: bool,
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    request: PlaybackRequest,
    providers: &'static [EmbedProvider],
    provider_index: usize,
    load_state: LoadState,
    dismissed_advisory: bool,
    attempt: u64,
}

impl PlaybackSession {
    /// Opens a session on the first provider of the default table
    pub fn open(request: PlaybackRequest) -> Self {
        Self {
            request,
            providers: &EMBED_PROVIDERS,
            provider_index: 0,
            load_state: LoadState::Pending,
            dismissed_advisory: false,
            attempt: 1,
        }
    }

    /// Opens a session over a custom provider table
    pub fn open_with(
        providers: &'static [EmbedProvider],
        request: PlaybackRequest,
    ) -> AppResult<Self> {
        if providers.is_empty() {
            return Err(AppError::Internal(
                "Playback needs at least one embed provider".to_string(),
            ));
        }

        Ok(Self {
            providers,
            ..Self::open(request)
        })
    }

    pub fn request(&self) -> &PlaybackRequest {
        &self.request
    }

    pub fn provider(&self) -> &'static EmbedProvider {
        &self.providers[self.provider_index]
    }

    pub fn provider_index(&self) -> usize {
        self.provider_index
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn embed_url(&self) -> String {
        self.provider().embed_url(&self.request)
    }

    pub fn advisory_visible(&self) -> bool {
        !self.dismissed_advisory
    }

    /// Hides the third-party content advisory for the rest of this session
    pub fn dismiss_advisory(&mut self) {
        self.dismissed_advisory = true;
    }

    /// Applies a load signal from the player frame
    ///
    /// Only a pending attempt reacts. Signals quoting an older attempt come from a
    /// frame that has already been replaced and are dropped.
    pub fn record_load(&mut self, signal: LoadSignal, attempt: Option<u64>) -> LoadState {
        if attempt.is_some_and(|a| a != self.attempt) {
            tracing::debug!(
                attempt = ?attempt,
                current = self.attempt,
                "Ignoring load signal for a replaced player"
            );
            return self.load_state;
        }

        if self.load_state != LoadState::Pending {
            return self.load_state;
        }

        self.load_state = match signal {
            LoadSignal::Loaded => LoadState::Playing,
            LoadSignal::Error => {
                tracing::warn!(
                    provider = self.provider().id,
                    catalog_id = self.request.catalog_id,
                    "Embed provider failed to load"
                );
                LoadState::Failed
            }
        };

        self.load_state
    }

    /// Moves to the next provider, wrapping after the last one
    pub fn advance_provider(&mut self) -> AppResult<&'static EmbedProvider> {
        if self.load_state != LoadState::Failed {
            return Err(AppError::InvalidTransition(
                "A different source can only be tried after the current one fails".to_string(),
            ));
        }

        let from = self.provider().id;
        self.provider_index = (self.provider_index + 1) % self.providers.len();
        self.load_state = LoadState::Pending;
        self.attempt += 1;

        let provider = self.provider();
        tracing::info!(
            from,
            to = provider.id,
            attempt = self.attempt,
            "Switched embed provider"
        );

        Ok(provider)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            request: self.request,
            provider: *self.provider(),
            provider_index: self.provider_index,
            provider_count: self.providers.len(),
            embed_url: self.embed_url(),
            load_state: self.load_state,
            attempt: self.attempt,
            advisory_visible: self.advisory_visible(),
            error: (self.load_state == LoadState::Failed)
                .then(|| PROVIDER_FAILED_MESSAGE.to_string()),
            confirm_on_leave: self.load_state == LoadState::Playing,
        }
    }

    /// Destroys the session
    pub fn close(self) {
        tracing::debug!(
            provider = self.provider().id,
            attempts = self.attempt,
            "Playback session closed"
        );
    }
}
