use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::{
    sync::{mpsc, RwLock},
    time::Instant,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::{search::SEARCH_DEBOUNCE, CatalogClient, PlaybackSession, SearchController},
};

/// A live session and the last time a request touched it
struct Tracked<T> {
    session: T,
    last_seen: Instant,
}

impl<T> Tracked<T> {
    fn new(session: T) -> Self {
        Self {
            session,
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut T {
        self.last_seen = Instant::now();
        &mut self.session
    }
}

type Sessions<T> = Arc<RwLock<HashMap<Uuid, Tracked<T>>>>;

/// Shared application state
///
/// Sessions are independent of each other; the maps only let HTTP requests find them.
/// Clients that leave without closing their sessions are caught by the idle sweep.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    search_sessions: Sessions<Arc<SearchController>>,
    playback_sessions: Sessions<PlaybackSession>,
    search_debounce: Duration,
}

/// Handle for stopping the idle session sweeper
pub struct SessionSweeperHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl SessionSweeperHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Session sweeper shutdown signal sent");
    }
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self::with_debounce(catalog, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(catalog: Arc<dyn CatalogClient>, search_debounce: Duration) -> Self {
        Self {
            catalog,
            search_sessions: Arc::new(RwLock::new(HashMap::new())),
            playback_sessions: Arc::new(RwLock::new(HashMap::new())),
            search_debounce,
        }
    }

    /// Mounts a new search widget session
    pub async fn open_search(&self) -> (Uuid, Arc<SearchController>) {
        let id = Uuid::new_v4();
        let controller = Arc::new(SearchController::with_debounce(
            self.catalog.clone(),
            self.search_debounce,
        ));

        self.search_sessions
            .write()
            .await
            .insert(id, Tracked::new(controller.clone()));

        (id, controller)
    }

    pub async fn search(&self, id: Uuid) -> AppResult<Arc<SearchController>> {
        self.search_sessions
            .write()
            .await
            .get_mut(&id)
            .map(|tracked| tracked.touch().clone())
            .ok_or_else(|| AppError::NotFound(format!("Search session {} not found", id)))
    }

    /// Unmounts a search session; anything still in flight for it becomes a no-op
    pub async fn close_search(&self, id: Uuid) -> AppResult<()> {
        let tracked = self
            .search_sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Search session {} not found", id)))?;

        tracked.session.close().await;
        Ok(())
    }

    pub async fn open_playback(&self, session: PlaybackSession) -> Uuid {
        let id = Uuid::new_v4();
        self.playback_sessions
            .write()
            .await
            .insert(id, Tracked::new(session));
        id
    }

    /// Runs `f` against a live playback session
    pub async fn with_playback<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut PlaybackSession) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut sessions = self.playback_sessions.write().await;
        let tracked = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Playback session {} not found", id)))?;
        f(tracked.touch())
    }

    pub async fn close_playback(&self, id: Uuid) -> AppResult<PlaybackSession> {
        self.playback_sessions
            .write()
            .await
            .remove(&id)
            .map(|tracked| tracked.session)
            .ok_or_else(|| AppError::NotFound(format!("Playback session {} not found", id)))
    }

    /// Drops every session nobody has touched for `max_idle`
    ///
    /// Evicted search sessions are closed, so their pending timers and responses are
    /// no-ops. Returns how many sessions were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let is_idle = |last_seen: Instant| now.duration_since(last_seen) >= max_idle;

        let evicted_searches: Vec<Arc<SearchController>> = {
            let mut sessions = self.search_sessions.write().await;
            let idle: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, tracked)| is_idle(tracked.last_seen))
                .map(|(id, _)| *id)
                .collect();
            idle.iter()
                .filter_map(|id| sessions.remove(id))
                .map(|tracked| tracked.session)
                .collect()
        };

        for controller in &evicted_searches {
            controller.close().await;
        }

        let evicted_playback = {
            let mut sessions = self.playback_sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, tracked| !is_idle(tracked.last_seen));
            before - sessions.len()
        };

        let evicted = evicted_searches.len() + evicted_playback;
        if evicted > 0 {
            tracing::info!(
                search = evicted_searches.len(),
                playback = evicted_playback,
                "Evicted idle sessions"
            );
        }

        evicted
    }

    /// Spawns a task that evicts idle sessions until shut down
    pub fn spawn_session_sweeper(&self, max_idle: Duration) -> SessionSweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let state = self.clone();
        let period = (max_idle / 2).max(Duration::from_secs(1));

        tokio::spawn(async move {
            tracing::info!(max_idle_secs = max_idle.as_secs(), "Session sweeper started");
            let mut ticker = tokio::time::interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        state.evict_idle(max_idle).await;
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Session sweeper stopped");
                        break;
                    }
                }
            }
        });

        SessionSweeperHandle { shutdown_tx }
    }
}
