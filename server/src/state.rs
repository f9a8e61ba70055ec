use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use palpite_shared::{GameSession, MunicipalityRegistry, NewGameError};

use crate::config::MAX_SESSIONS;

#[derive(Debug)]
pub enum CreateSessionError {
    EmptyRegistry,
    Saturated,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MunicipalityRegistry>,
    /// Display names sorted by normalized key, for autocomplete.
    pub display_names: Arc<Vec<String>>,
    pub sessions: Arc<DashMap<u64, GameSession>>,
    pub next_session_id: Arc<AtomicU64>,
    pub game_name: Arc<str>,
}

impl AppState {
    pub fn new(registry: MunicipalityRegistry, game_name: String) -> Self {
        let display_names = registry.sorted_display_names();
        Self {
            registry: Arc::new(registry),
            display_names: Arc::new(display_names),
            sessions: Arc::new(DashMap::new()),
            next_session_id: Arc::new(AtomicU64::new(1)),
            game_name: Arc::from(game_name),
        }
    }

    /// Today's date as seen by the server clock. The only place the
    /// wall clock enters the game; everything downstream is a pure
    /// function of this date.
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Create a session for `date`. Stale sessions are swept inline
    /// before the capacity check so a day rollover can't wedge the
    /// store at `MAX_SESSIONS`.
    pub fn create_session(&self, date: NaiveDate) -> Result<(u64, GameSession), CreateSessionError> {
        if self.sessions.len() >= MAX_SESSIONS {
            self.evict_stale(date);
        }
        if self.sessions.len() >= MAX_SESSIONS {
            return Err(CreateSessionError::Saturated);
        }

        let session = GameSession::start(date, &self.registry).map_err(|e| match e {
            NewGameError::EmptyRegistry => CreateSessionError::EmptyRegistry,
        })?;
        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        self.sessions.insert(id, session.clone());
        Ok((id, session))
    }

    /// Drop sessions not dated `today`. Returns how many were evicted.
    pub fn evict_stale(&self, today: NaiveDate) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.date == today);
        before - self.sessions.len()
    }
}
