//! Per-user search sessions with cyclic pagination over the matched recipes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use teloxide::types::UserId;
use tracing::debug;

use crate::db::Recipe;

/// Pagination state over the results of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    matches: Vec<Recipe>,
    cursor: usize,
}

impl SearchSession {
    /// Start at the first match. Returns `None` for an empty result list.
    pub fn new(matches: Vec<Recipe>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        Some(Self { matches, cursor: 0 })
    }

    pub fn current(&self) -> &Recipe {
        &self.matches[self.cursor]
    }

    /// Move to the next match, wrapping to the first after the last
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.matches.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn matches(&self) -> &[Recipe] {
        &self.matches
    }
}

/// Key-value backing for search sessions, keyed by chat user
pub trait SessionStore: Send + Sync {
    fn get(&self, user: UserId) -> Option<SearchSession>;
    fn set(&self, user: UserId, session: SearchSession);
    fn has(&self, user: UserId) -> bool;
}

/// Process-local session store; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserId, SearchSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, SearchSession>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user: UserId) -> Option<SearchSession> {
        self.lock().get(&user).cloned()
    }

    fn set(&self, user: UserId, session: SearchSession) {
        self.lock().insert(user, session);
    }

    fn has(&self, user: UserId) -> bool {
        self.lock().contains_key(&user)
    }
}

/// Session operations used by the router, on top of any [`SessionStore`]
#[derive(Debug, Default)]
pub struct SessionState<S> {
    store: S,
}

impl<S: SessionStore> SessionState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replace any previous session for `user` with a fresh one over `matches`.
    ///
    /// Returns `false` and leaves existing state alone when `matches` is empty.
    pub fn start_session(&self, user: UserId, matches: Vec<Recipe>) -> bool {
        match SearchSession::new(matches) {
            Some(session) => {
                debug!(user_id = %user, matches = session.matches().len(), "Search session started");
                self.store.set(user, session);
                true
            }
            None => false,
        }
    }

    pub fn current(&self, user: UserId) -> Option<Recipe> {
        self.store.get(user).map(|session| session.current().clone())
    }

    /// Step the cursor forward. Returns `false` if `user` has no session.
    pub fn advance(&self, user: UserId) -> bool {
        match self.store.get(user) {
            Some(mut session) => {
                session.advance();
                debug!(user_id = %user, cursor = session.cursor(), "Search session advanced");
                self.store.set(user, session);
                true
            }
            None => false,
        }
    }

    pub fn has_session(&self, user: UserId) -> bool {
        self.store.has(user)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
