// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-member bookkeeping for the anonymous room.
//!
//! Sessions are kept in join order so listings and broadcasts are stable.
//! The registry knows nothing about name allocation: removing a session does
//! not release its display name, the caller does that.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::id::{ChatId, UserId};

/// A user currently joined to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub chat: ChatId,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

/// Map of active sessions keyed by real user id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: IndexMap<UserId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session joined now. Returns false if the user is already active.
    pub fn add_user(&mut self, user: UserId, chat: ChatId, display_name: impl Into<String>) -> bool {
        self.add_user_at(user, chat, display_name, Utc::now())
    }

    /// Add a session with an explicit join time.
    pub fn add_user_at(
        &mut self,
        user: UserId,
        chat: ChatId,
        display_name: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> bool {
        if self.sessions.contains_key(&user) {
            return false;
        }
        self.sessions.insert(user, Session { chat, display_name: display_name.into(), joined_at });
        true
    }

    pub fn remove_user(&mut self, user: UserId) -> bool {
        self.take_user(user).is_some()
    }

    /// Remove a session and hand it back, so the caller can release its name.
    pub fn take_user(&mut self, user: UserId) -> Option<Session> {
        self.sessions.shift_remove(&user)
    }

    pub fn is_active(&self, user: UserId) -> bool {
        self.sessions.contains_key(&user)
    }

    pub fn session(&self, user: UserId) -> Option<&Session> {
        self.sessions.get(&user)
    }

    pub fn display_name(&self, user: UserId) -> Option<&str> {
        self.sessions.get(&user).map(|s| s.display_name.as_str())
    }

    pub fn chat(&self, user: UserId) -> Option<ChatId> {
        self.sessions.get(&user).map(|s| s.chat)
    }

    /// Owned snapshot of every active session.
    pub fn all_active(&self) -> IndexMap<UserId, Session> {
        self.sessions.clone()
    }

    pub fn active_display_names(&self) -> HashSet<String> {
        self.sessions.values().map(|s| s.display_name.clone()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// First user (in join order) holding `name`.
    pub fn find_user_by_display_name(&self, name: &str) -> Option<UserId> {
        self.sessions.iter().find(|(_, s)| s.display_name == name).map(|(user, _)| *user)
    }

    /// Sessions that joined strictly after `since`.
    pub fn users_joined_since(&self, since: DateTime<Utc>) -> IndexMap<UserId, Session> {
        self.sessions
            .iter()
            .filter(|(_, s)| s.joined_at > since)
            .map(|(user, s)| (*user, s.clone()))
            .collect()
    }

    /// Drop every session, returning how many there were.
    pub fn clear_all(&mut self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        count
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
