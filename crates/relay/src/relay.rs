// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The anonymous room: name allocation and session bookkeeping composed
//! into per-event state transitions.
//!
//! [`Relay::handle`] never performs I/O. It mutates state and returns an
//! [`Outcome`] describing what to send; the dispatcher delivers it.

use indexmap::IndexMap;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::RelayError;
use crate::event::{EventKind, InboundEvent};
use crate::id::{ChatId, UserId};
use crate::names::NameAllocator;
use crate::registry::{Session, SessionRegistry};

const KICK_USAGE: &str = "/kickuser [anonymous name]\nExample: /kickuser 🐺 Mysterious Wolf";
const RESET_USAGE: &str = "/resetuser [anonymous name]\nExample: /resetuser 🐺 Mysterious Wolf";

/// One outbound message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendIntent {
    pub user: UserId,
    pub chat: ChatId,
    pub text: String,
}

/// The reply owed to the user who sent the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Rendered after fan-out, once the delivered count is known.
    Receipt { display_name: String },
}

impl Reply {
    pub fn render(&self, delivered: usize) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Receipt { display_name } => {
                format!("✅ Message sent as {display_name} to {delivered} user(s)")
            }
        }
    }
}

/// Everything an event asks the transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    /// Direct notice to a third party (the kicked user).
    pub notice: Option<SendIntent>,
    pub fanout: Vec<SendIntent>,
}

impl Outcome {
    fn reply(text: impl Into<String>) -> Self {
        Self { reply: Reply::Text(text.into()), notice: None, fanout: Vec::new() }
    }

    fn with_fanout(mut self, fanout: Vec<SendIntent>) -> Self {
        self.fanout = fanout;
        self
    }
}

/// Build one send intent per session, skipping `exclude`.
pub fn broadcast_plan(
    sessions: &IndexMap<UserId, Session>,
    exclude: Option<UserId>,
    text: &str,
) -> Vec<SendIntent> {
    sessions
        .iter()
        .filter(|(user, _)| Some(**user) != exclude)
        .map(|(user, s)| SendIntent { user: *user, chat: s.chat, text: text.to_owned() })
        .collect()
}

/// Name allocator and session registry, mutated together as one unit.
pub struct Relay {
    names: NameAllocator,
    sessions: SessionRegistry,
    admin: Option<UserId>,
}

impl Relay {
    pub fn new(names: NameAllocator, admin: Option<UserId>) -> Self {
        Self { names, sessions: SessionRegistry::new(), admin }
    }

    /// Relay over `catalog` with an OS-seeded random source.
    pub fn with_catalog(catalog: Catalog, admin: Option<UserId>) -> Self {
        Self::new(NameAllocator::new(catalog), admin)
    }

    pub fn names(&self) -> &NameAllocator {
        &self.names
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.admin == Some(user)
    }

    pub fn handle(&mut self, event: &InboundEvent) -> Result<Outcome, RelayError> {
        if event.kind.is_admin() && !self.is_admin(event.user) {
            return Err(RelayError::Unauthorized);
        }
        match &event.kind {
            EventKind::Join => self.join(event.user, event.chat),
            EventKind::Leave => self.leave(event.user),
            EventKind::ListUsers => self.list_users(event.user),
            EventKind::Message(text) => self.message(event.user, text),
            EventKind::AdminPanel => Ok(self.admin_panel()),
            EventKind::AdminListReal => Ok(self.admin_list_real()),
            EventKind::AdminKick(target) => {
                self.kick(target.as_deref().ok_or(RelayError::MissingArgument { usage: KICK_USAGE })?)
            }
            EventKind::AdminReset(target) => {
                self.reset(target.as_deref().ok_or(RelayError::MissingArgument { usage: RESET_USAGE })?)
            }
        }
    }

    pub fn join(&mut self, user: UserId, chat: ChatId) -> Result<Outcome, RelayError> {
        if let Some(display_name) = self.sessions.display_name(user) {
            return Err(RelayError::AlreadyActive { display_name: display_name.to_owned() });
        }

        let active = self.sessions.active_display_names();
        let name = self.names.allocate(user, &active).ok_or(RelayError::NameExhausted)?;
        if !self.sessions.add_user(user, chat, name.clone()) {
            return Err(RelayError::AlreadyActive { display_name: name });
        }
        info!(%user, active = self.sessions.active_count(), "user joined");

        let welcome = format!(
            "🎭 Welcome to the anonymous room!\n\n\
             Your anonymous identity is: {name}\n\n\
             Every message you send is relayed to all members under that name.\n\n\
             Commands:\n\
             • /users - list connected users\n\
             • /leave - leave the room\n\
             • send any message to chat"
        );
        let notice = format!("📢 {name} joined the anonymous room");
        let fanout = broadcast_plan(&self.sessions.all_active(), Some(user), &notice);
        Ok(Outcome::reply(welcome).with_fanout(fanout))
    }

    pub fn leave(&mut self, user: UserId) -> Result<Outcome, RelayError> {
        let session = self.sessions.take_user(user).ok_or(RelayError::NotActive)?;
        self.names.release(&session.display_name, user);
        info!(%user, active = self.sessions.active_count(), "user left");

        let notice = format!("📢 {} left the anonymous room", session.display_name);
        let fanout = broadcast_plan(&self.sessions.all_active(), Some(user), &notice);
        Ok(Outcome::reply(
            "👋 You left the anonymous room.\nUse /start to join again whenever you like.",
        )
        .with_fanout(fanout))
    }

    pub fn list_users(&self, user: UserId) -> Result<Outcome, RelayError> {
        if !self.sessions.is_active(user) {
            return Err(RelayError::NotActive);
        }
        let active = self.sessions.all_active();
        let lines: Vec<String> = active.values().map(|s| format!("• {}", s.display_name)).collect();
        Ok(Outcome::reply(format!(
            "👥 Connected users ({}):\n\n{}",
            active.len(),
            lines.join("\n")
        )))
    }

    pub fn message(&self, user: UserId, text: &str) -> Result<Outcome, RelayError> {
        let display_name = self.sessions.display_name(user).ok_or(RelayError::NotActive)?;
        let formatted = format!("{display_name}: {text}");
        let fanout = broadcast_plan(&self.sessions.all_active(), Some(user), &formatted);
        Ok(Outcome {
            reply: Reply::Receipt { display_name: display_name.to_owned() },
            notice: None,
            fanout,
        })
    }

    pub fn admin_panel(&self) -> Outcome {
        Outcome::reply(format!(
            "🔧 Admin panel\n\n\
             👥 Active users: {}\n\
             🎭 Available names: {}/{}\n\n\
             Admin commands:\n\
             • /realusers - show real user information\n\
             • /kickuser [name] - kick a user by anonymous name\n\
             • /resetuser [name] - reset a permanent name assignment",
            self.sessions.active_count(),
            self.names.available_count(),
            self.names.total_count(),
        ))
    }

    pub fn admin_list_real(&self) -> Outcome {
        let active = self.sessions.all_active();
        if active.is_empty() {
            return Outcome::reply("👥 No active users.");
        }
        let entries: Vec<String> = active
            .iter()
            .map(|(user, s)| {
                format!(
                    "• {}\n  ID: {}\n  Joined: {}",
                    s.display_name,
                    user,
                    s.joined_at.format("%Y-%m-%d %H:%M")
                )
            })
            .collect();
        Outcome::reply(format!("🔍 Real user information:\n\n{}", entries.join("\n\n")))
    }

    pub fn kick(&mut self, target: &str) -> Result<Outcome, RelayError> {
        let user = self
            .sessions
            .find_user_by_display_name(target)
            .ok_or_else(|| RelayError::TargetNotFound { name: target.to_owned() })?;
        let session = self
            .sessions
            .take_user(user)
            .ok_or_else(|| RelayError::TargetNotFound { name: target.to_owned() })?;
        self.names.release(&session.display_name, user);
        info!(%user, "user kicked by admin");

        let notice = SendIntent {
            user,
            chat: session.chat,
            text: "❌ You have been removed from the anonymous room by an administrator."
                .to_owned(),
        };
        let fanout = broadcast_plan(
            &self.sessions.all_active(),
            None,
            &format!("📢 {} was removed from the room", session.display_name),
        );
        Ok(Outcome {
            reply: Reply::Text(format!("✅ User '{target}' removed from the room.")),
            notice: Some(notice),
            fanout,
        })
    }

    pub fn reset(&mut self, target: &str) -> Result<Outcome, RelayError> {
        let user = self
            .sessions
            .find_user_by_display_name(target)
            .ok_or_else(|| RelayError::TargetNotFound { name: target.to_owned() })?;
        if !self.names.remove_permanent_assignment(user) {
            return Err(RelayError::NoAssignment { name: target.to_owned() });
        }
        info!(%user, "permanent name assignment reset by admin");
        Ok(Outcome::reply(format!(
            "✅ Permanent assignment reset for '{target}'.\n\
             Next time they join they will receive a different name."
        )))
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
