// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound events fed to the relay by a transport.

use crate::id::{ChatId, UserId};

/// What a user asked the relay to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Join,
    Leave,
    ListUsers,
    Message(String),
    AdminPanel,
    AdminListReal,
    /// Target display name, if one was given.
    AdminKick(Option<String>),
    AdminReset(Option<String>),
}

/// One event from one real user, with the address replies go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user: UserId,
    pub chat: ChatId,
    pub kind: EventKind,
}

impl EventKind {
    /// Parse raw message text.
    ///
    /// Text starting with `/` is a command; `@botname` suffixes are dropped
    /// and arguments are re-joined with single spaces. Unknown commands
    /// yield `None`. Anything else is a plain message.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let Some(command) = trimmed.strip_prefix('/') else {
            if trimmed.is_empty() {
                return None;
            }
            return Some(Self::Message(text.to_owned()));
        };

        let mut words = command.split_whitespace();
        let head = words.next().unwrap_or_default();
        let name = head.split('@').next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let target = if args.is_empty() { None } else { Some(args.join(" ")) };

        let kind = match name {
            "start" => Self::Join,
            "leave" => Self::Leave,
            "users" => Self::ListUsers,
            "admin" => Self::AdminPanel,
            "realusers" => Self::AdminListReal,
            "kickuser" => Self::AdminKick(target),
            "resetuser" => Self::AdminReset(target),
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminPanel | Self::AdminListReal | Self::AdminKick(_) | Self::AdminReset(_)
        )
    }

    /// Short label for logs. Never includes message text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::ListUsers => "list_users",
            Self::Message(_) => "message",
            Self::AdminPanel => "admin_panel",
            Self::AdminListReal => "admin_list_real",
            Self::AdminKick(_) => "admin_kick",
            Self::AdminReset(_) => "admin_reset",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
