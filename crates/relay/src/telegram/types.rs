// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The subset of Bot API objects the relay reads and writes.

use serde::{Deserialize, Serialize};

use crate::event::{EventKind, InboundEvent};
use crate::id::{ChatId, UserId};

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

impl Update {
    /// Map an update to a relay event.
    ///
    /// Updates without a text message, without a sender, from bots, or with
    /// an unknown command produce `None`.
    pub fn to_event(&self) -> Option<InboundEvent> {
        let message = self.message.as_ref()?;
        let from = message.from.as_ref().filter(|u| !u.is_bot)?;
        let kind = EventKind::parse(message.text.as_deref()?)?;
        Some(InboundEvent { user: UserId(from.id), chat: ChatId(message.chat.id), kind })
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
