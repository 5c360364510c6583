// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the Telegram Bot API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, Update};
use crate::id::ChatId;
use crate::transport::Courier;

/// Extra time on top of the long-poll timeout before the request is abandoned.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Bot API client bound to one bot token.
pub struct TelegramClient {
    base_url: String,
    client: Client,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Self {
        let client =
            Client::builder().timeout(poll_timeout + POLL_GRACE).build().unwrap_or_default();
        let base_url = format!("{}/bot{}", api_base.trim_end_matches('/'), token);
        Self { base_url, client }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        // Request URLs carry the bot token; keep it out of error messages.
        let resp = self
            .client
            .post(self.url(method))
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let envelope: ApiResponse<T> = resp.json().await.map_err(reqwest::Error::without_url)?;
        if !envelope.ok {
            let description = envelope.description.unwrap_or_else(|| "no description".to_owned());
            anyhow::bail!("{method} failed: {description}");
        }
        envelope.result.ok_or_else(|| anyhow::anyhow!("{method} returned no result"))
    }

    /// Long-poll for updates with `update_id >= offset`.
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> anyhow::Result<Vec<Update>> {
        let body = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &body).await
    }

    pub async fn send_message(&self, chat: ChatId, text: &str) -> anyhow::Result<()> {
        let body = SendMessageRequest { chat_id: chat.0, text };
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }
}

impl Courier for TelegramClient {
    fn send<'a>(
        &'a self,
        chat: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(self.send_message(chat, text))
    }
}
