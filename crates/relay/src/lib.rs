// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Anonrelay: an anonymous chat room relayed through a Telegram bot.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod id;
pub mod names;
pub mod registry;
pub mod relay;
pub mod state;
pub mod telegram;
pub mod transport;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::RelayConfig;
use crate::dispatch::Dispatcher;
use crate::relay::Relay;
use crate::state::AppState;
use crate::telegram::client::TelegramClient;
use crate::transport::build_health_router;

/// Run the bot until shutdown.
pub async fn run(config: RelayConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let catalog = config.catalog()?;
    info!(names = catalog.len(), admin = config.admin().is_some(), "loaded name catalog");

    let relay = Relay::with_catalog(catalog, config.admin());
    let state = Arc::new(AppState::new(relay, shutdown.clone()));

    let addr = config.health_addr();
    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("binding health probe on {addr}"))?;
    info!("health probe listening on {addr}");
    {
        let router = build_health_router(Arc::clone(&state));
        let sd = shutdown.clone();
        tokio::spawn(async move {
            let result = axum::serve(listener, router).with_graceful_shutdown(sd.cancelled_owned()).await;
            if let Err(e) = result {
                error!("health server error: {e}");
            }
        });
    }

    let client = Arc::new(TelegramClient::new(&config.api_base, config.bot_token(), config.poll_timeout()));
    let dispatcher = Dispatcher::new(Arc::clone(&state), client.clone());
    telegram::poller::run(&client, &dispatcher, config.poll_timeout(), state.shutdown.clone()).await;

    Ok(())
}
