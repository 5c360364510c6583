// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Long-poll loop feeding Bot API updates into the dispatcher.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::client::TelegramClient;
use crate::dispatch::Dispatcher;

const MIN_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Poll for updates until `shutdown` fires.
///
/// Updates are handled one at a time in arrival order. The offset advances
/// past every update, including ones that do not map to an event.
pub async fn run(
    client: &TelegramClient,
    dispatcher: &Dispatcher,
    poll_timeout: Duration,
    shutdown: CancellationToken,
) {
    info!("telegram poller started");
    let mut offset = 0i64;
    let mut backoff = MIN_BACKOFF;

    loop {
        let result = tokio::select! {
            _ = shutdown.cancelled() => break,
            r = client.get_updates(offset, poll_timeout) => r,
        };

        let updates = match result {
            Ok(updates) => {
                backoff = MIN_BACKOFF;
                updates
            }
            Err(e) => {
                warn!(err = %e, retry_in_secs = backoff.as_secs(), "getUpdates failed");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(backoff) => {}
                }
                backoff = (backoff * 2).min(MAX_BACKOFF);
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            match update.to_event() {
                Some(event) => {
                    dispatcher.handle(event).await;
                }
                None => debug!(update_id = update.update_id, "ignoring update"),
            }
        }
    }

    info!("telegram poller stopped");
}
