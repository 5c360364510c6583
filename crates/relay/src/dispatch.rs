// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs inbound events through the relay and delivers the result.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::event::InboundEvent;
use crate::relay::{Outcome, Reply, SendIntent};
use crate::state::AppState;
use crate::transport::Courier;

/// Deliver every intent, best-effort. Returns how many sends succeeded.
///
/// A failed send is logged and skipped; it never stops the rest of the batch.
pub async fn deliver_all(courier: &dyn Courier, intents: &[SendIntent]) -> usize {
    let mut delivered = 0;
    for intent in intents {
        match courier.send(intent.chat, &intent.text).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                warn!(user = %intent.user, chat = %intent.chat, err = %e, "delivery failed");
            }
        }
    }
    delivered
}

/// Ties shared relay state to an outbound courier.
pub struct Dispatcher {
    state: Arc<AppState>,
    courier: Arc<dyn Courier>,
}

impl Dispatcher {
    pub fn new(state: Arc<AppState>, courier: Arc<dyn Courier>) -> Self {
        Self { state, courier }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Handle one event end to end. Returns the number of fan-out deliveries.
    pub async fn handle(&self, event: InboundEvent) -> usize {
        debug!(user = %event.user, kind = event.kind.label(), "dispatching event");

        // Lock scope ends before any send is awaited.
        let result = self.state.relay.lock().handle(&event);

        match result {
            Ok(outcome) => self.execute(&event, outcome).await,
            Err(e) => {
                debug!(user = %event.user, code = e.as_str(), "event rejected");
                self.reply(&event, &e.user_message()).await;
                0
            }
        }
    }

    async fn execute(&self, event: &InboundEvent, outcome: Outcome) -> usize {
        let Outcome { reply, notice, fanout } = outcome;
        match reply {
            Reply::Receipt { .. } => {
                let delivered = deliver_all(self.courier.as_ref(), &fanout).await;
                self.reply(event, &reply.render(delivered)).await;
                delivered
            }
            Reply::Text(ref text) => {
                self.reply(event, text).await;
                if let Some(notice) = notice {
                    if let Err(e) = self.courier.send(notice.chat, &notice.text).await {
                        warn!(user = %notice.user, err = %e, "could not notify kicked user");
                    }
                }
                deliver_all(self.courier.as_ref(), &fanout).await
            }
        }
    }

    async fn reply(&self, event: &InboundEvent, text: &str) {
        if let Err(e) = self.courier.send(event.chat, text).await {
            warn!(user = %event.user, chat = %event.chat, err = %e, "reply failed");
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
