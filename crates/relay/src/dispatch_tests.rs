// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::sync::CancellationToken;

use super::{deliver_all, Dispatcher};
use crate::catalog::{Catalog, CatalogEntry};
use crate::event::{EventKind, InboundEvent};
use crate::id::{ChatId, UserId};
use crate::names::NameAllocator;
use crate::relay::{Relay, SendIntent};
use crate::state::AppState;
use crate::transport::Courier;

const ADMIN: i64 = 500;

/// Courier that records every send and fails for chosen chats.
#[derive(Default)]
struct RecordingCourier {
    sent: Mutex<Vec<(ChatId, String)>>,
    failing: Mutex<HashSet<ChatId>>,
}

impl RecordingCourier {
    fn fail_for(&self, chat: ChatId) {
        self.failing.lock().insert(chat);
    }

    fn sent_to(&self, chat: ChatId) -> Vec<String> {
        self.sent.lock().iter().filter(|(c, _)| *c == chat).map(|(_, t)| t.clone()).collect()
    }

    fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Courier for RecordingCourier {
    fn send<'a>(
        &'a self,
        chat: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if self.failing.lock().contains(&chat) {
                anyhow::bail!("chat {chat} blocked the bot");
            }
            self.sent.lock().push((chat, text.to_owned()));
            Ok(())
        })
    }
}

fn chat(user: i64) -> ChatId {
    ChatId(user * 10)
}

fn event(user: i64, kind: EventKind) -> InboundEvent {
    InboundEvent { user: UserId(user), chat: chat(user), kind }
}

fn setup() -> (Dispatcher, Arc<RecordingCourier>) {
    let catalog = Catalog::from_entries(
        ["Alpha", "Bravo", "Charlie", "Delta", "Echo"].iter().map(|n| CatalogEntry::new(*n, "🎲")),
    );
    let names = NameAllocator::with_rng(catalog, StdRng::seed_from_u64(9));
    let relay = Relay::new(names, Some(UserId(ADMIN)));
    let state = Arc::new(AppState::new(relay, CancellationToken::new()));
    let courier = Arc::new(RecordingCourier::default());
    (Dispatcher::new(state, courier.clone()), courier)
}

fn intents(n: i64) -> Vec<SendIntent> {
    (1..=n).map(|u| SendIntent { user: UserId(u), chat: chat(u), text: "hi".into() }).collect()
}

#[tokio::test]
async fn deliver_all_counts_successes() {
    let courier = RecordingCourier::default();
    assert_eq!(deliver_all(&courier, &intents(4)).await, 4);

    courier.fail_for(chat(2));
    courier.fail_for(chat(3));
    assert_eq!(deliver_all(&courier, &intents(4)).await, 2);
    // Failures in the middle do not stop later recipients.
    assert_eq!(courier.sent_to(chat(4)).len(), 2);
}

#[tokio::test]
async fn message_receipt_reports_successful_deliveries() -> anyhow::Result<()> {
    let (dispatcher, courier) = setup();
    for user in 1..=4 {
        dispatcher.handle(event(user, EventKind::Join)).await;
    }
    courier.clear();
    courier.fail_for(chat(3));

    let delivered = dispatcher.handle(event(1, EventKind::Message("hello".into()))).await;
    assert_eq!(delivered, 2);

    let receipt = courier.sent_to(chat(1));
    assert_eq!(receipt.len(), 1);
    assert!(receipt[0].ends_with("to 2 user(s)"), "receipt: {}", receipt[0]);
    assert!(courier.sent_to(chat(2))[0].ends_with(": hello"));
    assert!(courier.sent_to(chat(3)).is_empty());
    Ok(())
}

#[tokio::test]
async fn join_broadcast_excludes_joiner() {
    let (dispatcher, courier) = setup();
    dispatcher.handle(event(1, EventKind::Join)).await;
    dispatcher.handle(event(2, EventKind::Join)).await;

    let to_joiner = courier.sent_to(chat(2));
    assert_eq!(to_joiner.len(), 1);
    assert!(to_joiner[0].contains("Welcome"));
    assert!(courier.sent_to(chat(1)).iter().any(|t| t.contains("joined")));
}

#[tokio::test]
async fn rejection_is_replied_without_state_change() {
    let (dispatcher, courier) = setup();
    let delivered = dispatcher.handle(event(7, EventKind::Leave)).await;
    assert_eq!(delivered, 0);
    assert!(courier.sent_to(chat(7))[0].contains("not in the anonymous room"));

    dispatcher.handle(event(7, EventKind::AdminPanel)).await;
    assert!(courier.sent_to(chat(7))[1].contains("admin permissions"));
    assert_eq!(dispatcher.state().relay.lock().sessions().active_count(), 0);
}

#[tokio::test]
async fn kick_notifies_target_even_if_broadcast_fails() -> anyhow::Result<()> {
    let (dispatcher, courier) = setup();
    for user in 1..=3 {
        dispatcher.handle(event(user, EventKind::Join)).await;
    }
    let target = dispatcher
        .state()
        .relay
        .lock()
        .sessions()
        .display_name(UserId(2))
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("user 2 not active"))?;
    courier.clear();
    courier.fail_for(chat(1));

    let delivered = dispatcher.handle(event(ADMIN, EventKind::AdminKick(Some(target)))).await;
    assert_eq!(delivered, 1);
    assert!(courier.sent_to(chat(ADMIN))[0].contains("removed from the room"));
    assert!(courier.sent_to(chat(2))[0].contains("removed from the anonymous room"));
    assert_eq!(courier.sent_to(chat(3)).len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_reply_does_not_block_fanout() {
    let (dispatcher, courier) = setup();
    dispatcher.handle(event(1, EventKind::Join)).await;
    courier.fail_for(chat(2));

    let delivered = dispatcher.handle(event(2, EventKind::Join)).await;
    assert_eq!(delivered, 1);
    assert!(dispatcher.state().relay.lock().sessions().is_active(UserId(2)));
}
