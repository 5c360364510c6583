// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests against a local fake of the Bot API.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use anonrelay::catalog::{Catalog, CatalogEntry};
use anonrelay::dispatch::Dispatcher;
use anonrelay::id::ChatId;
use anonrelay::relay::Relay;
use anonrelay::state::AppState;
use anonrelay::telegram::client::TelegramClient;
use anonrelay::telegram::poller;

const TOKEN: &str = "4242:secret-token";
const BLOCKED_CHAT: i64 = 77;

#[derive(Default)]
struct FakeApi {
    pending: Mutex<Vec<Value>>,
    offsets: Mutex<Vec<i64>>,
    sent: Mutex<Vec<(i64, String)>>,
}

impl FakeApi {
    fn sent_to(&self, chat: i64) -> Vec<String> {
        self.sent.lock().iter().filter(|(c, _)| *c == chat).map(|(_, t)| t.clone()).collect()
    }
}

async fn get_updates(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Json<Value> {
    let offset = body["offset"].as_i64().unwrap_or_default();
    api.offsets.lock().push(offset);
    let ready: Vec<Value> = api
        .pending
        .lock()
        .iter()
        .filter(|u| u["update_id"].as_i64().unwrap_or_default() >= offset)
        .cloned()
        .collect();
    if ready.is_empty() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    Json(json!({ "ok": true, "result": ready }))
}

async fn send_message(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Json<Value> {
    let chat = body["chat_id"].as_i64().unwrap_or_default();
    if chat == BLOCKED_CHAT {
        return Json(json!({ "ok": false, "description": "Forbidden: bot was blocked by the user" }));
    }
    let text = body["text"].as_str().unwrap_or_default().to_owned();
    api.sent.lock().push((chat, text));
    Json(json!({ "ok": true, "result": { "message_id": 1 } }))
}

/// Serve the fake API on an ephemeral port and return its base URL.
async fn spawn_fake(api: Arc<FakeApi>) -> anyhow::Result<String> {
    let router = Router::new()
        .route(&format!("/bot{TOKEN}/getUpdates"), post(get_updates))
        .route(&format!("/bot{TOKEN}/sendMessage"), post(send_message))
        .with_state(api);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}"))
}

fn ensure_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn text_update(update_id: i64, user: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "chat": { "id": user },
            "from": { "id": user, "is_bot": false },
            "text": text,
        }
    })
}

#[tokio::test]
async fn send_message_error_hides_token() -> anyhow::Result<()> {
    ensure_crypto();
    let api = Arc::new(FakeApi::default());
    let base = spawn_fake(Arc::clone(&api)).await?;
    let client = TelegramClient::new(&base, TOKEN, Duration::from_secs(1));

    client.send_message(ChatId(5), "hello").await?;
    assert_eq!(api.sent_to(5), vec!["hello".to_owned()]);

    let err = client.send_message(ChatId(BLOCKED_CHAT), "hello").await.err();
    let msg = err.map(|e| format!("{e:#}")).unwrap_or_default();
    assert!(msg.contains("blocked"), "unexpected error: {msg}");
    assert!(!msg.contains(TOKEN));
    Ok(())
}

#[tokio::test]
async fn unreachable_api_error_hides_token() {
    ensure_crypto();
    let client = TelegramClient::new("http://127.0.0.1:9", TOKEN, Duration::from_secs(1));
    let msg = client.send_message(ChatId(1), "hi").await.err().map(|e| format!("{e:#}"));
    let msg = msg.unwrap_or_default();
    assert!(!msg.is_empty());
    assert!(!msg.contains(TOKEN));
}

#[tokio::test]
async fn poller_relays_messages_between_members() -> anyhow::Result<()> {
    ensure_crypto();
    let api = Arc::new(FakeApi::default());
    api.pending.lock().extend([
        text_update(10, 1, "/start"),
        text_update(11, 2, "/start"),
        json!({ "update_id": 12 }),
        text_update(13, 1, "is anyone here?"),
    ]);
    let base = spawn_fake(Arc::clone(&api)).await?;

    let catalog = Catalog::from_entries(
        ["Amber", "Birch", "Cedar"].iter().map(|n| CatalogEntry::new(*n, "🌲")),
    );
    let shutdown = CancellationToken::new();
    let state = Arc::new(AppState::new(Relay::with_catalog(catalog, None), shutdown.clone()));
    let client = Arc::new(TelegramClient::new(&base, TOKEN, Duration::from_secs(1)));
    let dispatcher = Dispatcher::new(Arc::clone(&state), client.clone());

    let handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            poller::run(&client, &dispatcher, Duration::from_secs(1), shutdown).await;
        })
    };

    let mut receipt = None;
    for _ in 0..100 {
        receipt = api.sent_to(1).into_iter().find(|t| t.starts_with("✅ Message sent as"));
        // The poll after the batch must ask for updates past the last id.
        if receipt.is_some() && api.offsets.lock().contains(&14) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle).await??;

    let receipt = receipt.ok_or_else(|| anyhow::anyhow!("no receipt for sender"))?;
    assert!(receipt.ends_with("to 1 user(s)"), "receipt: {receipt}");
    assert!(api.sent_to(2).iter().any(|t| t.ends_with(": is anyone here?")));
    assert_eq!(api.offsets.lock().first(), Some(&0));
    assert!(api.offsets.lock().contains(&14));
    assert_eq!(state.relay.lock().sessions().active_count(), 2);
    Ok(())
}
