// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound send capability and the liveness probe.

pub mod http;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::id::ChatId;
use crate::state::AppState;

/// Delivers one text message to one chat.
///
/// Object-safe for use as `Arc<dyn Courier>`. Failures are returned, never
/// panicked; callers decide whether to keep going.
pub trait Courier: Send + Sync {
    fn send<'a>(
        &'a self,
        chat: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}

/// Build the health probe router.
pub fn build_health_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
