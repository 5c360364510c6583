// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::{epoch_secs, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: f64,
    pub active_users: usize,
    pub names_available: usize,
}

/// `GET /health`
pub async fn health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    let (active_users, names_available) = {
        let relay = s.relay.lock();
        (relay.sessions().active_count(), relay.names().available_count())
    };
    Json(HealthResponse {
        status: "active".to_owned(),
        service: "anonrelay".to_owned(),
        timestamp: epoch_secs(),
        active_users,
        names_available,
    })
}
