// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::relay::Relay;

/// Shared process state.
///
/// The relay sits behind a single mutex: every event's state transition runs
/// to completion under it, and nothing awaits while it is held.
pub struct AppState {
    pub relay: Mutex<Relay>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(relay: Relay, shutdown: CancellationToken) -> Self {
        Self { relay: Mutex::new(relay), shutdown }
    }
}

/// Return current epoch seconds with sub-second precision.
pub fn epoch_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
