// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telegram Bot API transport: a long-polling update feed and a courier.

pub mod client;
pub mod poller;
pub mod types;
