// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Rejections produced while handling an inbound event.
///
/// None of these are fatal: each one becomes a reply to the user who sent
/// the event and leaves relay state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Every catalog name is active or permanently claimed.
    NameExhausted,
    AlreadyActive { display_name: String },
    NotActive,
    TargetNotFound { name: String },
    NoAssignment { name: String },
    MissingArgument { usage: &'static str },
    Unauthorized,
}

impl RelayError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameExhausted => "NAME_EXHAUSTED",
            Self::AlreadyActive { .. } => "ALREADY_ACTIVE",
            Self::NotActive => "NOT_ACTIVE",
            Self::TargetNotFound { .. } => "TARGET_NOT_FOUND",
            Self::NoAssignment { .. } => "NO_ASSIGNMENT",
            Self::MissingArgument { .. } => "MISSING_ARGUMENT",
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }

    /// Text sent back to the user whose event was rejected.
    pub fn user_message(&self) -> String {
        match self {
            Self::NameExhausted => {
                "❌ Sorry, there are no names available right now. Try again later.".to_owned()
            }
            Self::AlreadyActive { display_name } => format!(
                "You are already in the anonymous room as: {display_name}\n\
                 Send a message and it will be relayed to every member."
            ),
            Self::NotActive => {
                "❌ You are not in the anonymous room. Use /start to join.".to_owned()
            }
            Self::TargetNotFound { name } => format!("❌ User '{name}' not found."),
            Self::NoAssignment { name } => {
                format!("❌ No permanent assignment found for '{name}'.")
            }
            Self::MissingArgument { usage } => format!("❌ Usage: {usage}"),
            Self::Unauthorized => "❌ You do not have admin permissions.".to_owned(),
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for RelayError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
