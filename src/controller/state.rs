//! Controller state.
//!
//! `AppState` is owned by the [`Controller`](super::Controller) and only
//! changes inside `Controller::handle`.

use std::collections::HashMap;

use serde::Serialize;

/// Visibility and focus of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowState {
    Hidden,
    VisibleUnfocused,
    VisibleFocused,
}

impl WindowState {
    pub fn is_visible(self) -> bool {
        !matches!(self, WindowState::Hidden)
    }

    pub fn is_focused(self) -> bool {
        matches!(self, WindowState::VisibleFocused)
    }
}

/// Everything the controller knows about the running app.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mirrors the host window. Starts `VisibleFocused` since the window is created shown.
    pub window: WindowState,

    /// `owner/repo` of the board shown in the web view, if any.
    pub project_identifier: Option<String>,

    /// Headers from the first authorized request the web view sent to the API.
    pub auth_headers: Option<HashMap<String, String>>,

    /// Last known count. Always 0 while `project_identifier` is `None`.
    pub open_pull_request_count: u32,

    /// Sequence number handed to the most recent fetch.
    pub poll_sequence: u64,

    /// Sequence number of the newest fetch whose result was applied.
    pub last_applied_sequence: u64,

    /// Bumped on every project change or leave. Results fetched under an
    /// older epoch are dropped, even if the same board is shown again.
    pub project_epoch: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            window: WindowState::VisibleFocused,
            project_identifier: None,
            auth_headers: None,
            open_pull_request_count: 0,
            poll_sequence: 0,
            last_applied_sequence: 0,
            project_epoch: 0,
        }
    }
}

/// Read-only view of the state, sent to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub window: WindowState,
    pub project_identifier: Option<String>,
    pub open_pull_request_count: u32,
    pub badge: String,
    pub has_auth_headers: bool,
}

/// Text shown on the tray and dock badge. Zero clears it.
pub fn badge_text(count: u32) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}

/// Case-insensitive check for an `Authorization` entry.
pub fn has_authorization(headers: &HashMap<String, String>) -> bool {
    headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("authorization") && !value.trim().is_empty())
}
