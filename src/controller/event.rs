//! Input events consumed by the controller.

use std::collections::HashMap;

/// Everything that can move the controller.
///
/// Tray clicks, window events, IPC calls from the web view, the poll timer,
/// and finished fetches all arrive as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Left click on the tray icon.
    TrayClicked,
    /// Toggle from the tray menu, global shortcut, or frontend.
    ToggleRequested,
    /// Bring the window forward without ever hiding it (second launch, dock reopen).
    ShowRequested,
    /// Main window lost focus.
    WindowBlurred,
    /// Main window gained focus.
    WindowFocused,
    /// User clicked the window's close button.
    WindowCloseRequested,
    /// Main window was destroyed. The next show re-creates it.
    WindowDestroyed,
    /// Web view navigated to a board.
    ProjectChanged(String),
    /// Web view left any board.
    ProjectLeft,
    /// Web view sent an authorized request to the API.
    AuthHeadersCaptured(HashMap<String, String>),
    /// Poll timer fired.
    PollTick,
    /// A fetch started by `PollTick` finished.
    PollCompleted {
        sequence: u64,
        /// `project_epoch` the fetch was started under.
        epoch: u64,
        count: u32,
    },
    /// A fetch started by `PollTick` failed.
    PollFailed { sequence: u64, reason: String },
}
