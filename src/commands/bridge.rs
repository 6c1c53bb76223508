//! Commands called by the bridge script injected into the main window,
//! plus a toggle and status query for anything else in the frontend.

use std::collections::HashMap;

use tauri::{command, AppHandle, Manager};

use crate::app::dispatch;
use crate::controller::{ControllerEvent, SharedController, StatusSnapshot};
use crate::error::{WaffleBarError, WaffleBarResult};

/// The web view navigated to a board.
#[command]
pub fn project_changed(app: AppHandle, identifier: String) {
    dispatch(&app, ControllerEvent::ProjectChanged(identifier));
}

/// The web view left any board.
#[command]
pub fn project_left(app: AppHandle) {
    dispatch(&app, ControllerEvent::ProjectLeft);
}

/// The web view sent an authorized request to the API. Only the first one sticks.
#[command]
pub fn capture_auth_headers(app: AppHandle, headers: HashMap<String, String>) {
    dispatch(&app, ControllerEvent::AuthHeadersCaptured(headers));
}

/// Same as clicking the tray icon.
#[command]
pub fn toggle_window(app: AppHandle) {
    dispatch(&app, ControllerEvent::ToggleRequested);
}

/// Current window, project, and badge state.
#[command]
pub fn get_status(app: AppHandle) -> WaffleBarResult<StatusSnapshot> {
    let controller = app
        .try_state::<SharedController>()
        .ok_or(WaffleBarError::StateMissing("controller"))?;
    let snapshot = controller.lock().snapshot();
    Ok(snapshot)
}
