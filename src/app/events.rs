//! Window event handlers.
//!
//! Translates Tauri window events on the main window into controller events,
//! and decides whether the process outlives a closed window.

use tauri::{Manager, Window, WindowEvent};

use super::host::{dispatch, MAIN_WINDOW_LABEL};
use crate::config;
use crate::controller::ControllerEvent;

/// Map a window event to a controller event, if it is one we track.
pub fn controller_event(label: &str, event: &WindowEvent) -> Option<ControllerEvent> {
    if label != MAIN_WINDOW_LABEL {
        return None;
    }
    match event {
        WindowEvent::Focused(true) => Some(ControllerEvent::WindowFocused),
        WindowEvent::Focused(false) => Some(ControllerEvent::WindowBlurred),
        WindowEvent::Destroyed => Some(ControllerEvent::WindowDestroyed),
        _ => None,
    }
}

/// Event to send instead of closing, or `None` to let the window close.
pub fn close_request_event(label: &str, close_to_tray: bool) -> Option<ControllerEvent> {
    (label == MAIN_WINDOW_LABEL && close_to_tray).then_some(ControllerEvent::WindowCloseRequested)
}

/// Whether an exit caused by the last window closing should be prevented.
///
/// macOS apps stay in the dock and menu bar without windows; elsewhere a
/// closed window ends the process unless it is hidden to the tray.
pub fn keep_running_without_windows(close_to_tray: bool, is_macos: bool) -> bool {
    close_to_tray || is_macos
}

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    // Hide to tray instead of closing the main window (if enabled)
    if let WindowEvent::CloseRequested { api, .. } = event {
        if let Some(event) = close_request_event(window.label(), config::app::is_close_to_tray()) {
            api.prevent_close();
            dispatch(window.app_handle(), event);
        }
        return;
    }

    if let Some(event) = controller_event(window.label(), event) {
        dispatch(window.app_handle(), event);
    }
}
