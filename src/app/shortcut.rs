//! Global shortcut that toggles the main window.

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutEvent, ShortcutState};

use super::host::dispatch;
use crate::controller::ControllerEvent;
use crate::error::{WaffleBarError, WaffleBarResult};

/// Handler given to the global-shortcut plugin. Only one shortcut is ever
/// registered, so every press is a toggle.
pub fn handle_shortcut(app: &AppHandle, _shortcut: &Shortcut, event: ShortcutEvent) {
    if event.state() == ShortcutState::Pressed {
        dispatch(app, ControllerEvent::ToggleRequested);
    }
}

/// Register the toggle shortcut.
pub fn register_toggle_shortcut(app: &AppHandle, accelerator: &str) -> WaffleBarResult<()> {
    app.global_shortcut()
        .register(accelerator)
        .map_err(|e| WaffleBarError::ShortcutError(format!("{}: {}", accelerator, e)))?;
    log::info!("[SHORTCUT] registered {}", accelerator);
    Ok(())
}

/// Swap the registered shortcut. The old one stays if the new one is rejected.
pub fn replace_toggle_shortcut(app: &AppHandle, old: &str, new: &str) -> WaffleBarResult<()> {
    register_toggle_shortcut(app, new)?;
    if let Err(e) = app.global_shortcut().unregister(old) {
        log::warn!("[SHORTCUT] failed to unregister {}: {}", old, e);
    }
    Ok(())
}
