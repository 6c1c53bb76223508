//! System tray setup and event handling.
//!
//! The tray owns two pieces of state the controller drives: the icon glyph
//! and the title used as the pull-request badge.

use parking_lot::Mutex;
use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    App, AppHandle, Manager,
};

use super::host::dispatch;
use crate::controller::{ControllerEvent, TrayGlyph};
use crate::error::{WaffleBarError, WaffleBarResult};

/// Id of the single tray icon.
pub const TRAY_ID: &str = "main-tray";

const TOOLTIP: &str = "Waffle";

/// Holds references to tray menu items for dynamic updates.
pub struct TrayState {
    pub toggle: MenuItem<tauri::Wry>,
}

impl TrayState {
    /// Update the show/hide menu item to match the glyph.
    pub fn update_toggle_text(&self, glyph: TrayGlyph) -> Result<(), tauri::Error> {
        self.toggle.set_text(glyph.toggle_label())
    }
}

/// Set up the system tray with menu and event handlers.
///
/// Returns a `TrayState` that should be managed by the app for dynamic updates.
pub fn setup_system_tray(app: &App) -> Result<TrayState, Box<dyn std::error::Error>> {
    let toggle = MenuItem::with_id(
        app,
        "toggle",
        TrayGlyph::Visible.toggle_label(),
        true,
        None::<&str>,
    )?;
    let quit = MenuItem::with_id(app, "quit", "Quit Waffle", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;

    let menu = Menu::with_items(app, &[&toggle, &separator, &quit])?;

    let tray_icon = Image::from_bytes(TrayGlyph::Visible.icon_bytes())?;

    let _tray = TrayIconBuilder::with_id(TRAY_ID)
        .icon(tray_icon)
        .tooltip(TOOLTIP)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| match event.id.as_ref() {
            "quit" => app.exit(0),
            "toggle" => dispatch(app, ControllerEvent::ToggleRequested),
            _ => {},
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                dispatch(tray.app_handle(), ControllerEvent::TrayClicked);
            }
        })
        .build(app)?;

    Ok(TrayState { toggle })
}

/// Initialize the system tray and register it with the app state.
///
/// This is called from the app setup hook.
pub fn init(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let tray_state = setup_system_tray(app)?;
    app.manage(Mutex::new(tray_state));
    Ok(())
}

/// Swap the tray icon and the toggle item's label.
pub fn set_glyph(app: &AppHandle, glyph: TrayGlyph) -> WaffleBarResult<()> {
    let tray = app
        .tray_by_id(TRAY_ID)
        .ok_or_else(|| WaffleBarError::TrayError("tray icon not found".to_string()))?;
    let image = Image::from_bytes(glyph.icon_bytes())
        .map_err(|e| WaffleBarError::TrayError(format!("bad {:?} icon: {}", glyph, e)))?;
    tray.set_icon(Some(image))
        .map_err(|e| WaffleBarError::TrayError(e.to_string()))?;

    if let Some(state) = app.try_state::<Mutex<TrayState>>() {
        state
            .lock()
            .update_toggle_text(glyph)
            .map_err(|e| WaffleBarError::TrayError(e.to_string()))?;
    }
    Ok(())
}

/// Set the text next to the tray icon. Empty clears it.
pub fn set_title(app: &AppHandle, text: &str) -> WaffleBarResult<()> {
    let tray = app
        .tray_by_id(TRAY_ID)
        .ok_or_else(|| WaffleBarError::TrayError("tray icon not found".to_string()))?;
    tray.set_title(Some(text))
        .map_err(|e| WaffleBarError::TrayError(e.to_string()))
}
