//! Main window creation.

use tauri::{Manager, WebviewUrl, WebviewWindowBuilder, Wry};

use super::host::MAIN_WINDOW_LABEL;
use crate::config::app::WAFFLE_APP_URL;

/// Injected into every page of the main window. Reports project navigation
/// and the first authorized API request back to Rust.
pub const BRIDGE_SCRIPT: &str = include_str!("bridge.js");

/// Create the main window: frameless, fixed size, maximized, shown and focused.
///
/// Called once from setup, and again whenever the window is shown after it
/// was destroyed.
pub fn create_main_window<M: Manager<Wry>>(app: &M) -> Result<(), Box<dyn std::error::Error>> {
    let url = WebviewUrl::External(WAFFLE_APP_URL.parse()?);

    let window = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, url)
        .title("Waffle")
        .inner_size(800.0, 600.0)
        .decorations(false)
        .always_on_top(false)
        .resizable(false)
        .visible(true)
        .focused(true)
        .initialization_script(BRIDGE_SCRIPT)
        .build()?;

    window.maximize()?;
    Ok(())
}
