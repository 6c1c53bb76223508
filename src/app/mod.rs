//! Application lifecycle and platform integration.
//!
//! - `host`: runs controller events and applies their effects
//! - `window`: main window and the injected bridge script
//! - `menu`: application menu
//! - `tray`: system tray setup and menu handling
//! - `events`: window event handlers
//! - `poller`: the poll timer
//! - `shortcut`: global toggle shortcut

pub mod events;
pub mod host;
pub mod poller;
pub mod window;

#[cfg(desktop)]
pub mod menu;
#[cfg(desktop)]
pub mod shortcut;
#[cfg(desktop)]
pub mod tray;

pub use host::{dispatch, MAIN_WINDOW_LABEL};

// Re-export TrayState for external use
#[cfg(desktop)]
pub use tray::TrayState;
