//! Side effects requested by the controller.

use std::collections::HashMap;

/// Tray icon image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayGlyph {
    Visible,
    Hidden,
}

impl TrayGlyph {
    /// Bundled PNG for this glyph.
    pub fn icon_bytes(self) -> &'static [u8] {
        match self {
            TrayGlyph::Visible => include_bytes!("../../icons/visible.png"),
            TrayGlyph::Hidden => include_bytes!("../../icons/hidden.png"),
        }
    }

    /// Label for the tray menu item that toggles the window.
    pub fn toggle_label(self) -> &'static str {
        match self {
            TrayGlyph::Visible => "Hide Waffle",
            TrayGlyph::Hidden => "Show Waffle",
        }
    }
}

/// One fetch of a project's cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub sequence: u64,
    /// Echoed back in `PollCompleted`.
    pub epoch: u64,
    pub project: String,
    pub headers: HashMap<String, String>,
}

/// Work for the host after a transition. Applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    HideWindow,
    ShowWindow,
    FocusWindow,
    SetTrayGlyph(TrayGlyph),
    /// Tray title and dock badge. Empty string clears both.
    SetBadge(String),
    /// Fire-and-forget; the result comes back as `PollCompleted` or `PollFailed`.
    Fetch(FetchRequest),
}
