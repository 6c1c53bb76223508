//! Window visibility and pull-request badge state machine.
//!
//! The controller never touches the GUI. It consumes [`ControllerEvent`]s
//! and returns the [`Effect`]s the host must apply, which keeps every
//! transition testable without a window or tray.
//!
//! Window transitions:
//!
//! | state            | toggle                     | blur                          | focus          | close          |
//! |------------------|----------------------------|-------------------------------|----------------|----------------|
//! | VisibleFocused   | Hidden                     | Hidden / VisibleUnfocused (1) | -              | Hidden         |
//! | VisibleUnfocused | VisibleFocused             | -                             | VisibleFocused | Hidden         |
//! | Hidden           | VisibleFocused             | -                             | -              | -              |
//!
//! (1) depends on `hide_on_blur`.
//!
//! A tray click that lands right after a blur already hid the window is
//! swallowed: on some platforms pressing the tray icon blurs the window
//! first, and the click was meant as "hide".
//!
//! `WindowDestroyed` moves any state to `Hidden`; the host re-creates the
//! window on the next show.

mod effect;
mod event;
mod state;


use std::collections::HashMap;
use std::time::{Duration, Instant};

pub use effect::{Effect, FetchRequest, TrayGlyph};
pub use event::ControllerEvent;
pub use state::{badge_text, has_authorization, AppState, StatusSnapshot, WindowState};

/// How long after a blur-hide a tray click is treated as part of the same gesture.
pub const TRAY_CLICK_BLUR_GRACE: Duration = Duration::from_millis(300);

/// Controller as registered in Tauri managed state.
pub type SharedController = parking_lot::Mutex<Controller>;

/// Owns [`AppState`] and applies events to it.
#[derive(Debug)]
pub struct Controller {
    state: AppState,
    hide_on_blur: bool,
    blur_hidden_at: Option<Instant>,
}

impl Controller {
    pub fn new(hide_on_blur: bool) -> Self {
        Self {
            state: AppState::default(),
            hide_on_blur,
            blur_hidden_at: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn hide_on_blur(&self) -> bool {
        self.hide_on_blur
    }

    pub fn set_hide_on_blur(&mut self, hide_on_blur: bool) {
        self.hide_on_blur = hide_on_blur;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            window: self.state.window,
            project_identifier: self.state.project_identifier.clone(),
            open_pull_request_count: self.state.open_pull_request_count,
            badge: badge_text(self.state.open_pull_request_count),
            has_auth_headers: self.state.auth_headers.is_some(),
        }
    }

    /// The single transition function.
    pub fn handle(&mut self, event: ControllerEvent) -> Vec<Effect> {
        self.handle_at(event, Instant::now())
    }

    /// [`handle`](Self::handle) with an explicit clock reading.
    pub fn handle_at(&mut self, event: ControllerEvent, now: Instant) -> Vec<Effect> {
        match event {
            ControllerEvent::TrayClicked => self.on_tray_click(now),
            ControllerEvent::ToggleRequested => self.toggle(),
            ControllerEvent::ShowRequested => self.show(),
            ControllerEvent::WindowBlurred => self.on_blur(now),
            ControllerEvent::WindowFocused => {
                if self.state.window == WindowState::VisibleUnfocused {
                    self.state.window = WindowState::VisibleFocused;
                }
                Vec::new()
            },
            ControllerEvent::WindowCloseRequested => self.hide_if_visible(),
            ControllerEvent::WindowDestroyed => {
                let was_visible = self.state.window.is_visible();
                self.state.window = WindowState::Hidden;
                self.blur_hidden_at = None;
                if was_visible {
                    vec![Effect::SetTrayGlyph(TrayGlyph::Hidden)]
                } else {
                    Vec::new()
                }
            },
            ControllerEvent::ProjectChanged(identifier) => {
                let identifier = identifier.trim();
                if identifier.is_empty() {
                    self.set_project(None)
                } else {
                    self.set_project(Some(identifier.to_string()))
                }
            },
            ControllerEvent::ProjectLeft => self.set_project(None),
            ControllerEvent::AuthHeadersCaptured(headers) => {
                self.capture_auth_headers(headers);
                Vec::new()
            },
            ControllerEvent::PollTick => self.on_poll_tick(),
            ControllerEvent::PollCompleted {
                sequence,
                epoch,
                count,
            } => self.on_poll_completed(sequence, epoch, count),
            ControllerEvent::PollFailed { sequence, reason } => {
                log::debug!("[CONTROLLER] poll #{} failed: {}", sequence, reason);
                Vec::new()
            },
        }
    }

    fn on_tray_click(&mut self, now: Instant) -> Vec<Effect> {
        if let Some(hidden_at) = self.blur_hidden_at.take() {
            if self.state.window == WindowState::Hidden
                && now.saturating_duration_since(hidden_at) < TRAY_CLICK_BLUR_GRACE
            {
                log::debug!("[CONTROLLER] tray click right after blur-hide, staying hidden");
                return Vec::new();
            }
        }
        self.toggle()
    }

    fn toggle(&mut self) -> Vec<Effect> {
        match self.state.window {
            WindowState::VisibleFocused => self.hide_if_visible(),
            WindowState::VisibleUnfocused | WindowState::Hidden => self.show(),
        }
    }

    fn show(&mut self) -> Vec<Effect> {
        let effects = match self.state.window {
            WindowState::VisibleFocused => return Vec::new(),
            WindowState::VisibleUnfocused => vec![Effect::FocusWindow],
            WindowState::Hidden => vec![
                Effect::ShowWindow,
                Effect::FocusWindow,
                Effect::SetTrayGlyph(TrayGlyph::Visible),
            ],
        };
        self.state.window = WindowState::VisibleFocused;
        effects
    }

    fn hide_if_visible(&mut self) -> Vec<Effect> {
        if !self.state.window.is_visible() {
            return Vec::new();
        }
        self.state.window = WindowState::Hidden;
        vec![Effect::HideWindow, Effect::SetTrayGlyph(TrayGlyph::Hidden)]
    }

    fn on_blur(&mut self, now: Instant) -> Vec<Effect> {
        if self.state.window != WindowState::VisibleFocused {
            return Vec::new();
        }
        if self.hide_on_blur {
            self.blur_hidden_at = Some(now);
            self.hide_if_visible()
        } else {
            self.state.window = WindowState::VisibleUnfocused;
            Vec::new()
        }
    }

    fn set_project(&mut self, identifier: Option<String>) -> Vec<Effect> {
        if self.state.project_identifier != identifier {
            log::info!("[CONTROLLER] project changed: {:?}", identifier);
        }
        self.state.project_identifier = identifier;
        self.state.project_epoch += 1;
        self.state.open_pull_request_count = 0;
        vec![Effect::SetBadge(String::new())]
    }

    fn capture_auth_headers(&mut self, headers: HashMap<String, String>) {
        if self.state.auth_headers.is_some() {
            return;
        }
        if !has_authorization(&headers) {
            log::debug!("[CONTROLLER] ignoring headers without Authorization");
            return;
        }
        log::info!("[CONTROLLER] captured API auth headers ({} entries)", headers.len());
        self.state.auth_headers = Some(headers);
    }

    fn on_poll_tick(&mut self) -> Vec<Effect> {
        let Some(project) = self.state.project_identifier.clone() else {
            return Vec::new();
        };
        self.state.poll_sequence += 1;
        vec![Effect::Fetch(FetchRequest {
            sequence: self.state.poll_sequence,
            epoch: self.state.project_epoch,
            project,
            headers: self.state.auth_headers.clone().unwrap_or_default(),
        })]
    }

    fn on_poll_completed(&mut self, sequence: u64, epoch: u64, count: u32) -> Vec<Effect> {
        if sequence <= self.state.last_applied_sequence {
            log::debug!("[CONTROLLER] dropping stale poll #{}", sequence);
            return Vec::new();
        }
        if epoch != self.state.project_epoch || self.state.project_identifier.is_none() {
            log::debug!("[CONTROLLER] dropping poll #{} from project epoch {}", sequence, epoch);
            return Vec::new();
        }

        self.state.last_applied_sequence = sequence;
        if self.state.open_pull_request_count == count {
            return Vec::new();
        }
        self.state.open_pull_request_count = count;
        vec![Effect::SetBadge(badge_text(count))]
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(true)
    }
}
