//! Applies controller effects to the real window and tray.
//!
//! [`dispatch`] is the only way events reach the controller: it runs the
//! transition under the lock, releases it, then hands the effects to a
//! [`Host`].

use tauri::{AppHandle, Manager};

use crate::api::WaffleClient;
use crate::config;
use crate::controller::{ControllerEvent, Effect, FetchRequest, SharedController, TrayGlyph};
use crate::error::{WaffleBarError, WaffleBarResult};

/// Label of the window that shows the Waffle board.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// GUI capabilities the controller's effects need.
pub trait Host {
    fn hide_window(&self) -> WaffleBarResult<()>;
    fn show_window(&self) -> WaffleBarResult<()>;
    fn focus_window(&self) -> WaffleBarResult<()>;
    fn set_tray_glyph(&self, glyph: TrayGlyph) -> WaffleBarResult<()>;
    fn set_badge(&self, text: &str) -> WaffleBarResult<()>;
    /// Must not block; the result is reported back as an event.
    fn fetch(&self, request: FetchRequest);
}

/// Apply effects in order. A failing effect is logged and the rest still run.
pub fn apply_effects<H: Host + ?Sized>(host: &H, effects: Vec<Effect>) {
    for effect in effects {
        let result = match &effect {
            Effect::HideWindow => host.hide_window(),
            Effect::ShowWindow => host.show_window(),
            Effect::FocusWindow => host.focus_window(),
            Effect::SetTrayGlyph(glyph) => host.set_tray_glyph(*glyph),
            Effect::SetBadge(text) => host.set_badge(text),
            Effect::Fetch(request) => {
                host.fetch(request.clone());
                Ok(())
            },
        };
        if let Err(e) = result {
            log::warn!("[HOST] {:?} failed: {}", effect, e);
        }
    }
}

/// Feed one event to the managed controller and apply what it returns.
pub fn dispatch(app: &AppHandle, event: ControllerEvent) {
    let Some(controller) = app.try_state::<SharedController>() else {
        log::error!("[HOST] controller not initialized, dropping {:?}", event);
        return;
    };
    let effects = controller.lock().handle(event);
    apply_effects(&TauriHost::new(app.clone()), effects);
}

/// [`Host`] backed by the running Tauri app.
pub struct TauriHost {
    app: AppHandle,
}

impl TauriHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn main_window(&self) -> WaffleBarResult<tauri::WebviewWindow> {
        self.app
            .get_webview_window(MAIN_WINDOW_LABEL)
            .ok_or_else(|| WaffleBarError::WindowError("main window not found".to_string()))
    }
}

impl Host for TauriHost {
    fn hide_window(&self) -> WaffleBarResult<()> {
        self.main_window()?.hide()?;
        Ok(())
    }

    fn show_window(&self) -> WaffleBarResult<()> {
        match self.app.get_webview_window(MAIN_WINDOW_LABEL) {
            Some(window) => window.show()?,
            None => {
                log::info!("[HOST] main window was closed, creating it again");
                super::window::create_main_window(&self.app)
                    .map_err(|e| WaffleBarError::WindowError(e.to_string()))?;
            },
        }
        Ok(())
    }

    fn focus_window(&self) -> WaffleBarResult<()> {
        self.main_window()?.set_focus()?;
        Ok(())
    }

    fn set_tray_glyph(&self, glyph: TrayGlyph) -> WaffleBarResult<()> {
        #[cfg(desktop)]
        {
            super::tray::set_glyph(&self.app, glyph)
        }
        #[cfg(not(desktop))]
        {
            let _ = glyph;
            Ok(())
        }
    }

    fn set_badge(&self, text: &str) -> WaffleBarResult<()> {
        #[cfg(desktop)]
        {
            super::tray::set_title(&self.app, text)?;
        }

        #[cfg(target_os = "macos")]
        {
            let label = if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            };
            // No window, no dock badge; it is set again on the next count change.
            if let Some(window) = self.app.get_webview_window(MAIN_WINDOW_LABEL) {
                window.set_badge_label(label)?;
            }
        }

        Ok(())
    }

    fn fetch(&self, request: FetchRequest) {
        let Some(client) = self.app.try_state::<WaffleClient>() else {
            log::error!("[HOST] API client not initialized, skipping poll #{}", request.sequence);
            return;
        };
        let client = client.inner().clone().with_base_url(&config::app::api_base_url());
        let app = self.app.clone();

        tauri::async_runtime::spawn(async move {
            let FetchRequest {
                sequence,
                epoch,
                project,
                headers,
            } = request;
            let event = match client.open_pull_request_count(&project, &headers).await {
                Ok(count) => ControllerEvent::PollCompleted {
                    sequence,
                    epoch,
                    count,
                },
                Err(e) => ControllerEvent::PollFailed {
                    sequence,
                    reason: e.to_string(),
                },
            };
            dispatch(&app, event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::controller::Controller;

    /// Records every call instead of touching a GUI.
    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<String>>,
        fail_hide: bool,
    }

    impl RecordingHost {
        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Host for RecordingHost {
        fn hide_window(&self) -> WaffleBarResult<()> {
            self.record("hide".into());
            if self.fail_hide {
                return Err(WaffleBarError::WindowError("gone".into()));
            }
            Ok(())
        }

        fn show_window(&self) -> WaffleBarResult<()> {
            self.record("show".into());
            Ok(())
        }

        fn focus_window(&self) -> WaffleBarResult<()> {
            self.record("focus".into());
            Ok(())
        }

        fn set_tray_glyph(&self, glyph: TrayGlyph) -> WaffleBarResult<()> {
            self.record(format!("glyph:{:?}", glyph));
            Ok(())
        }

        fn set_badge(&self, text: &str) -> WaffleBarResult<()> {
            self.record(format!("badge:{}", text));
            Ok(())
        }

        fn fetch(&self, request: FetchRequest) {
            self.record(format!("fetch:{}#{}", request.project, request.sequence));
        }
    }

    #[test]
    fn effects_are_applied_in_order() {
        let host = RecordingHost::default();
        let mut controller = Controller::default();

        apply_effects(&host, controller.handle(ControllerEvent::TrayClicked));
        apply_effects(&host, controller.handle(ControllerEvent::TrayClicked));

        assert_eq!(
            host.calls(),
            vec!["hide", "glyph:Hidden", "show", "focus", "glyph:Visible"]
        );
    }

    #[test]
    fn failed_effect_does_not_stop_the_rest() {
        let host = RecordingHost {
            fail_hide: true,
            ..RecordingHost::default()
        };
        apply_effects(
            &host,
            vec![Effect::HideWindow, Effect::SetTrayGlyph(TrayGlyph::Hidden)],
        );
        assert_eq!(host.calls(), vec!["hide", "glyph:Hidden"]);
    }

    #[test]
    fn poll_round_trip_updates_badge() {
        let host = RecordingHost::default();
        let mut controller = Controller::default();

        apply_effects(
            &host,
            controller.handle(ControllerEvent::ProjectChanged("acme/widgets".into())),
        );
        apply_effects(&host, controller.handle(ControllerEvent::PollTick));
        apply_effects(
            &host,
            controller.handle(ControllerEvent::PollCompleted {
                sequence: 1,
                epoch: 1,
                count: 1,
            }),
        );

        assert_eq!(
            host.calls(),
            vec!["badge:", "fetch:acme/widgets#1", "badge:1"]
        );
    }
}
