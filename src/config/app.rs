//! Application-level configuration.
//!
//! Contains user preferences that affect app-wide behavior:
//! - Where the Waffle API lives and how often it is polled
//! - Window management (hide on blur, close to tray)
//! - The global shortcut that toggles the window
//!
//! Uses `parking_lot::RwLock` for thread-safe access. Nothing here is
//! persisted; every launch starts from defaults plus environment overrides.

use std::time::Duration;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager};

use crate::controller::SharedController;
use crate::error::{WaffleBarError, WaffleBarResult};

/// Base URL of the Waffle REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.waffle.io";

/// Waffle web app shown in the main window.
pub const WAFFLE_APP_URL: &str = "https://waffle.io";

/// Seconds between two poll ticks.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default global shortcut for toggling the main window.
pub const DEFAULT_TOGGLE_SHORTCUT: &str = "CmdOrCtrl+Shift+W";

/// Overrides `api_base_url` when set.
pub const ENV_API_URL: &str = "WAFFLE_BAR_API_URL";

/// Overrides `poll_interval_secs` when set.
pub const ENV_POLL_SECS: &str = "WAFFLE_BAR_POLL_SECS";

lazy_static! {
    /// Global app configuration.
    pub static ref APP_CONFIG: RwLock<AppConfig> = RwLock::new(AppConfig::default());
}

/// Application-wide user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Waffle API root, without a trailing slash.
    pub api_base_url: String,

    /// Seconds between poll ticks (minimum 1).
    pub poll_interval_secs: u64,

    /// Hide the window as soon as it loses focus.
    pub hide_on_blur: bool,

    /// Accelerator string for the global toggle shortcut.
    pub toggle_shortcut: String,

    /// Hide to the tray instead of closing when clicking X.
    pub close_to_tray: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            hide_on_blur: true,
            toggle_shortcut: DEFAULT_TOGGLE_SHORTCUT.to_string(),
            close_to_tray: true,
        }
    }
}

impl AppConfig {
    /// Check that the values can be used as-is.
    pub fn validate(&self) -> WaffleBarResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(WaffleBarError::ConfigError(
                "pollIntervalSecs must be at least 1".to_string(),
            ));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(WaffleBarError::ConfigError(format!(
                "apiBaseUrl must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.toggle_shortcut.trim().is_empty() {
            return Err(WaffleBarError::ConfigError(
                "toggleShortcut must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply overrides from a variable lookup. Bad values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.starts_with("http://") || url.starts_with("https://") {
                self.api_base_url = url;
            } else {
                log::warn!("[APP_CONFIG] ignoring {}={:?}: not an http(s) URL", ENV_API_URL, url);
            }
        }

        if let Some(secs) = lookup(ENV_POLL_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.poll_interval_secs = secs,
                _ => log::warn!("[APP_CONFIG] ignoring {}={:?}", ENV_POLL_SECS, secs),
            }
        }
    }
}

// ============================================================================
// Getters (for internal Rust use)
// ============================================================================

/// Snapshot of the current configuration.
pub fn current() -> AppConfig {
    APP_CONFIG.read().clone()
}

/// Waffle API root used for the next poll.
pub fn api_base_url() -> String {
    APP_CONFIG.read().api_base_url.clone()
}

/// Delay between two poll ticks.
pub fn poll_interval() -> Duration {
    Duration::from_secs(APP_CONFIG.read().poll_interval_secs.max(1))
}

/// Check if close-to-tray is enabled.
pub fn is_close_to_tray() -> bool {
    APP_CONFIG.read().close_to_tray
}

/// Read `WAFFLE_BAR_*` variables from the process environment once at startup.
pub fn load_from_env() {
    let mut config = APP_CONFIG.write();
    config.apply_overrides(|key| std::env::var(key).ok());
    log::info!("[APP_CONFIG] loaded: {:?}", *config);
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Get the current app configuration.
#[tauri::command]
pub fn get_app_config() -> AppConfig {
    current()
}

/// Replace the config in `store` with `next`.
///
/// `swap_shortcut(old, new)` only runs when the accelerator changed. If
/// validation or the swap fails nothing is committed: `store` keeps the old
/// config and the controller keeps its old `hideOnBlur`.
pub fn commit_config<F>(
    store: &RwLock<AppConfig>,
    next: AppConfig,
    controller: Option<&SharedController>,
    swap_shortcut: F,
) -> WaffleBarResult<()>
where
    F: FnOnce(&str, &str) -> WaffleBarResult<()>,
{
    next.validate()?;

    let mut current = store.write();
    if current.toggle_shortcut != next.toggle_shortcut {
        swap_shortcut(&current.toggle_shortcut, &next.toggle_shortcut)?;
    }
    let hide_on_blur = next.hide_on_blur;
    *current = next;
    drop(current);

    if let Some(controller) = controller {
        controller.lock().set_hide_on_blur(hide_on_blur);
    }
    Ok(())
}

/// Set the entire app configuration at once (for frontend sync).
///
/// Pushes `hideOnBlur` into the controller and re-registers the toggle
/// shortcut when it changed.
#[tauri::command]
pub fn set_app_config(app: AppHandle, config: AppConfig) -> WaffleBarResult<()> {
    log::debug!("[APP_CONFIG] set_app_config({:?})", config);

    #[cfg(desktop)]
    let swap =
        |old: &str, new: &str| crate::app::shortcut::replace_toggle_shortcut(&app, old, new);
    #[cfg(not(desktop))]
    let swap = |_: &str, _: &str| -> WaffleBarResult<()> { Ok(()) };

    let controller = app.try_state::<SharedController>();
    commit_config(&APP_CONFIG, config, controller.as_deref(), swap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::controller::Controller;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://api.waffle.io");
        assert_eq!(config.poll_interval_secs, 5);
        assert!(config.hide_on_blur);
        assert!(config.close_to_tray);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[
            (ENV_API_URL, "http://127.0.0.1:8080/"),
            (ENV_POLL_SECS, "30"),
        ]));

        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.poll_interval_secs, 30);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[(ENV_API_URL, "ftp://nope"), (ENV_POLL_SECS, "0")]));
        assert_eq!(config, AppConfig::default());

        config.apply_overrides(lookup(&[(ENV_POLL_SECS, "soon")]));
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = AppConfig {
            poll_interval_secs: 0,
            ..AppConfig::default()
        };
        assert!(matches!(zero.validate(), Err(WaffleBarError::ConfigError(_))));

        let no_scheme = AppConfig {
            api_base_url: "api.waffle.io".to_string(),
            ..AppConfig::default()
        };
        assert!(no_scheme.validate().is_err());

        let blank_shortcut = AppConfig {
            toggle_shortcut: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(blank_shortcut.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"hideOnBlur":false}"#).unwrap();
        assert!(!config.hide_on_blur);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    /// Shortcut swap that always succeeds and records its arguments.
    fn accept_swap(
        calls: &RefCell<Vec<(String, String)>>,
    ) -> impl FnOnce(&str, &str) -> WaffleBarResult<()> + '_ {
        move |old, new| {
            calls.borrow_mut().push((old.to_string(), new.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_commit_pushes_hide_on_blur_to_controller() {
        let store = RwLock::new(AppConfig::default());
        let controller = SharedController::new(Controller::new(true));
        let calls = RefCell::new(Vec::new());

        let next = AppConfig {
            hide_on_blur: false,
            ..AppConfig::default()
        };
        commit_config(&store, next.clone(), Some(&controller), accept_swap(&calls)).unwrap();

        assert_eq!(*store.read(), next);
        assert!(!controller.lock().hide_on_blur());
        // Same shortcut, nothing to re-register.
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_commit_swaps_changed_shortcut() {
        let store = RwLock::new(AppConfig::default());
        let calls = RefCell::new(Vec::new());

        let next = AppConfig {
            toggle_shortcut: "Ctrl+Alt+K".to_string(),
            ..AppConfig::default()
        };
        commit_config(&store, next, None, accept_swap(&calls)).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![(DEFAULT_TOGGLE_SHORTCUT.to_string(), "Ctrl+Alt+K".to_string())]
        );
        assert_eq!(store.read().toggle_shortcut, "Ctrl+Alt+K");
    }

    #[test]
    fn test_rejected_shortcut_commits_nothing() {
        let store = RwLock::new(AppConfig::default());
        let controller = SharedController::new(Controller::new(true));

        let next = AppConfig {
            toggle_shortcut: "NotAKey".to_string(),
            hide_on_blur: false,
            ..AppConfig::default()
        };
        let err = commit_config(&store, next, Some(&controller), |_, new| {
            Err(WaffleBarError::ShortcutError(format!("{}: unknown key", new)))
        })
        .unwrap_err();

        assert!(matches!(err, WaffleBarError::ShortcutError(_)));
        assert_eq!(*store.read(), AppConfig::default());
        assert!(controller.lock().hide_on_blur());

        // The next change still swaps away from the shortcut that is really registered.
        let calls = RefCell::new(Vec::new());
        let next = AppConfig {
            toggle_shortcut: "Ctrl+Alt+K".to_string(),
            ..AppConfig::default()
        };
        commit_config(&store, next, Some(&controller), accept_swap(&calls)).unwrap();
        assert_eq!(calls.borrow()[0].0, DEFAULT_TOGGLE_SHORTCUT);
    }

    #[test]
    fn test_invalid_config_never_touches_shortcut() {
        let store = RwLock::new(AppConfig::default());
        let calls = RefCell::new(Vec::new());

        let next = AppConfig {
            poll_interval_secs: 0,
            toggle_shortcut: "Ctrl+Alt+K".to_string(),
            ..AppConfig::default()
        };
        let result = commit_config(&store, next, None, accept_swap(&calls));

        assert!(matches!(result, Err(WaffleBarError::ConfigError(_))));
        assert!(calls.borrow().is_empty());
        assert_eq!(*store.read(), AppConfig::default());
    }

    #[test]
    fn test_poll_interval_getter() {
        *APP_CONFIG.write() = AppConfig::default();
        assert_eq!(poll_interval(), Duration::from_secs(5));
        assert!(is_close_to_tray());
    }
}
