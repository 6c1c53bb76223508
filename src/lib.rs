use parking_lot::Mutex;
use tauri::{Manager, RunEvent};

#[cfg(desktop)]
use tauri_plugin_autostart::MacosLauncher;

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;

use api::WaffleClient;
use controller::{Controller, ControllerEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    #[allow(unused_mut)]
    let mut builder = tauri::Builder::default();

    #[cfg(desktop)]
    {
        builder = builder
            .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                app::dispatch(app, ControllerEvent::ShowRequested);
            }))
            .plugin(
                tauri_plugin_global_shortcut::Builder::new()
                    .with_handler(app::shortcut::handle_shortcut)
                    .build(),
            )
            .plugin(tauri_plugin_autostart::init(MacosLauncher::LaunchAgent, None));
    }

    let tauri_app = builder
        .on_window_event(app::events::handle_window_event)
        .invoke_handler(tauri::generate_handler![
            // Bridge commands (called from the injected script)
            commands::bridge::project_changed,
            commands::bridge::project_left,
            commands::bridge::capture_auth_headers,
            commands::bridge::toggle_window,
            commands::bridge::get_status,
            // Config commands
            config::app::get_app_config,
            config::app::set_app_config,
            // Settings commands
            commands::settings::set_autostart,
            commands::settings::is_autostart_enabled,
            // Logging commands
            commands::logging::write_log,
            commands::logging::write_logs,
            commands::logging::get_log_dir,
            commands::logging::get_recent_logs,
        ])
        .setup(|app| {
            if let Err(e) = commands::logging::init_logging(app.handle()) {
                eprintln!("Failed to initialize logging: {}", e);
            }

            config::app::load_from_env();
            let config = config::app::current();

            app.manage(WaffleClient::new(&config.api_base_url)?);
            app.manage(Mutex::new(Controller::new(config.hide_on_blur)));

            app::window::create_main_window(app.handle())?;

            #[cfg(desktop)]
            {
                app::menu::init(app)?;
                app::tray::init(app)?;
                if let Err(e) =
                    app::shortcut::register_toggle_shortcut(app.handle(), &config.toggle_shortcut)
                {
                    log::warn!("Toggle shortcut unavailable: {}", e);
                }
            }

            app::poller::start(app.handle());
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    tauri_app.run(|app, event| match event {
        // Keep running in the tray after the window is closed
        RunEvent::ExitRequested { api, code, .. }
            if code.is_none()
                && app::events::keep_running_without_windows(
                    config::app::is_close_to_tray(),
                    cfg!(target_os = "macos"),
                ) =>
        {
            api.prevent_exit();
        },
        RunEvent::Exit => {
            if let Some(poller) = app.try_state::<app::poller::PollerHandle>() {
                poller.stop();
            }
            log::info!("Exiting");
        },
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            app::dispatch(app, ControllerEvent::ShowRequested);
        },
        _ => {},
    });
}
