//! Application menu.
//!
//! The window is frameless, so the menu exists mainly to make the standard
//! editing accelerators work inside the web view.

use tauri::{
    menu::{Menu, PredefinedMenuItem, Submenu},
    App,
};

/// Build the Edit menu (plus the app menu on macOS) and install it.
pub fn init(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let edit = Submenu::with_items(
        app,
        "Edit",
        true,
        &[
            &PredefinedMenuItem::undo(app, None)?,
            &PredefinedMenuItem::redo(app, None)?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::cut(app, None)?,
            &PredefinedMenuItem::copy(app, None)?,
            &PredefinedMenuItem::paste(app, None)?,
            &PredefinedMenuItem::select_all(app, None)?,
        ],
    )?;

    #[cfg(target_os = "macos")]
    let menu = {
        let name = app.package_info().name.clone();
        let about = format!("About {}", name);
        let hide = format!("Hide {}", name);
        let app_menu = Submenu::with_items(
            app,
            &name,
            true,
            &[
                &PredefinedMenuItem::about(app, Some(about.as_str()), None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::services(app, None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::hide(app, Some(hide.as_str()))?,
                &PredefinedMenuItem::hide_others(app, None)?,
                &PredefinedMenuItem::show_all(app, None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::quit(app, None)?,
            ],
        )?;
        Menu::with_items(app, &[&app_menu, &edit])?
    };

    #[cfg(not(target_os = "macos"))]
    let menu = Menu::with_items(app, &[&edit])?;

    app.set_menu(menu)?;
    Ok(())
}
