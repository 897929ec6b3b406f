//! Halo - an always-on-top, frameless assistant overlay.
//!
//! The native side owns the overlay window: it resizes it with an eased
//! animation whenever the UI switches view or layout, keeps it centered at
//! the top of the screen, and binds the global shortcuts that move, hide and
//! drive it.

pub mod animation;
pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod shortcuts;
pub mod window;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, Wry};

use crate::bridge::WebviewBridge;
use crate::constants::MAIN_WINDOW_LABEL;
use crate::error::HaloError;
use crate::overlay::{Overlay, OverlayOptions, SharedOverlay};
use crate::shortcuts::{ActionDispatcher, TauriShortcutRegistry};
use crate::window::TauriWindow;

fn dispatch_shortcut(app: &AppHandle, action: shortcuts::ShortcutAction) {
    if let Some(overlay) = app.try_state::<SharedOverlay>() {
        overlay.dispatch(action);
    }
}

/// Runs the Tauri desktop application.
///
/// Installs logging, loads the configuration and blocks on the event loop.
pub fn run(cli: &cli::Cli) {
    logging::init(cli.log.as_deref());
    cli.apply();
    let options = OverlayOptions::from(config::init());

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // A second launch brings the existing overlay back.
            if let Some(overlay) = app.try_state::<SharedOverlay>()
                && let Err(err) = overlay.controller().set_visible(true)
            {
                tracing::debug!(error = %err, "failed to show overlay for second instance");
            }
        }))
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::minimize_window,
            commands::toggle_window_visibility,
            commands::update_sizes,
            commands::update_keybinds,
            commands::view_changed,
            commands::ui_query_response,
        ])
        .setup(move |app| {
            let window = app.get_webview_window(MAIN_WINDOW_LABEL).ok_or_else(|| {
                HaloError::WindowError(format!("window '{MAIN_WINDOW_LABEL}' not found"))
            })?;

            let dispatch: ActionDispatcher<Wry> = Arc::new(dispatch_shortcut);
            let registry = TauriShortcutRegistry::new(app.handle().clone(), dispatch);
            let bridge = WebviewBridge::new(window.clone());

            let overlay: SharedOverlay =
                Arc::new(Overlay::new(TauriWindow::new(window), bridge, registry, options));
            app.manage(overlay);
            Ok(())
        })
        .on_page_load(|webview, payload| {
            if !matches!(payload.event(), PageLoadEvent::Finished)
                || webview.label() != MAIN_WINDOW_LABEL
            {
                return;
            }
            let Some(overlay) = webview.try_state::<SharedOverlay>() else {
                return;
            };
            let overlay = Arc::clone(overlay.inner());
            tauri::async_runtime::spawn(async move { overlay.setup().await });
        })
        .run(tauri::generate_context!());

    if let Err(err) = result {
        tracing::error!(error = %err, "error while running tauri application");
        std::process::exit(1);
    }
}
