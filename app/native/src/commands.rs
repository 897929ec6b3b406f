//! Tauri commands invoked by the UI layer.

use std::sync::Arc;

use serde_json::Value;
use tauri::{AppHandle, Manager};
use uuid::Uuid;

use crate::error::HaloError;
use crate::overlay::{CommandResult, SharedOverlay};

fn overlay(app: &AppHandle) -> Result<SharedOverlay, HaloError> {
    app.try_state::<SharedOverlay>()
        .map(|state| Arc::clone(state.inner()))
        .ok_or(HaloError::NotInitialized)
}

#[tauri::command]
#[allow(clippy::needless_pass_by_value)] // Tauri commands require owned AppHandle
pub fn minimize_window(app: AppHandle) -> Result<(), HaloError> {
    overlay(&app)?.minimize();
    Ok(())
}

#[tauri::command]
#[allow(clippy::needless_pass_by_value)] // Tauri commands require owned AppHandle
pub fn toggle_window_visibility(app: AppHandle) -> Result<CommandResult, HaloError> {
    Ok(overlay(&app)?.toggle_visibility())
}

/// Resizes the window for the UI's current view and layout mode.
#[tauri::command]
pub async fn update_sizes(app: AppHandle) -> Result<CommandResult, HaloError> {
    let overlay = overlay(&app)?;
    Ok(overlay.update_sizes().await)
}

/// Re-registers global shortcuts for a new action to accelerator table.
///
/// Async so it runs off the main thread, which the shortcut plugin needs
/// free while it registers.
#[tauri::command]
pub async fn update_keybinds(app: AppHandle, keybinds: Value) -> Result<(), HaloError> {
    let overlay = overlay(&app)?;
    let update = overlay.update_keybinds(&keybinds).await;
    if let Some(update) = update
        && !update.failed.is_empty()
    {
        tracing::warn!(failed = ?update.failed, "some shortcuts could not be registered");
    }
    Ok(())
}

#[tauri::command]
#[allow(clippy::needless_pass_by_value)] // Tauri commands require owned values
pub fn view_changed(app: AppHandle, view: String) -> Result<(), HaloError> {
    overlay(&app)?.view_changed(&view);
    Ok(())
}

/// Answer from the page to a `halo://ui/query` event.
#[tauri::command]
#[allow(clippy::needless_pass_by_value)] // Tauri commands require owned values
pub fn ui_query_response(app: AppHandle, id: Uuid, value: Value) -> Result<bool, HaloError> {
    let delivered = overlay(&app)?.bridge().resolve(id, value);
    if !delivered {
        tracing::debug!(%id, "dropping answer to unknown or expired UI query");
    }
    Ok(delivered)
}
