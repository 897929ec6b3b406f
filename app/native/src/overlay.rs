//! The overlay: window controller, resize animator, UI bridge and shortcut
//! registry wired together behind the operations the UI and shortcuts invoke.

use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::animation::{AnimationOutcome, AnimationTiming, ResizeAnimator};
use crate::bridge::{UiBridge, UiEvent, WebviewBridge};
use crate::config::HaloConfig;
use crate::constants::{FALLBACK_VIEW, PRIMARY_VIEW};
use crate::geometry::{LayoutMode, compute_target_size};
use crate::shortcuts::{
    KeybindOverrides, KeybindTable, Platform, ShortcutAction, ShortcutRegistry, ShortcutUpdate,
    TauriShortcutRegistry, parse_overrides, update_shortcuts,
};
use crate::window::{OverlayWindow, TauriWindow, WindowController, WindowError};

/// Acknowledgement returned to the UI for control requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    #[must_use]
    pub const fn ok() -> Self { Self { success: true, error: None } }

    #[must_use]
    pub fn failure(error: impl Display) -> Self {
        Self { success: false, error: Some(error.to_string()) }
    }
}

/// Host-side settings the overlay is built with.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    pub platform: Platform,
    /// Overrides applied between the platform defaults and the UI's own.
    pub keybinds: KeybindOverrides,
    /// Used when the UI has no content-protection preference to report.
    pub content_protection: bool,
    pub timing: AnimationTiming,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            keybinds: KeybindOverrides::new(),
            content_protection: true,
            timing: AnimationTiming::default(),
        }
    }
}

impl From<&HaloConfig> for OverlayOptions {
    fn from(config: &HaloConfig) -> Self {
        Self {
            keybinds: config.keybind_overrides(),
            content_protection: config.content_protection,
            ..Self::default()
        }
    }
}

pub struct Overlay<W, B, S> {
    controller: WindowController<W>,
    animator: ResizeAnimator,
    bridge: B,
    registry: S,
    platform: Platform,
    host_keybinds: KeybindOverrides,
    default_content_protection: bool,
    /// Table last handed to the registry.
    keybinds: Mutex<KeybindTable>,
    /// Serializes registry updates. Registry calls may wait on the main
    /// thread, so this is only ever awaited, never taken from a sync path.
    keybind_updates: tokio::sync::Mutex<()>,
    set_up: AtomicBool,
}

impl<W, B, S> Overlay<W, B, S>
where
    W: OverlayWindow,
    B: UiBridge,
    S: ShortcutRegistry,
{
    pub fn new(window: W, bridge: B, registry: S, options: OverlayOptions) -> Self {
        Self {
            controller: WindowController::new(window),
            animator: ResizeAnimator::with_timing(options.timing),
            bridge,
            registry,
            platform: options.platform,
            host_keybinds: options.keybinds,
            default_content_protection: options.content_protection,
            keybinds: Mutex::new(KeybindTable::default()),
            keybind_updates: tokio::sync::Mutex::new(()),
            set_up: AtomicBool::new(false),
        }
    }

    pub const fn controller(&self) -> &WindowController<W> { &self.controller }

    pub const fn bridge(&self) -> &B { &self.bridge }

    /// Keybind table currently in effect.
    pub fn keybinds(&self) -> KeybindTable { self.keybinds.lock().clone() }

    /// One-time setup once the page has loaded: reads the persisted keybind
    /// overrides and content-protection preference from the UI, applies
    /// content protection and registers the shortcuts. Runs at most once;
    /// later page loads are ignored.
    pub async fn setup(&self) {
        if self.controller.is_destroyed() || self.set_up.swap(true, Ordering::AcqRel) {
            return;
        }

        let ui_keybinds = self.bridge.custom_keybinds().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read stored keybinds, using defaults");
            None
        });
        let protection = match self.bridge.content_protection().await {
            Ok(Some(enabled)) => enabled,
            Ok(None) => self.default_content_protection,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read content protection preference");
                self.default_content_protection
            }
        };

        if self.controller.is_destroyed() {
            tracing::debug!("window destroyed during setup");
            return;
        }

        self.controller.set_content_protection(protection);
        let update = self.apply_keybinds(ui_keybinds.as_ref()).await;
        tracing::info!(
            content_protection = protection,
            shortcuts = update.registered.len(),
            "overlay ready"
        );
    }

    /// Merges `ui` over the host overrides and platform defaults, then
    /// reconciles the shortcut registry with the result.
    pub async fn apply_keybinds(&self, ui: Option<&KeybindOverrides>) -> ShortcutUpdate {
        let mut table =
            KeybindTable::defaults(self.platform).with_overrides(&self.host_keybinds);
        if let Some(ui) = ui {
            table = table.with_overrides(ui);
        }

        let _serial = self.keybind_updates.lock().await;
        let update = update_shortcuts(&table, &self.registry);
        *self.keybinds.lock() = table;
        update
    }

    /// Handles a keybind table sent by the UI. Ignored once the window is
    /// destroyed.
    pub async fn update_keybinds(&self, keybinds: &Value) -> Option<ShortcutUpdate> {
        if self.controller.is_destroyed() {
            tracing::debug!("ignoring keybind update for destroyed window");
            return None;
        }
        let overrides = parse_overrides(keybinds);
        Some(self.apply_keybinds(Some(&overrides)).await)
    }

    pub fn minimize(&self) { self.controller.minimize(); }

    pub fn toggle_visibility(&self) -> CommandResult {
        match self.controller.toggle_visibility() {
            Ok(visible) => {
                tracing::debug!(visible, "toggled overlay visibility");
                CommandResult::ok()
            }
            Err(err) => CommandResult::failure(err),
        }
    }

    /// Resizes the window for the UI's current view and layout mode.
    ///
    /// Resolves once this request's animation ends. A request superseded by
    /// a newer one still reports success.
    pub async fn update_sizes(&self) -> CommandResult {
        if self.controller.is_destroyed() {
            return CommandResult::failure(WindowError::Destroyed);
        }

        let view = self.bridge.current_view().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read current view");
            FALLBACK_VIEW.to_string()
        });
        let layout = self.bridge.layout_mode().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read layout mode");
            LayoutMode::default()
        });

        if self.controller.is_destroyed() {
            return CommandResult::failure(WindowError::Destroyed);
        }

        let target = compute_target_size(&view, layout);
        tracing::debug!(view = %view, ?layout, ?target, "updating window size");

        match self.animator.animate(&self.controller, target).await {
            AnimationOutcome::WindowDestroyed => CommandResult::failure(WindowError::Destroyed),
            AnimationOutcome::AlreadyAtTarget
            | AnimationOutcome::Completed
            | AnimationOutcome::Superseded => CommandResult::ok(),
        }
    }

    /// Leaving the primary view always restores pointer capture.
    pub fn view_changed(&self, view: &str) {
        if view == PRIMARY_VIEW {
            return;
        }
        if self.controller.reset_click_through() {
            self.bridge.notify(UiEvent::ClickThroughToggled(false));
        }
    }

    /// Runs the action bound to a pressed shortcut.
    pub fn dispatch(&self, action: ShortcutAction) {
        if self.controller.is_destroyed() {
            return;
        }
        tracing::trace!(%action, "shortcut pressed");

        match action {
            ShortcutAction::MoveUp
            | ShortcutAction::MoveDown
            | ShortcutAction::MoveLeft
            | ShortcutAction::MoveRight => self.nudge(action),
            ShortcutAction::ToggleVisibility => {
                if let Err(err) = self.controller.toggle_visibility() {
                    tracing::warn!(error = %err, "failed to toggle visibility");
                }
            }
            ShortcutAction::ToggleClickThrough => {
                if let Some(enabled) = self.controller.toggle_click_through() {
                    self.bridge.notify(UiEvent::ClickThroughToggled(enabled));
                }
            }
            ShortcutAction::NextStep => {
                self.bridge.invoke_shortcut(self.platform.next_step_label());
            }
            ShortcutAction::PreviousResponse => self.bridge.notify(UiEvent::PreviousResponse),
            ShortcutAction::NextResponse => self.bridge.notify(UiEvent::NextResponse),
            ShortcutAction::ScrollUp => self.bridge.notify(UiEvent::ScrollUp),
            ShortcutAction::ScrollDown => self.bridge.notify(UiEvent::ScrollDown),
        }
    }

    fn nudge(&self, action: ShortcutAction) {
        if !self.controller.is_visible() {
            return;
        }
        let (Some((dx, dy)), Some(step)) = (action.direction(), self.controller.move_step()) else {
            return;
        };
        self.controller.move_by(dx * step, dy * step);
    }
}

/// The overlay as wired up in the running app.
pub type AppOverlay = Overlay<TauriWindow, WebviewBridge, TauriShortcutRegistry>;

/// Managed state handle for [`AppOverlay`].
pub type SharedOverlay = Arc<AppOverlay>;
