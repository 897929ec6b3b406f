//! Keybind tables and per-platform defaults.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::action::ShortcutAction;

/// Per-action accelerator overrides. An empty string clears the binding.
pub type KeybindOverrides = BTreeMap<ShortcutAction, String>;

/// Platform family that decides the default modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") { Self::MacOs } else { Self::Other }
    }

    /// Label passed to the UI when the "next step" shortcut fires.
    #[must_use]
    pub const fn next_step_label(self) -> &'static str {
        match self {
            Self::MacOs => "cmd+enter",
            Self::Other => "ctrl+enter",
        }
    }
}

/// Maps every action to at most one accelerator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeybindTable(BTreeMap<ShortcutAction, String>);

impl KeybindTable {
    /// Built-in bindings for `platform`.
    #[must_use]
    pub fn defaults(platform: Platform) -> Self {
        let primary = match platform {
            Platform::MacOs => "Cmd",
            Platform::Other => "Ctrl",
        };
        let movement = match platform {
            Platform::MacOs => "Alt",
            Platform::Other => "Ctrl",
        };

        let entries = [
            (ShortcutAction::MoveUp, format!("{movement}+Up")),
            (ShortcutAction::MoveDown, format!("{movement}+Down")),
            (ShortcutAction::MoveLeft, format!("{movement}+Left")),
            (ShortcutAction::MoveRight, format!("{movement}+Right")),
            (ShortcutAction::ToggleVisibility, format!("{primary}+\\")),
            (ShortcutAction::ToggleClickThrough, format!("{primary}+M")),
            (ShortcutAction::NextStep, format!("{primary}+Enter")),
            (ShortcutAction::PreviousResponse, format!("{primary}+[")),
            (ShortcutAction::NextResponse, format!("{primary}+]")),
            (ShortcutAction::ScrollUp, format!("{primary}+Shift+Up")),
            (ShortcutAction::ScrollDown, format!("{primary}+Shift+Down")),
        ];

        Self(entries.into_iter().collect())
    }

    /// Applies `overrides` on top of this table.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &KeybindOverrides) -> Self {
        for (action, accelerator) in overrides {
            self.0.insert(*action, accelerator.trim().to_string());
        }
        self
    }

    /// Accelerator bound to `action`, if any.
    #[must_use]
    pub fn get(&self, action: ShortcutAction) -> Option<&str> {
        self.0.get(&action).map(String::as_str).filter(|accel| !accel.is_empty())
    }

    /// Non-empty bindings in action order.
    pub fn bindings(&self) -> impl Iterator<Item = (ShortcutAction, &str)> {
        self.0
            .iter()
            .map(|(action, accel)| (*action, accel.trim()))
            .filter(|(_, accel)| !accel.is_empty())
    }
}

/// Builds overrides from `(name, accelerator)` pairs, skipping unknown
/// action names.
pub fn overrides_from_pairs<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> KeybindOverrides {
    pairs
        .into_iter()
        .filter_map(|(name, accelerator)| {
            let Some(action) = ShortcutAction::from_name(name) else {
                tracing::debug!(action = name, "ignoring keybind for unknown action");
                return None;
            };
            Some((action, accelerator.to_string()))
        })
        .collect()
}

/// Parses overrides sent by the UI layer.
///
/// Accepts a JSON object, or a string holding one (the form the UI keeps
/// in its local storage). Non-string values and unknown actions are skipped.
#[must_use]
pub fn parse_overrides(value: &Value) -> KeybindOverrides {
    match value {
        Value::Object(map) => overrides_from_pairs(
            map.iter().filter_map(|(name, accel)| accel.as_str().map(|accel| (name.as_str(), accel))),
        ),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ Value::Object(_)) => parse_overrides(&parsed),
            Ok(_) | Err(_) => {
                tracing::debug!("keybind overrides string is not a JSON object");
                KeybindOverrides::new()
            }
        },
        _ => KeybindOverrides::new(),
    }
}
