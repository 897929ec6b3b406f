//! OS-level shortcut registration.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tauri::{AppHandle, Runtime, Wry};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};
use thiserror::Error;

use super::accelerator::normalize;
use super::action::ShortcutAction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid accelerator '{accelerator}': {reason}")]
    InvalidAccelerator { accelerator: String, reason: String },

    #[error("{0}")]
    Platform(String),
}

/// Registers accelerators with the OS and reports what is currently bound.
///
/// Accelerators are passed in normalized form.
pub trait ShortcutRegistry: Send + Sync {
    /// Accelerators registered by this process and the action each fires.
    fn registered(&self) -> Result<BTreeMap<String, ShortcutAction>, RegistryError>;

    fn register(&self, accelerator: &str, action: ShortcutAction) -> Result<(), RegistryError>;

    fn unregister(&self, accelerator: &str) -> Result<(), RegistryError>;

    fn unregister_all(&self) -> Result<(), RegistryError>;
}

/// Parses an accelerator into a plugin shortcut.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidAccelerator`] when the string does not
/// describe a valid key combination.
pub fn parse_accelerator(accelerator: &str) -> Result<Shortcut, RegistryError> {
    normalize(accelerator)
        .parse::<Shortcut>()
        .map_err(|err| RegistryError::InvalidAccelerator {
            accelerator: accelerator.to_string(),
            reason: err.to_string(),
        })
}

/// Called on the plugin's event thread whenever a bound shortcut is pressed.
pub type ActionDispatcher<R> = Arc<dyn Fn(&AppHandle<R>, ShortcutAction) + Send + Sync>;

/// Registry backed by the global-shortcut plugin.
pub struct TauriShortcutRegistry<R: Runtime = Wry> {
    app: AppHandle<R>,
    bindings: Mutex<BTreeMap<String, (Shortcut, ShortcutAction)>>,
    dispatch: ActionDispatcher<R>,
}

impl<R: Runtime> TauriShortcutRegistry<R> {
    pub fn new(app: AppHandle<R>, dispatch: ActionDispatcher<R>) -> Self {
        Self {
            app,
            bindings: Mutex::new(BTreeMap::new()),
            dispatch,
        }
    }
}

fn platform_error(err: &tauri_plugin_global_shortcut::Error) -> RegistryError {
    RegistryError::Platform(err.to_string())
}

impl<R: Runtime> ShortcutRegistry for TauriShortcutRegistry<R> {
    fn registered(&self) -> Result<BTreeMap<String, ShortcutAction>, RegistryError> {
        Ok(self
            .bindings
            .lock()
            .iter()
            .map(|(accelerator, (_, action))| (accelerator.clone(), *action))
            .collect())
    }

    fn register(&self, accelerator: &str, action: ShortcutAction) -> Result<(), RegistryError> {
        let shortcut = parse_accelerator(accelerator)?;
        let dispatch = Arc::clone(&self.dispatch);

        self.app
            .global_shortcut()
            .on_shortcut(shortcut, move |app, _shortcut, event| {
                // Only trigger on key press, not release
                if event.state != ShortcutState::Pressed {
                    return;
                }
                dispatch(app, action);
            })
            .map_err(|err| platform_error(&err))?;

        self.bindings.lock().insert(accelerator.to_string(), (shortcut, action));
        Ok(())
    }

    fn unregister(&self, accelerator: &str) -> Result<(), RegistryError> {
        let Some((shortcut, _)) = self.bindings.lock().get(accelerator).copied() else {
            return Ok(());
        };

        self.app.global_shortcut().unregister(shortcut).map_err(|err| platform_error(&err))?;
        self.bindings.lock().remove(accelerator);
        Ok(())
    }

    fn unregister_all(&self) -> Result<(), RegistryError> {
        self.app.global_shortcut().unregister_all().map_err(|err| platform_error(&err))?;
        self.bindings.lock().clear();
        Ok(())
    }
}
