//! Global shortcuts for the overlay.
//!
//! A [`KeybindTable`] maps each [`ShortcutAction`] to an accelerator.
//! [`update_shortcuts`] diffs a table against a [`ShortcutRegistry`] so that
//! changing one binding leaves the others registered.

mod accelerator;
mod action;
mod manager;
mod registry;
mod table;

pub use action::ShortcutAction;
pub use manager::{ShortcutUpdate, update_shortcuts};
pub use registry::{
    ActionDispatcher, RegistryError, ShortcutRegistry, TauriShortcutRegistry, parse_accelerator,
};
pub use table::{KeybindOverrides, KeybindTable, Platform, overrides_from_pairs, parse_overrides};
