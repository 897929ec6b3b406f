//! Reconciles the OS registrations with a keybind table.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::accelerator::{binding_key, normalize};
use super::action::ShortcutAction;
use super::registry::ShortcutRegistry;
use super::table::KeybindTable;

/// What a call to [`update_shortcuts`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutUpdate {
    pub unregistered: Vec<String>,
    pub registered: Vec<String>,
    /// Accelerators the OS refused.
    pub failed: Vec<String>,
    /// Whether every registration was dropped after a registry error.
    pub fell_back: bool,
}

/// A binding to register: normalized accelerator and the action it fires.
type Binding = (String, ShortcutAction);

/// Desired bindings keyed by [`binding_key`].
fn desired_bindings(table: &KeybindTable) -> BTreeMap<String, Binding> {
    let mut desired = BTreeMap::new();

    for (action, accelerator) in table.bindings() {
        match desired.entry(binding_key(accelerator)) {
            Entry::Vacant(entry) => {
                entry.insert((normalize(accelerator), action));
            }
            Entry::Occupied(entry) => {
                let (_, kept) = entry.get();
                tracing::warn!(
                    accelerator,
                    %action,
                    %kept,
                    "accelerator bound to several actions, keeping the first"
                );
            }
        }
    }

    desired
}

fn fall_back<S: ShortcutRegistry + ?Sized>(registry: &S, update: &mut ShortcutUpdate) {
    update.fell_back = true;
    if let Err(err) = registry.unregister_all() {
        tracing::error!(error = %err, "failed to unregister shortcuts");
    }
}

/// Brings `registry` in line with `table`.
///
/// Only accelerators that are no longer wanted (or now fire a different
/// action) are unregistered, and only missing ones are registered. If the
/// registry cannot be read or an unregister fails, everything is dropped
/// and the full table is registered again.
pub fn update_shortcuts<S: ShortcutRegistry + ?Sized>(
    table: &KeybindTable,
    registry: &S,
) -> ShortcutUpdate {
    let desired = desired_bindings(table);
    let mut update = ShortcutUpdate::default();

    let mut live = match registry.registered() {
        Ok(live) => live,
        Err(err) => {
            tracing::warn!(error = %err, "cannot read registered shortcuts, re-registering all");
            fall_back(registry, &mut update);
            BTreeMap::new()
        }
    };

    let stale: Vec<String> = live
        .iter()
        .filter(|(accelerator, action)| {
            desired.get(&binding_key(accelerator)).map(|(_, wanted)| wanted) != Some(*action)
        })
        .map(|(accelerator, _)| accelerator.clone())
        .collect();

    for accelerator in stale {
        match registry.unregister(&accelerator) {
            Ok(()) => {
                live.remove(&accelerator);
                update.unregistered.push(accelerator);
            }
            Err(err) => {
                tracing::warn!(
                    accelerator = %accelerator,
                    error = %err,
                    "unregister failed, re-registering all"
                );
                fall_back(registry, &mut update);
                live.clear();
                break;
            }
        }
    }

    let live: BTreeSet<String> = live.keys().map(|accelerator| binding_key(accelerator)).collect();

    for (key, (accelerator, action)) in desired {
        if live.contains(&key) {
            continue;
        }
        match registry.register(&accelerator, action) {
            Ok(()) => update.registered.push(accelerator),
            Err(err) => {
                tracing::warn!(
                    accelerator = %accelerator,
                    %action,
                    error = %err,
                    "failed to register shortcut"
                );
                update.failed.push(accelerator);
            }
        }
    }

    tracing::debug!(
        registered = update.registered.len(),
        unregistered = update.unregistered.len(),
        failed = update.failed.len(),
        "shortcuts updated"
    );

    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::table::{KeybindOverrides, Platform};
    use crate::testing::{FakeRegistry, RegistryCall};

    fn defaults() -> KeybindTable { KeybindTable::defaults(Platform::MacOs) }

    #[test]
    fn test_first_update_registers_everything() {
        let registry = FakeRegistry::new();
        let update = update_shortcuts(&defaults(), &registry);

        assert_eq!(update.registered.len(), ShortcutAction::ALL.len());
        assert!(update.unregistered.is_empty());
        assert_eq!(
            registry.bound().get("Command+M"),
            Some(&ShortcutAction::ToggleClickThrough)
        );
        assert_eq!(registry.bound().get("Option+Up"), Some(&ShortcutAction::MoveUp));
    }

    #[test]
    fn test_unchanged_table_touches_nothing() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.clear_calls();

        let update = update_shortcuts(&defaults(), &registry);
        assert_eq!(update, ShortcutUpdate::default());
        assert!(registry.calls().is_empty());
    }

    #[test]
    fn test_changed_binding_is_the_only_one_touched() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.clear_calls();

        let overrides =
            KeybindOverrides::from([(ShortcutAction::ToggleClickThrough, "Cmd+K".to_string())]);
        update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert_eq!(
            registry.calls(),
            vec![
                RegistryCall::Unregister("Command+M".to_string()),
                RegistryCall::Register("Command+K".to_string(), ShortcutAction::ToggleClickThrough),
            ]
        );
    }

    #[test]
    fn test_cleared_binding_is_unregistered() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.clear_calls();

        let overrides = KeybindOverrides::from([(ShortcutAction::ScrollUp, String::new())]);
        let update = update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert_eq!(update.unregistered, vec!["Command+Shift+Up".to_string()]);
        assert!(update.registered.is_empty());
        assert!(!registry.bound().contains_key("Command+Shift+Up"));
    }

    #[test]
    fn test_swapped_accelerators_are_rebound() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);

        let overrides = KeybindOverrides::from([
            (ShortcutAction::MoveUp, "Alt+Down".to_string()),
            (ShortcutAction::MoveDown, "Alt+Up".to_string()),
        ]);
        update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        let bound = registry.bound();
        assert_eq!(bound.get("Option+Down"), Some(&ShortcutAction::MoveUp));
        assert_eq!(bound.get("Option+Up"), Some(&ShortcutAction::MoveDown));
    }

    #[test]
    fn test_duplicate_accelerator_keeps_first_action() {
        let registry = FakeRegistry::new();
        let overrides =
            KeybindOverrides::from([(ShortcutAction::ScrollDown, "Cmd+Shift+Up".to_string())]);

        update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert_eq!(registry.bound().get("Command+Shift+Up"), Some(&ShortcutAction::ScrollUp));
        assert_eq!(registry.bound().len(), ShortcutAction::ALL.len() - 1);
    }

    #[test]
    fn test_accelerators_differing_in_case_are_the_same_binding() {
        let registry = FakeRegistry::new();
        let overrides =
            KeybindOverrides::from([(ShortcutAction::ScrollDown, "cmd+shift+up".to_string())]);

        let update = update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert!(update.failed.is_empty());
        assert_eq!(registry.bound().get("Command+Shift+Up"), Some(&ShortcutAction::ScrollUp));
        assert_eq!(registry.bound().len(), ShortcutAction::ALL.len() - 1);
    }

    #[test]
    fn test_recased_accelerator_is_not_rebound() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.clear_calls();

        let overrides =
            KeybindOverrides::from([(ShortcutAction::ToggleClickThrough, "command+m".to_string())]);
        let update = update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert_eq!(update, ShortcutUpdate::default());
        assert!(registry.calls().is_empty());
        assert_eq!(registry.action_for("Command+M"), Some(ShortcutAction::ToggleClickThrough));
    }

    #[test]
    fn test_rejected_accelerator_does_not_block_others() {
        let registry = FakeRegistry::new();
        registry.reject("Command+M");

        let update = update_shortcuts(&defaults(), &registry);

        assert_eq!(update.failed, vec!["Command+M".to_string()]);
        assert_eq!(update.registered.len(), ShortcutAction::ALL.len() - 1);
    }

    #[test]
    fn test_unreadable_registry_falls_back_to_full_reregistration() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.clear_calls();
        registry.fail_reads(true);

        let update = update_shortcuts(&defaults(), &registry);

        assert!(update.fell_back);
        assert_eq!(registry.calls().first(), Some(&RegistryCall::UnregisterAll));
        assert_eq!(update.registered.len(), ShortcutAction::ALL.len());
        assert_eq!(registry.bound().len(), ShortcutAction::ALL.len());
    }

    #[test]
    fn test_failed_unregister_falls_back() {
        let registry = FakeRegistry::new();
        update_shortcuts(&defaults(), &registry);
        registry.fail_unregister(true);

        let overrides =
            KeybindOverrides::from([(ShortcutAction::NextStep, "Cmd+Shift+Enter".to_string())]);
        let update = update_shortcuts(&defaults().with_overrides(&overrides), &registry);

        assert!(update.fell_back);
        assert_eq!(registry.bound().get("Command+Shift+Enter"), Some(&ShortcutAction::NextStep));
        assert!(!registry.bound().contains_key("Command+Enter"));
        assert_eq!(registry.bound().len(), ShortcutAction::ALL.len());
    }
}
