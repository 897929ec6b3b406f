//! Accelerator string normalization.

/// Normalizes an accelerator string to the notation the shortcut plugin
/// parses.
///
/// This function handles common variations in shortcut notation in a single
/// pass. Modifier names match in any case:
/// - "Ctrl" is normalized to "Control"
/// - "Cmd", "Super" and "Meta" are normalized to "Command"
/// - "Alt" and "Opt" are normalized to "Option"
/// - backtick (`` ` ``) is normalized to "Backquote"
/// - whitespace around each part is dropped
#[must_use]
pub fn normalize(accelerator: &str) -> String {
    let mut result = String::with_capacity(accelerator.len() + 8);

    for part in accelerator.split('+').map(str::trim) {
        if !result.is_empty() {
            result.push('+');
        }

        let normalized = match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => "Control",
            "cmd" | "command" | "super" | "meta" => "Command",
            "alt" | "opt" | "option" => "Option",
            "shift" => "Shift",
            "`" => "Backquote",
            _ => part,
        };

        result.push_str(normalized);
    }

    result
}

/// Key under which two accelerators compare equal when the shortcut plugin
/// would parse them to the same shortcut. The plugin ignores case.
#[must_use]
pub fn binding_key(accelerator: &str) -> String { normalize(accelerator).to_ascii_uppercase() }
