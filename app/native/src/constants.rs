//! Application-wide constants.

use std::time::Duration;

/// Label of the overlay window declared in `tauri.conf.json`.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// The view where click-through is allowed to stay enabled.
pub const PRIMARY_VIEW: &str = "assistant";

/// View assumed when the UI cannot report its current view.
pub const FALLBACK_VIEW: &str = "main";

/// Duration of a resize animation.
pub const RESIZE_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Interval between resize animation frames (~60 FPS).
pub const RESIZE_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How long to wait for the page to answer a UI query.
pub const UI_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Fraction of the shorter work-area side moved per movement shortcut.
pub const MOVE_STEP_FRACTION: f64 = 0.1;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "HALO_LOG";
