//! Centralized event definitions for Tauri frontend communication.
//!
//! All events emitted to the frontend are defined here to ensure consistency
//! and make it easy to keep Rust and TypeScript in sync.
//!
//! The overlay events keep the bare names the assistant UI already listens
//! for. Events owned by Halo's own plumbing use the `halo://<module>/<event>`
//! pattern.

/// Click-through (mouse pass-through) events.
pub mod click_through {
    /// Emitted when the click-through shortcut flips the pass-through flag.
    ///
    /// Payload: `bool` - `true` if the window now forwards pointer events.
    pub const TOGGLED: &str = "click-through-toggled";
}

/// Response navigation events.
pub mod navigation {
    /// Emitted to show the previous assistant response.
    ///
    /// Payload: `()` (no payload)
    pub const PREVIOUS_RESPONSE: &str = "navigate-previous-response";

    /// Emitted to show the next assistant response.
    ///
    /// Payload: `()` (no payload)
    pub const NEXT_RESPONSE: &str = "navigate-next-response";

    /// Emitted to scroll the current response up.
    ///
    /// Payload: `()` (no payload)
    pub const SCROLL_UP: &str = "scroll-response-up";

    /// Emitted to scroll the current response down.
    ///
    /// Payload: `()` (no payload)
    pub const SCROLL_DOWN: &str = "scroll-response-down";
}

/// UI query bridge events.
pub mod ui {
    /// Emitted to ask the page for a value.
    ///
    /// Payload: `{ id: string, query: string }`. The page answers through the
    /// `ui_query_response` command with the same `id`.
    pub const QUERY: &str = "halo://ui/query";
}
