//! Overlay window abstraction.
//!
//! The overlay is a single frameless, always-on-top webview window. Everything
//! above this module talks to it through [`OverlayWindow`], which keeps the
//! controller, animator and handlers independent of Tauri.
//!
//! All coordinates are logical pixels.

mod controller;
mod webview;

pub use controller::WindowController;
pub use webview::TauriWindow;
use thiserror::Error;

/// Window dimensions in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }
}

/// Window origin in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    /// Returns this position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Errors reported by a window backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The window was closed and its handle is no longer usable.
    #[error("window has been destroyed")]
    Destroyed,
    /// No display could be found for the window.
    #[error("no display available")]
    NoDisplay,
    /// The platform rejected the operation.
    #[error("{0}")]
    Platform(String),
}

/// Handle to the managed overlay window.
///
/// Implementations report [`WindowError::Destroyed`] once the window is gone;
/// callers are expected to check [`OverlayWindow::is_destroyed`] first.
pub trait OverlayWindow: Send + Sync + 'static {
    fn is_destroyed(&self) -> bool;

    fn size(&self) -> Result<Size, WindowError>;

    fn position(&self) -> Result<Position, WindowError>;

    fn is_visible(&self) -> Result<bool, WindowError>;

    fn set_size(&self, size: Size) -> Result<(), WindowError>;

    fn set_position(&self, position: Position) -> Result<(), WindowError>;

    fn set_resizable(&self, resizable: bool) -> Result<(), WindowError>;

    /// Shows the window without requesting keyboard focus. Some window
    /// managers may still activate it.
    fn show_inactive(&self) -> Result<(), WindowError>;

    fn hide(&self) -> Result<(), WindowError>;

    fn minimize(&self) -> Result<(), WindowError>;

    /// When `true`, pointer events pass through to whatever is underneath.
    fn set_ignore_cursor_events(&self, ignore: bool) -> Result<(), WindowError>;

    /// Excludes the window from screen captures when `true`.
    fn set_content_protected(&self, protected: bool) -> Result<(), WindowError>;

    /// Size of the primary display's work area.
    fn work_area(&self) -> Result<Size, WindowError>;
}
