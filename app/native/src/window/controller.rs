//! Window controller.
//!
//! Owns the overlay window handle together with the mouse pass-through flag.
//! Every operation checks the destroyed flag right before touching the
//! window; on a destroyed window the operation does nothing.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{OverlayWindow, Position, Size, WindowError};
use crate::constants::MOVE_STEP_FRACTION;

/// Controller for the single overlay window.
pub struct WindowController<W> {
    window: W,
    click_through: AtomicBool,
}

impl<W: OverlayWindow> WindowController<W> {
    #[must_use]
    pub const fn new(window: W) -> Self {
        Self {
            window,
            click_through: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool { self.window.is_destroyed() }

    /// Returns the window if it is still alive.
    fn live(&self) -> Option<&W> { (!self.window.is_destroyed()).then_some(&self.window) }

    /// Runs a best-effort mutation, logging failures.
    fn apply(&self, operation: &'static str, f: impl FnOnce(&W) -> Result<(), WindowError>) {
        let Some(window) = self.live() else {
            return;
        };

        if let Err(err) = f(window) {
            tracing::warn!(operation, error = %err, "window operation failed");
        }
    }

    /// Returns whether the window is currently shown. A destroyed window is
    /// never visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.live().and_then(|window| window.is_visible().ok()).unwrap_or(false)
    }

    #[must_use]
    pub fn size(&self) -> Option<Size> { self.live().and_then(|window| window.size().ok()) }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.live().and_then(|window| window.position().ok())
    }

    /// Size of the primary display's work area.
    #[must_use]
    pub fn work_area(&self) -> Option<Size> {
        let window = self.live()?;
        match window.work_area() {
            Ok(area) => Some(area),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read display work area");
                None
            }
        }
    }

    pub fn set_size(&self, size: Size) { self.apply("set_size", |window| window.set_size(size)); }

    pub fn set_position(&self, position: Position) {
        self.apply("set_position", |window| window.set_position(position));
    }

    pub fn set_resizable(&self, resizable: bool) {
        self.apply("set_resizable", |window| window.set_resizable(resizable));
    }

    pub fn minimize(&self) { self.apply("minimize", W::minimize); }

    pub fn set_content_protection(&self, protected: bool) {
        self.apply("set_content_protected", |window| window.set_content_protected(protected));
    }

    /// Shifts the window by `(dx, dy)`.
    pub fn move_by(&self, dx: i32, dy: i32) {
        let Some(position) = self.position() else {
            return;
        };
        self.set_position(position.offset(dx, dy));
    }

    /// Shows (without focusing) or hides the window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Destroyed`] if the window is gone, or the
    /// backend error if showing or hiding fails.
    pub fn set_visible(&self, visible: bool) -> Result<(), WindowError> {
        let window = self.live().ok_or(WindowError::Destroyed)?;
        if visible { window.show_inactive() } else { window.hide() }
    }

    /// Hides the window if visible, otherwise shows it. Returns the new
    /// visibility.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Destroyed`] if the window is gone, or the
    /// backend error if the toggle fails.
    pub fn toggle_visibility(&self) -> Result<bool, WindowError> {
        let window = self.live().ok_or(WindowError::Destroyed)?;
        let visible = !window.is_visible()?;
        self.set_visible(visible)?;
        Ok(visible)
    }

    /// Sets whether pointer input passes through the window.
    pub fn set_ignore_input(&self, ignore: bool) {
        self.apply("set_ignore_cursor_events", |window| window.set_ignore_cursor_events(ignore));
    }

    #[must_use]
    pub fn is_click_through(&self) -> bool { self.click_through.load(Ordering::Relaxed) }

    /// Flips the pass-through flag and applies it. Returns the new value, or
    /// `None` if the window is destroyed.
    pub fn toggle_click_through(&self) -> Option<bool> {
        if self.is_destroyed() {
            return None;
        }

        let enabled = !self.click_through.fetch_xor(true, Ordering::Relaxed);
        self.set_ignore_input(enabled);
        Some(enabled)
    }

    /// Restores normal pointer capture regardless of the current flag.
    /// Returns whether click-through was enabled before the reset.
    pub fn reset_click_through(&self) -> bool {
        if self.is_destroyed() {
            return false;
        }

        let was_enabled = self.click_through.swap(false, Ordering::Relaxed);
        self.set_ignore_input(false);
        was_enabled
    }

    /// Centers the window horizontally on the work area and pins it to the
    /// top edge, assuming the window is `width` wide.
    pub fn center_top(&self, width: u32) {
        let Some(area) = self.work_area() else {
            return;
        };
        self.set_position(Position::new(centered_x(area.width, width), 0));
    }

    /// Distance moved by one movement shortcut: a tenth of the shorter side
    /// of the work area.
    #[must_use]
    pub fn move_step(&self) -> Option<i32> { self.work_area().map(move_step_for) }
}

/// `floor((screen_width - width) / 2)`, negative when the window is wider
/// than the screen.
#[allow(clippy::cast_possible_truncation)]
fn centered_x(screen_width: u32, width: u32) -> i32 {
    (i64::from(screen_width) - i64::from(width)).div_euclid(2) as i32
}

#[allow(clippy::cast_possible_truncation)]
fn move_step_for(area: Size) -> i32 {
    (MOVE_STEP_FRACTION * f64::from(area.width.min(area.height))).floor() as i32
}
