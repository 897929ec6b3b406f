//! [`OverlayWindow`] backed by a Tauri webview window.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tauri::{LogicalPosition, LogicalSize, Runtime, WebviewWindow, WindowEvent, Wry};

use super::{OverlayWindow, Position, Size, WindowError};

impl From<tauri::Error> for WindowError {
    fn from(err: tauri::Error) -> Self { Self::Platform(err.to_string()) }
}

/// The overlay's Tauri window.
///
/// Tauri handles stay valid after the native window closes, so destruction
/// is tracked from [`WindowEvent::Destroyed`].
pub struct TauriWindow<R: Runtime = Wry> {
    window: WebviewWindow<R>,
    destroyed: Arc<AtomicBool>,
}

impl<R: Runtime> TauriWindow<R> {
    #[must_use]
    pub fn new(window: WebviewWindow<R>) -> Self {
        let destroyed = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&destroyed);
        window.on_window_event(move |event| {
            if matches!(event, WindowEvent::Destroyed) {
                tracing::debug!("overlay window destroyed");
                flag.store(true, Ordering::Relaxed);
            }
        });

        Self { window, destroyed }
    }

    fn ensure_alive(&self) -> Result<(), WindowError> {
        if self.is_destroyed() { Err(WindowError::Destroyed) } else { Ok(()) }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn logical_size(width: f64, height: f64) -> Size {
    Size::new(width.round().max(0.0) as u32, height.round().max(0.0) as u32)
}

impl<R: Runtime> OverlayWindow for TauriWindow<R> {
    fn is_destroyed(&self) -> bool { self.destroyed.load(Ordering::Relaxed) }

    fn size(&self) -> Result<Size, WindowError> {
        self.ensure_alive()?;
        let scale = self.window.scale_factor()?;
        let size = self.window.outer_size()?.to_logical::<f64>(scale);
        Ok(logical_size(size.width, size.height))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn position(&self) -> Result<Position, WindowError> {
        self.ensure_alive()?;
        let scale = self.window.scale_factor()?;
        let position = self.window.outer_position()?.to_logical::<f64>(scale);
        Ok(Position::new(position.x.round() as i32, position.y.round() as i32))
    }

    fn is_visible(&self) -> Result<bool, WindowError> {
        self.ensure_alive()?;
        Ok(self.window.is_visible()?)
    }

    fn set_size(&self, size: Size) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.set_size(LogicalSize::new(f64::from(size.width), f64::from(size.height)))?;
        Ok(())
    }

    fn set_position(&self, position: Position) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window
            .set_position(LogicalPosition::new(f64::from(position.x), f64::from(position.y)))?;
        Ok(())
    }

    fn set_resizable(&self, resizable: bool) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.set_resizable(resizable)?;
        Ok(())
    }

    fn show_inactive(&self) -> Result<(), WindowError> {
        self.ensure_alive()?;
        // Tauri has no show-without-activate call. `show()` does not request
        // focus, but whether the platform activates the window anyway is up
        // to the window manager.
        self.window.show()?;
        Ok(())
    }

    fn hide(&self) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.hide()?;
        Ok(())
    }

    fn minimize(&self) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.minimize()?;
        Ok(())
    }

    fn set_ignore_cursor_events(&self, ignore: bool) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.set_ignore_cursor_events(ignore)?;
        Ok(())
    }

    fn set_content_protected(&self, protected: bool) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.window.set_content_protected(protected)?;
        Ok(())
    }

    fn work_area(&self) -> Result<Size, WindowError> {
        self.ensure_alive()?;
        let monitor = self.window.primary_monitor()?.ok_or(WindowError::NoDisplay)?;
        let area = monitor.work_area().size.to_logical::<f64>(monitor.scale_factor());
        Ok(logical_size(area.width, area.height))
    }
}
