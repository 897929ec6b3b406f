//! Resize animation for the overlay window.
//!
//! A resize request becomes an [`AnimationSession`] owned by the
//! [`ResizeAnimator`]. The request's task then ticks at a fixed frame
//! interval, and on every tick it advances the session only if that session
//! is still the animator's current one. Starting a new request marks the
//! previous session as superseded, so its task stops at its next tick
//! without touching the window again.
//!
//! # Usage
//!
//! ```rust,ignore
//! let animator = ResizeAnimator::new();
//! let outcome = animator.animate(&controller, Size::new(750, 500)).await;
//! ```

mod easing;
mod session;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
pub use session::{AnimationSession, AnimationState, Frame};
use tokio::time::Instant;

use crate::constants::{RESIZE_ANIMATION_DURATION, RESIZE_FRAME_INTERVAL};
use crate::window::{OverlayWindow, Size, WindowController};

/// Timing of a resize animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    /// Total animation length.
    pub duration: Duration,
    /// Delay between frames.
    pub frame_interval: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            duration: RESIZE_ANIMATION_DURATION,
            frame_interval: RESIZE_FRAME_INTERVAL,
        }
    }
}

/// How a resize request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The window already had the requested size; nothing was changed.
    AlreadyAtTarget,
    /// The window reached the requested size.
    Completed,
    /// A newer request took over before this one finished.
    Superseded,
    /// The window was destroyed before or during the animation.
    WindowDestroyed,
}

/// Drives the overlay window toward target sizes, one session at a time.
pub struct ResizeAnimator {
    timing: AnimationTiming,
    current: Mutex<Option<AnimationSession>>,
    next_id: AtomicU64,
}

impl Default for ResizeAnimator {
    fn default() -> Self { Self::new() }
}

impl ResizeAnimator {
    #[must_use]
    pub fn new() -> Self { Self::with_timing(AnimationTiming::default()) }

    #[must_use]
    pub const fn with_timing(timing: AnimationTiming) -> Self {
        Self {
            timing,
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub const fn timing(&self) -> AnimationTiming { self.timing }

    /// State of the most recent session.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.current.lock().as_ref().map_or(AnimationState::Idle, AnimationSession::state)
    }

    /// Animates the window to `target`, superseding any animation in flight.
    ///
    /// Resolves once this request completes, is superseded, or the window is
    /// destroyed. Every frame resizes the window and recenters it at the top
    /// of the work area.
    pub async fn animate<W: OverlayWindow>(
        &self,
        controller: &WindowController<W>,
        target: Size,
    ) -> AnimationOutcome {
        let id = match self.begin(controller, target) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        loop {
            tokio::time::sleep(self.timing.frame_interval).await;

            if let Some(outcome) = self.step(id, controller) {
                return outcome;
            }
        }
    }

    /// Supersedes the current session and starts a new one, unless the
    /// request can be answered right away.
    fn begin<W: OverlayWindow>(
        &self,
        controller: &WindowController<W>,
        target: Size,
    ) -> Result<u64, AnimationOutcome> {
        if controller.is_destroyed() {
            return Err(AnimationOutcome::WindowDestroyed);
        }

        let mut current = self.current.lock();

        let interrupted = current.as_mut().is_some_and(|session| {
            let running = session.is_running();
            session.supersede();
            running
        });
        if interrupted {
            tracing::debug!(?target, "superseding in-flight resize animation");
        }

        let Some(from) = controller.size() else {
            *current = None;
            return Err(AnimationOutcome::WindowDestroyed);
        };

        if from == target {
            // The interrupted session left the window resizable.
            if interrupted {
                controller.set_resizable(false);
            }
            return Err(AnimationOutcome::AlreadyAtTarget);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, ?from, ?target, "starting resize animation");

        controller.set_resizable(true);
        *current = Some(AnimationSession::new(
            id,
            from,
            target,
            Instant::now(),
            self.timing.duration,
        ));

        Ok(id)
    }

    /// Applies the next frame of session `id`. Returns the outcome once the
    /// request is over.
    fn step<W: OverlayWindow>(
        &self,
        id: u64,
        controller: &WindowController<W>,
    ) -> Option<AnimationOutcome> {
        let mut current = self.current.lock();

        let Some(session) = current.as_mut().filter(|session| session.id() == id) else {
            return Some(AnimationOutcome::Superseded);
        };

        if controller.is_destroyed() {
            tracing::debug!(id, "window destroyed mid-animation, aborting");
            *current = None;
            return Some(AnimationOutcome::WindowDestroyed);
        }

        match session.advance(Instant::now()) {
            Some(Frame::Step(size)) => {
                controller.set_size(size);
                controller.center_top(size.width);
                None
            }
            Some(Frame::Final(size)) => {
                controller.set_resizable(false);
                controller.set_size(size);
                controller.center_top(size.width);
                tracing::debug!(id, ?size, "resize animation completed");
                Some(AnimationOutcome::Completed)
            }
            None => Some(AnimationOutcome::Superseded),
        }
    }
}
