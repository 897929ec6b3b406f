//! A single resize animation and its lifecycle.

use std::time::Duration;

use tokio::time::Instant;

use super::easing::{ease_out, lerp_px};
use crate::window::Size;

/// Lifecycle of the animator's current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// No session has run, or the last one was aborted.
    Idle,
    /// Frames are still being produced.
    Running,
    /// A newer request replaced this session before it finished.
    Superseded,
    /// The session reached its target.
    Completed,
}

/// Next frame produced by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Intermediate size.
    Step(Size),
    /// Exact target size; the session is now completed.
    Final(Size),
}

/// One in-flight resize from `from` to `to`.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    id: u64,
    from: Size,
    to: Size,
    started: Instant,
    duration: Duration,
    state: AnimationState,
}

impl AnimationSession {
    #[must_use]
    pub const fn new(id: u64, from: Size, to: Size, started: Instant, duration: Duration) -> Self {
        Self {
            id,
            from,
            to,
            started,
            duration,
            state: AnimationState::Running,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 { self.id }

    #[must_use]
    pub const fn target(&self) -> Size { self.to }

    #[must_use]
    pub const fn state(&self) -> AnimationState { self.state }

    #[must_use]
    pub const fn is_running(&self) -> bool { matches!(self.state, AnimationState::Running) }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Produces the frame for `now`. Returns `None` once the session is no
    /// longer running.
    pub fn advance(&mut self, now: Instant) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }

        let progress = self.progress(now);
        if progress >= 1.0 {
            self.state = AnimationState::Completed;
            return Some(Frame::Final(self.to));
        }

        let eased = ease_out(progress);
        Some(Frame::Step(Size::new(
            lerp_px(self.from.width, self.to.width, eased),
            lerp_px(self.from.height, self.to.height, eased),
        )))
    }

    /// Marks a running session as replaced by a newer request.
    pub fn supersede(&mut self) {
        if self.is_running() {
            self.state = AnimationState::Superseded;
        }
    }
}
