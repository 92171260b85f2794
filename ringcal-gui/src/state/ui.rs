//! Transient UI state of the calibrator window.

use std::time::{Duration, Instant};

/// How long the finished calibration stays on screen before the window closes.
pub const CLOSE_DELAY: Duration = Duration::from_secs(1);

/// UI flags and status text.
#[derive(Default)]
pub struct UiState {
    /// When the second point landed.
    pub completed_at: Option<Instant>,
    /// Set by the cancel button, handled at the end of the frame.
    pub cancel_requested: bool,
    /// Last custom multiplier parse error.
    pub custom_error: Option<String>,
    /// Last pixel under the pointer.
    pub cursor: Option<(i32, i32)>,
}

impl UiState {
    /// Time left before the window should close, `None` until complete.
    pub fn close_remaining(&self, now: Instant) -> Option<Duration> {
        self.completed_at
            .map(|at| CLOSE_DELAY.saturating_sub(now.saturating_duration_since(at)))
    }
}
