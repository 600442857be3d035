//! Stage Transition Animation
//!
//! Drives a single eased progress value from 0 to 1 over a fixed duration.
//! Time is measured in egui frame time (`ui.input(|i| i.time)`, seconds), so
//! the driver is deterministic under a test harness and needs no timer thread.
//!
//! ## States
//!
//! | State     | Progress        | Leaves on                      |
//! |-----------|-----------------|--------------------------------|
//! | Idle      | 1.0             | `restart()`                    |
//! | Animating | rising, `[0,1)` | linear progress reaching 1.0   |
//!
//! A restart while animating begins again from 0. The start time is taken from
//! the first tick after the restart, so a stage change made between frames
//! animates for the full duration.

#![warn(clippy::all, rust_2018_idioms)]

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default transition duration
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(450);

/// Easing curve applied to linear animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing
    Linear,
    /// Cubic ease-out: fast start, gentle landing
    EaseOut,
    /// Cubic ease-in-out
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` to eased progress; `f(0) = 0`, `f(1) = 1`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Phase of the animation driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationPhase {
    /// No transition in flight, progress is 1.0
    Idle,
    /// Transition in flight; `started_at` is set by the first tick
    Animating { started_at: Option<f64> },
}

/// Time-based progress driver for stage transitions
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    duration: Duration,
    easing: Easing,
    phase: AnimationPhase,
    /// Eased progress as of the last tick
    progress: f32,
    /// Set once the owner has torn the driver down
    stopped: bool,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DURATION)
    }
}

impl AnimationDriver {
    /// Create an idle driver
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::default(),
            phase: AnimationPhase::Idle,
            progress: 1.0,
            stopped: false,
        }
    }

    /// Set easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Eased progress as of the last tick
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, AnimationPhase::Animating { .. })
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Begin a new transition from progress 0
    ///
    /// Ignored once the driver has been stopped.
    pub fn restart(&mut self) {
        if self.stopped {
            debug!("Ignoring restart on stopped animation driver");
            return;
        }
        if self.is_animating() {
            debug!("Restarting stage animation mid-flight at progress {:.3}", self.progress);
        }
        self.phase = AnimationPhase::Animating { started_at: None };
        self.progress = 0.0;
    }

    /// Advance to frame time `now` (seconds) and return eased progress
    pub fn tick(&mut self, now: f64) -> f32 {
        let started_at = match self.phase {
            AnimationPhase::Idle => return self.progress,
            AnimationPhase::Animating { started_at } => started_at.unwrap_or(now),
        };

        let duration = self.duration.as_secs_f64();
        let linear = if duration <= 0.0 {
            1.0
        } else {
            ((now - started_at) / duration).clamp(0.0, 1.0) as f32
        };

        if linear >= 1.0 {
            self.phase = AnimationPhase::Idle;
            self.progress = 1.0;
            debug!("Stage animation complete");
        } else {
            self.phase = AnimationPhase::Animating {
                started_at: Some(started_at),
            };
            self.progress = self.easing.apply(linear);
        }

        self.progress
    }

    /// Stop the driver: snap to idle and refuse further restarts
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.phase = AnimationPhase::Idle;
        self.progress = 1.0;
        debug!("Stage animation driver stopped");
    }
}
