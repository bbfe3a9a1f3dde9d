//! Shared transition timing and interpolation
//!
//! Every overlay in the crate animates with the same duration. The short
//! reveal delay gives the host one frame at the starting value before the
//! tween begins, so an appearing overlay is drawn fading in rather than
//! popping straight to full opacity.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Length of every fade/slide transition
pub const TRANSITION: Duration = Duration::from_millis(300);

/// Deferred tick between mounting an overlay and starting its entrance tween
pub const REVEAL_DELAY: Duration = Duration::from_millis(10);

/// Lifecycle phase shared by the progress overlay and modals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Hidden,
    Entering,
    Visible,
    Leaving,
}

impl Phase {
    /// Whether the overlay occupies screen space in this phase
    pub fn is_rendered(self) -> bool {
        !matches!(self, Phase::Hidden)
    }

    /// Entering or Visible: the overlay counts as open
    pub fn is_open(self) -> bool {
        matches!(self, Phase::Entering | Phase::Visible)
    }
}

/// Transition timing used by the stateful components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub transition: Duration,
    pub reveal_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            transition: TRANSITION,
            reveal_delay: REVEAL_DELAY,
        }
    }
}

/// Eased interpolation between two values over a time window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl Tween {
    /// A tween that has already settled at `value`
    pub fn fixed(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn new(from: f64, to: f64, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Start a new tween towards `to` from wherever this one is at `now`
    pub fn retarget(&self, to: f64, now: Duration, duration: Duration) -> Self {
        Self::new(self.value_at(now), to, now, duration)
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Interpolated value at `now`, with ease-in-out applied
    pub fn value_at(&self, now: Duration) -> f64 {
        if self.duration.is_zero() || now >= self.start.saturating_add(self.duration) {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = now.saturating_sub(self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        now >= self.start.saturating_add(self.duration)
    }
}

/// Cubic ease-in-out on [0, 1]
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
