//! Progress overlay state machine
//!
//! A single overlay with title, message and a percentage bar. Phases run
//! Hidden → Entering → Visible → Leaving → Hidden. Each `show`/`hide` starts
//! a new generation; deferred events from an older generation are dropped,
//! so a late fade-out can never hide an overlay that was shown again.

use super::transition::{Phase, Timing, Tween};
use crate::scheduler::{Scheduler, TimerId};
use std::time::Duration;

/// Deferred transitions, tagged with the generation that scheduled them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressEvent {
    Reveal { generation: u64 },
    Conceal { generation: u64 },
}

/// Displayed fields of the overlay
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    pub title: String,
    pub message: String,
    percent: f64,
    phase: Phase,
}

impl ProgressState {
    /// Percentage in [0, 100]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Clamp a caller-supplied percentage into [0, 100]; NaN reads as 0
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// The progress overlay
#[derive(Debug)]
pub struct ProgressIndicator {
    state: ProgressState,
    opacity: Tween,
    generation: u64,
    pending: Option<TimerId>,
    scheduler: Scheduler<ProgressEvent>,
    timing: Timing,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl ProgressIndicator {
    pub fn new(timing: Timing) -> Self {
        Self {
            state: ProgressState::default(),
            opacity: Tween::fixed(0.0),
            generation: 0,
            pending: None,
            scheduler: Scheduler::new(),
            timing,
        }
    }

    /// Show the overlay, fading it in after the reveal delay
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>, percent: f64) {
        self.state.title = title.into();
        self.state.message = message.into();
        self.state.percent = self.checked_percent(percent);
        self.state.phase = Phase::Entering;
        self.opacity = Tween::fixed(0.0);

        let generation = self.bump_generation();
        self.pending = Some(
            self.scheduler
                .schedule(self.timing.reveal_delay, ProgressEvent::Reveal { generation }),
        );
        tracing::debug!(generation, title = %self.state.title, "progress shown");
    }

    /// Replace message and percentage without animating
    pub fn update(&mut self, message: impl Into<String>, percent: f64) {
        if self.state.phase == Phase::Hidden {
            tracing::warn!("update_progress called while the progress overlay is hidden");
            return;
        }
        self.state.message = message.into();
        self.state.percent = self.checked_percent(percent);
    }

    /// Fade the overlay out, then hide it
    pub fn hide(&mut self) {
        match self.state.phase {
            Phase::Hidden => {
                tracing::warn!("hide_progress called while the progress overlay is hidden");
                return;
            }
            Phase::Leaving => {
                tracing::debug!("progress overlay already leaving");
                return;
            }
            Phase::Entering | Phase::Visible => {}
        }

        let now = self.scheduler.now();
        self.state.phase = Phase::Leaving;
        self.opacity = self.opacity.retarget(0.0, now, self.timing.transition);

        let generation = self.bump_generation();
        self.pending = Some(
            self.scheduler
                .schedule(self.timing.transition, ProgressEvent::Conceal { generation }),
        );
        tracing::debug!(generation, "progress hiding");
    }

    /// Advance simulated time, applying every transition that falls due
    pub fn tick(&mut self, elapsed: Duration) {
        let target = self.scheduler.now().saturating_add(elapsed);
        while let Some(event) = self.scheduler.next_due(target) {
            self.apply(event);
        }
        self.scheduler.settle(target);
    }

    fn apply(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Reveal { generation } if generation == self.generation => {
                let now = self.scheduler.now();
                self.state.phase = Phase::Visible;
                self.opacity = Tween::new(0.0, 1.0, now, self.timing.transition);
                self.pending = None;
            }
            ProgressEvent::Conceal { generation } if generation == self.generation => {
                self.state.phase = Phase::Hidden;
                self.opacity = Tween::fixed(0.0);
                self.pending = None;
            }
            stale => {
                tracing::debug!(?stale, current = self.generation, "discarding stale progress transition");
            }
        }
    }

    fn bump_generation(&mut self) -> u64 {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.generation += 1;
        self.generation
    }

    fn checked_percent(&self, percent: f64) -> f64 {
        if percent.is_nan() {
            tracing::warn!("progress percent is NaN, showing 0%");
        }
        clamp_percent(percent)
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current overlay opacity in [0, 1]
    pub fn opacity(&self) -> f64 {
        self.opacity.value_at(self.scheduler.now())
    }

    /// Filled cells of a bar `width` cells wide
    pub fn fill_cells(&self, width: u16) -> u16 {
        let filled = (f64::from(width) * self.state.percent / 100.0).round();
        (filled as u16).min(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::transition::{REVEAL_DELAY, TRANSITION};
    use proptest::prelude::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_show_enters_then_becomes_visible() {
        let mut progress = ProgressIndicator::default();
        progress.show("Downloading", "Preparing...", 0.0);

        assert_eq!(progress.phase(), Phase::Entering);
        assert_eq!(progress.opacity(), 0.0);

        progress.tick(REVEAL_DELAY);
        assert_eq!(progress.phase(), Phase::Visible);
        assert_eq!(progress.opacity(), 0.0);

        progress.tick(TRANSITION);
        assert_eq!(progress.opacity(), 1.0);
    }

    #[test]
    fn test_download_scenario_ends_hidden() {
        let mut progress = ProgressIndicator::default();
        progress.show("Downloading", "Preparing...", 0.0);
        progress.tick(ms(100));
        progress.update("In progress...", 45.0);
        assert_eq!(progress.state().message, "In progress...");
        assert_eq!(progress.state().percent(), 45.0);

        progress.hide();
        assert_eq!(progress.phase(), Phase::Leaving);

        progress.tick(TRANSITION);
        assert_eq!(progress.phase(), Phase::Hidden);
        assert_eq!(progress.opacity(), 0.0);
    }

    #[test]
    fn test_update_while_hidden_is_ignored() {
        let mut progress = ProgressIndicator::default();
        progress.update("ignored", 50.0);

        assert_eq!(progress.phase(), Phase::Hidden);
        assert_eq!(progress.state().message, "");
        assert_eq!(progress.state().percent(), 0.0);
    }

    #[test]
    fn test_stale_conceal_does_not_hide_new_show() {
        let mut progress = ProgressIndicator::default();
        progress.show("First", "", 0.0);
        progress.tick(ms(50));
        progress.hide();
        progress.tick(ms(100));

        // Shown again before the fade-out would have completed
        progress.show("Second", "", 10.0);
        progress.tick(ms(400));

        assert_eq!(progress.phase(), Phase::Visible);
        assert_eq!(progress.state().title, "Second");
        assert_eq!(progress.opacity(), 1.0);
    }

    #[test]
    fn test_hide_before_reveal_wins() {
        let mut progress = ProgressIndicator::default();
        progress.show("Quick", "", 0.0);
        progress.hide();
        let generation = progress.generation();

        progress.tick(ms(1000));
        assert_eq!(progress.phase(), Phase::Hidden);
        assert_eq!(progress.generation(), generation);
    }

    #[test]
    fn test_hide_while_hidden_is_noop() {
        let mut progress = ProgressIndicator::default();
        progress.hide();
        assert_eq!(progress.phase(), Phase::Hidden);
        assert_eq!(progress.generation(), 0);
    }

    #[test]
    fn test_percent_is_clamped() {
        let mut progress = ProgressIndicator::default();
        progress.show("t", "m", 140.0);
        assert_eq!(progress.state().percent(), 100.0);
        assert_eq!(progress.fill_cells(40), 40);

        progress.update("m", -12.0);
        assert_eq!(progress.state().percent(), 0.0);
        assert_eq!(progress.fill_cells(40), 0);

        progress.update("m", f64::NAN);
        assert_eq!(progress.state().percent(), 0.0);
    }

    #[test]
    fn test_fill_cells_rounds_to_width() {
        let mut progress = ProgressIndicator::default();
        progress.show("t", "m", 45.0);
        assert_eq!(progress.fill_cells(40), 18);
        assert_eq!(progress.fill_cells(0), 0);
    }

    proptest! {
        #[test]
        fn prop_rendered_percent_is_clamped(p in prop::num::f64::ANY) {
            let mut progress = ProgressIndicator::default();
            progress.show("t", "m", p);
            let shown = progress.state().percent();
            prop_assert!((0.0..=100.0).contains(&shown));
            if !p.is_nan() {
                prop_assert_eq!(shown, p.clamp(0.0, 100.0));
            }

            progress.update("m", p);
            prop_assert_eq!(progress.state().percent(), shown);
            prop_assert!(progress.fill_cells(80) <= 80);
        }
    }
}
