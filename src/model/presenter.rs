//! Presentation service
//!
//! Owns the progress overlay, the notification queue and the modal stack.
//! The application creates one at start-up and hands `&mut` access to
//! whatever code needs to surface feedback. The three parts never call each
//! other; the presenter only fans out the clock tick.

use super::modal::{ModalStack, ReopenPolicy};
use super::notification::{NotificationQueue, Severity};
use super::progress::ProgressIndicator;
use super::transition::{Phase, Timing};
use std::time::Duration;

#[derive(Debug)]
pub struct Presenter {
    pub progress: ProgressIndicator,
    pub notifications: NotificationQueue,
    pub modals: ModalStack,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(
            Timing::default(),
            super::notification::DEFAULT_NOTIFICATION_DURATION,
            ReopenPolicy::default(),
        )
    }
}

impl Presenter {
    pub fn new(timing: Timing, notification_duration: Duration, reopen: ReopenPolicy) -> Self {
        Self {
            progress: ProgressIndicator::new(timing),
            notifications: NotificationQueue::new(timing, notification_duration),
            modals: ModalStack::new(timing, reopen),
        }
    }

    pub fn show_progress(&mut self, title: &str, message: &str, percent: f64) {
        self.progress.show(title, message, percent);
    }

    pub fn update_progress(&mut self, message: &str, percent: f64) {
        self.progress.update(message, percent);
    }

    pub fn hide_progress(&mut self) {
        self.progress.hide();
    }

    pub fn show_notification(&mut self, message: &str, severity: Severity, duration: Duration) -> u64 {
        self.notifications.enqueue(message, severity, duration)
    }

    pub fn show_success(&mut self, message: &str) -> u64 {
        self.notifications.success(message)
    }

    pub fn show_error(&mut self, message: &str) -> u64 {
        self.notifications.error(message)
    }

    pub fn show_warning(&mut self, message: &str) -> u64 {
        self.notifications.warning(message)
    }

    pub fn show_info(&mut self, message: &str) -> u64 {
        self.notifications.info(message)
    }

    /// A collaborator's operation failed: drop any progress overlay and tell the user
    pub fn report_failure(&mut self, message: &str) -> u64 {
        if self.progress.phase().is_open() {
            self.progress.hide();
        }
        self.notifications.error(message)
    }

    /// Advance every component's clock by the same amount
    pub fn tick(&mut self, elapsed: Duration) {
        self.progress.tick(elapsed);
        self.notifications.tick(elapsed);
        self.modals.tick(elapsed);
    }

    /// Whether anything is mid-transition or on screen and needs frequent redraws
    pub fn is_animating(&self) -> bool {
        self.progress.phase() != Phase::Hidden
            || !self.notifications.is_empty()
            || self.modals.rendered().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::notification::NotificationPhase;
    use crate::model::transition::{REVEAL_DELAY, TRANSITION};

    #[test]
    fn test_report_failure_hides_progress_and_posts_error() {
        let mut presenter = Presenter::default();
        presenter.show_progress("Downloading", "Preparing...", 0.0);
        presenter.tick(Duration::from_millis(50));

        let id = presenter.report_failure("Download failed, please retry");
        assert_eq!(presenter.progress.phase(), Phase::Leaving);

        presenter.tick(REVEAL_DELAY + TRANSITION);
        assert_eq!(presenter.progress.phase(), Phase::Hidden);
        let toast = presenter.notifications.get(id).unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.phase(), NotificationPhase::Visible);
    }

    #[test]
    fn test_report_failure_without_progress_only_notifies() {
        let mut presenter = Presenter::default();
        presenter.report_failure("Copy failed");

        assert_eq!(presenter.progress.phase(), Phase::Hidden);
        assert_eq!(presenter.notifications.len(), 1);
    }

    #[test]
    fn test_idle_presenter_is_not_animating() {
        let mut presenter = Presenter::default();
        assert!(!presenter.is_animating());

        presenter.show_info("hi");
        assert!(presenter.is_animating());
        presenter.tick(Duration::from_secs(10));
        assert!(!presenter.is_animating());
    }
}
