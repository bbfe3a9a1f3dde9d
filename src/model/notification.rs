//! Timed toast notifications
//!
//! Each notification owns its timeline, measured from the moment it was
//! enqueued:
//!
//! - `+0`: Entering, parked off-screen
//! - `+reveal_delay`: slides in over one transition
//! - `+reveal_delay + transition`: Visible
//! - `+duration`: Leaving, slides out over one transition
//! - `+duration + transition`: Removed and evicted from the active set
//!
//! The dismissal timer is independent of the slide-in, so a duration shorter
//! than the entrance sends the toast straight to Leaving. Nothing here can
//! fail; notifications are best-effort feedback.

use super::transition::{Timing, Tween};
use crate::scheduler::Scheduler;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a notification stays up when the caller does not say
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Visual severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Entering,
    Visible,
    Leaving,
    Removed,
}

/// A single toast
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub created_at: DateTime<Local>,
    phase: NotificationPhase,
    /// Horizontal offset as a fraction of the toast width; 1.0 is fully off-screen
    offset: Tween,
    generation: u64,
}

impl Notification {
    pub fn phase(&self) -> NotificationPhase {
        self.phase
    }

    pub fn formatted_time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationEvent {
    SlideIn { id: u64, generation: u64 },
    Shown { id: u64, generation: u64 },
    Dismiss { id: u64 },
    Remove { id: u64, generation: u64 },
}

/// Active notifications in creation order
#[derive(Debug)]
pub struct NotificationQueue {
    active: Vec<Notification>,
    next_id: u64,
    scheduler: Scheduler<NotificationEvent>,
    timing: Timing,
    default_duration: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Timing::default(), DEFAULT_NOTIFICATION_DURATION)
    }
}

impl NotificationQueue {
    pub fn new(timing: Timing, default_duration: Duration) -> Self {
        Self {
            active: Vec::new(),
            next_id: 1,
            scheduler: Scheduler::new(),
            timing,
            default_duration,
        }
    }

    /// Post a notification and return its id
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> u64 {
        let duration = if duration.is_zero() {
            tracing::debug!("zero notification duration, using default");
            self.default_duration
        } else {
            duration
        };

        let id = self.next_id;
        self.next_id += 1;

        let notification = Notification {
            id,
            message: message.into(),
            severity,
            duration,
            created_at: Local::now(),
            phase: NotificationPhase::Entering,
            offset: Tween::fixed(1.0),
            generation: 0,
        };
        tracing::debug!(id, ?severity, message = %notification.message, "notification posted");
        self.active.push(notification);

        self.scheduler.schedule(
            self.timing.reveal_delay,
            NotificationEvent::SlideIn { id, generation: 0 },
        );
        self.scheduler
            .schedule(duration, NotificationEvent::Dismiss { id });
        id
    }

    /// Post with the configured default duration
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.enqueue(message, severity, self.default_duration)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Error)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Warning)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Info)
    }

    /// Advance simulated time, running every timeline step that falls due
    pub fn tick(&mut self, elapsed: Duration) {
        let target = self.scheduler.now().saturating_add(elapsed);
        while let Some(event) = self.scheduler.next_due(target) {
            self.apply(event);
        }
        self.scheduler.settle(target);
    }

    fn apply(&mut self, event: NotificationEvent) {
        let now = self.scheduler.now();
        let transition = self.timing.transition;

        match event {
            NotificationEvent::SlideIn { id, generation } => {
                let Some(toast) = self.live_mut(id, Some(generation)) else {
                    return;
                };
                toast.offset = Tween::new(1.0, 0.0, now, transition);
                toast.generation += 1;
                let generation = toast.generation;
                self.scheduler
                    .schedule(transition, NotificationEvent::Shown { id, generation });
            }
            NotificationEvent::Shown { id, generation } => {
                if let Some(toast) = self.live_mut(id, Some(generation)) {
                    toast.phase = NotificationPhase::Visible;
                }
            }
            NotificationEvent::Dismiss { id } => {
                let Some(toast) = self.live_mut(id, None) else {
                    return;
                };
                toast.phase = NotificationPhase::Leaving;
                toast.offset = toast.offset.retarget(1.0, now, transition);
                toast.generation += 1;
                let generation = toast.generation;
                self.scheduler
                    .schedule(transition, NotificationEvent::Remove { id, generation });
            }
            NotificationEvent::Remove { id, generation } => {
                if let Some(toast) = self.live_mut(id, Some(generation)) {
                    toast.phase = NotificationPhase::Removed;
                }
                self.active
                    .retain(|toast| toast.phase != NotificationPhase::Removed);
            }
        }
    }

    /// Look up a live notification, optionally requiring a matching generation
    fn live_mut(&mut self, id: u64, generation: Option<u64>) -> Option<&mut Notification> {
        let toast = self.active.iter_mut().find(|toast| toast.id == id)?;
        match generation {
            Some(expected) if expected != toast.generation => {
                tracing::debug!(id, expected, current = toast.generation, "stale notification step");
                None
            }
            _ => Some(toast),
        }
    }

    /// Live notifications, oldest first
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.active.iter().find(|toast| toast.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Slide offset of a notification at the current time, 0.0 = fully on-screen
    pub fn offset(&self, toast: &Notification) -> f64 {
        toast.offset.value_at(self.scheduler.now())
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
