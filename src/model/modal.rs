//! Modal registry and active stack
//!
//! Modals are keyed by a caller-chosen id. The first `open` creates and mounts
//! one; later opens reuse it, so identity is stable across open/close cycles.
//! Modals are never destroyed, only hidden.
//!
//! The active stack lists open modal ids with the most recent last. An id
//! leaves the stack once its fade-out completes. Escape dismisses every open
//! modal at once rather than only the topmost one.

use super::transition::{Phase, Timing, Tween};
use crate::scheduler::{Scheduler, TimerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// What `open` does with an id that is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReopenPolicy {
    /// Reveal the stored modal and ignore any new content
    #[default]
    RevealExisting,
    /// Refuse a reopen that carries different, non-empty content
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("modal '{0}' is already registered with different content")]
    ContentConflict(String),
}

/// Result of a successful `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new modal was created and mounted
    Created,
    /// A registered, closed modal was revealed again
    Revealed,
    /// The modal was already open; it was only raised to the top
    AlreadyOpen,
}

/// Where a click landed on a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the content
    Backdrop,
    /// The content panel itself
    Content,
}

/// A registered modal dialog
#[derive(Debug, Clone)]
pub struct Modal {
    pub id: String,
    pub content: String,
    pub mounted: bool,
    phase: Phase,
    opacity: Tween,
    generation: u64,
    pending: Option<TimerId>,
}

impl Modal {
    fn new(id: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            mounted: true,
            phase: Phase::Hidden,
            opacity: Tween::fixed(0.0),
            generation: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModalEvent {
    Reveal { id: String, generation: u64 },
    Conceal { id: String, generation: u64 },
}

/// Registry of modals plus the ordered set of open ids
#[derive(Debug)]
pub struct ModalStack {
    registry: HashMap<String, Modal>,
    active: Vec<String>,
    scheduler: Scheduler<ModalEvent>,
    timing: Timing,
    policy: ReopenPolicy,
}

impl Default for ModalStack {
    fn default() -> Self {
        Self::new(Timing::default(), ReopenPolicy::default())
    }
}

impl ModalStack {
    /// Create an empty modal stack
    pub fn new(timing: Timing, policy: ReopenPolicy) -> Self {
        Self {
            registry: HashMap::new(),
            active: Vec::new(),
            scheduler: Scheduler::new(),
            timing,
            policy,
        }
    }

    /// Open a modal, creating it on first use
    pub fn open(&mut self, id: &str, content: &str) -> Result<OpenOutcome, ModalError> {
        let outcome = match self.registry.get(id) {
            None => {
                self.registry.insert(id.to_string(), Modal::new(id, content));
                tracing::debug!(id, "modal created");
                OpenOutcome::Created
            }
            Some(existing) => {
                if self.policy == ReopenPolicy::Reject
                    && !content.is_empty()
                    && existing.content != content
                {
                    return Err(ModalError::ContentConflict(id.to_string()));
                }
                if existing.phase.is_open() {
                    OpenOutcome::AlreadyOpen
                } else {
                    OpenOutcome::Revealed
                }
            }
        };

        self.raise(id);
        if outcome != OpenOutcome::AlreadyOpen {
            self.reveal(id);
        }
        Ok(outcome)
    }

    /// Start closing a modal. Returns false if it was not open.
    pub fn close(&mut self, id: &str) -> bool {
        let now = self.scheduler.now();
        let transition = self.timing.transition;

        let Some(modal) = self.registry.get_mut(id) else {
            tracing::debug!(id, "close requested for unknown modal");
            return false;
        };
        if !modal.phase.is_open() {
            tracing::debug!(id, phase = ?modal.phase, "close requested for modal that is not open");
            return false;
        }

        if let Some(timer) = modal.pending.take() {
            self.scheduler.cancel(timer);
        }
        modal.phase = Phase::Leaving;
        modal.opacity = modal.opacity.retarget(0.0, now, transition);
        modal.generation += 1;

        let event = ModalEvent::Conceal {
            id: id.to_string(),
            generation: modal.generation,
        };
        modal.pending = Some(self.scheduler.schedule(transition, event));
        true
    }

    /// Close every open modal, returning how many started closing
    pub fn close_all(&mut self) -> usize {
        let snapshot = self.active.clone();
        snapshot.iter().filter(|id| self.close(id)).count()
    }

    /// Escape dismisses every open modal, not just the topmost
    pub fn escape(&mut self) -> usize {
        self.close_all()
    }

    /// Clicking the backdrop of a modal closes it
    pub fn click(&mut self, id: &str, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => self.close(id),
            ClickTarget::Content => false,
        }
    }

    /// Advance simulated time, finishing any transitions that fall due
    pub fn tick(&mut self, elapsed: Duration) {
        let target = self.scheduler.now().saturating_add(elapsed);
        while let Some(event) = self.scheduler.next_due(target) {
            self.apply(event);
        }
        self.scheduler.settle(target);
    }

    fn apply(&mut self, event: ModalEvent) {
        let now = self.scheduler.now();
        let transition = self.timing.transition;

        match event {
            ModalEvent::Reveal { id, generation } => {
                let Some(modal) = self.current_mut(&id, generation) else {
                    return;
                };
                modal.phase = Phase::Visible;
                modal.opacity = modal.opacity.retarget(1.0, now, transition);
                modal.pending = None;
            }
            ModalEvent::Conceal { id, generation } => {
                let Some(modal) = self.current_mut(&id, generation) else {
                    return;
                };
                modal.phase = Phase::Hidden;
                modal.opacity = Tween::fixed(0.0);
                modal.pending = None;
                self.active.retain(|active| active != &id);
            }
        }
    }

    fn current_mut(&mut self, id: &str, generation: u64) -> Option<&mut Modal> {
        let modal = self.registry.get_mut(id)?;
        if modal.generation != generation {
            tracing::debug!(id, generation, current = modal.generation, "discarding stale modal transition");
            return None;
        }
        Some(modal)
    }

    /// Move `id` to the top of the active stack, pushing it if absent
    fn raise(&mut self, id: &str) {
        self.active.retain(|active| active != id);
        self.active.push(id.to_string());
    }

    fn reveal(&mut self, id: &str) {
        let reveal_delay = self.timing.reveal_delay;
        let Some(modal) = self.registry.get_mut(id) else {
            return;
        };

        if let Some(timer) = modal.pending.take() {
            self.scheduler.cancel(timer);
        }
        modal.mounted = true;
        modal.phase = Phase::Entering;
        modal.generation += 1;

        let event = ModalEvent::Reveal {
            id: id.to_string(),
            generation: modal.generation,
        };
        modal.pending = Some(self.scheduler.schedule(reveal_delay, event));
    }

    pub fn get(&self, id: &str) -> Option<&Modal> {
        self.registry.get(id)
    }

    /// Ids on the active stack, most recent last
    pub fn active_ids(&self) -> &[String] {
        &self.active
    }

    /// Modals to draw, bottom to top
    pub fn rendered(&self) -> impl Iterator<Item = &Modal> {
        self.active
            .iter()
            .filter_map(|id| self.registry.get(id))
            .filter(|modal| modal.phase.is_rendered())
    }

    /// Topmost modal that still accepts input
    pub fn topmost_open(&self) -> Option<&Modal> {
        self.active
            .iter()
            .rev()
            .filter_map(|id| self.registry.get(id))
            .find(|modal| modal.phase.is_open())
    }

    /// Check if any modal is open
    pub fn is_empty(&self) -> bool {
        self.topmost_open().is_none()
    }

    /// Number of registered modals, open or not
    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    pub fn opacity(&self, modal: &Modal) -> f64 {
        modal.opacity.value_at(self.scheduler.now())
    }
}
