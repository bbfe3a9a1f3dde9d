//! Model layer - presentation state with no rendering
//!
//! - `ProgressIndicator` - the single progress overlay
//! - `NotificationQueue` - timed toasts
//! - `ModalStack` - id-keyed modal registry and open stack
//! - `chart` - the bar chart renderer and its drawing surface trait
//! - `Presenter` - owns one of each stateful part

pub mod chart;
pub mod modal;
pub mod notification;
pub mod presenter;
pub mod progress;
pub mod transition;

// Re-export commonly used types
pub use chart::{ChartData, ChartOptions, DrawingSurface};
pub use modal::{ClickTarget, Modal, ModalError, ModalStack, OpenOutcome, ReopenPolicy};
pub use notification::{Notification, NotificationPhase, NotificationQueue, Severity};
pub use presenter::Presenter;
pub use progress::{ProgressIndicator, ProgressState};
pub use transition::{Phase, Timing};
