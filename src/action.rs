//! Action enum - everything the dashboard can be asked to do
//!
//! Key and mouse events are translated into Actions first; `App::update`
//! is the only place that mutates state in response.

use std::fmt;
use std::time::Duration;

/// Modal ids used by the dashboard
pub const QUIT_MODAL: &str = "quit";
pub const HELP_MODAL: &str = "help";
pub const ABOUT_MODAL: &str = "about";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Time passed; advances every overlay clock
    Tick(Duration),
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open (or reveal) the modal with this id
    OpenModal(String),
    /// Close the modal with this id
    CloseModal(String),
    /// Escape: close every open modal
    CloseAllModals,
    /// A click landed on a modal's backdrop
    BackdropClick(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Feedback demos
    // ─────────────────────────────────────────────────────────────────────────
    /// Fetch the configured URL with a progress overlay
    StartDownload,
    /// Show or hide a manual progress overlay
    ToggleProgress,
    /// Nudge the manual progress overlay forward
    AdvanceProgress,
    /// Post one notification of each severity
    NotifyBurst,
    /// Copy the chart data as text
    CopySummary,

    // ─────────────────────────────────────────────────────────────────────────
    // Chart
    // ─────────────────────────────────────────────────────────────────────────
    /// Rotate the chart series
    RotateSeries,
    /// Replace the series with zeros
    ZeroSeries,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick(_) => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}x{})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenModal(id) => write!(f, "OpenModal({})", id),
            Action::CloseModal(id) => write!(f, "CloseModal({})", id),
            Action::CloseAllModals => write!(f, "CloseAllModals"),
            Action::BackdropClick(id) => write!(f, "BackdropClick({})", id),
            Action::StartDownload => write!(f, "StartDownload"),
            Action::ToggleProgress => write!(f, "ToggleProgress"),
            Action::AdvanceProgress => write!(f, "AdvanceProgress"),
            Action::NotifyBurst => write!(f, "NotifyBurst"),
            Action::CopySummary => write!(f, "CopySummary"),
            Action::RotateSeries => write!(f, "RotateSeries"),
            Action::ZeroSeries => write!(f, "ZeroSeries"),
        }
    }
}
