//! Root application
//!
//! App owns the presenter and every collaborator that reports through it.
//! Input is turned into Actions, and `update` is the only place where state
//! changes in response.

use crate::action::{Action, ABOUT_MODAL, HELP_MODAL, QUIT_MODAL};
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_help_bar, draw_progress, draw_status, draw_toasts, ChartPanel,
    ModalLayer,
};
use crate::config::Config;
use crate::model::{ChartData, ChartOptions, ClickTarget, Presenter};
use crate::services::{copy_to_clipboard, CommandClipboard, Osc52Clipboard, TransferRequest, TransferRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};

const QUIT_CONTENT: &str = "<p>Quit overlay-tui?</p><p>y: quit &nbsp; n: stay</p>";
const ABOUT_CONTENT: &str = "<p>overlay-tui</p>\
    <p>Progress, notification and modal overlays driven by one clock.</p>\
    <p>Press M to stack the help modal on top. Click outside to close.</p>";
const HELP_CONTENT: &str = "<h3>Keys</h3>\
    <p>d: download &nbsp; p: toggle progress &nbsp; +: advance</p>\
    <p>n: one notification per severity &nbsp; y: copy chart</p>\
    <p>r: rotate series &nbsp; z: zero series</p>\
    <p>Esc: close every modal &nbsp; q: quit</p>";

/// Step used by the manual progress demo
const MANUAL_STEP: f64 = 10.0;

pub struct App {
    pub config: Config,
    pub presenter: Presenter,
    pub transfer: TransferRunner,
    pub request: TransferRequest,
    pub chart: ChartPanel,
    pub modal_layer: ModalLayer,
    pub should_quit: bool,
    clipboard: CommandClipboard,
    clipboard_fallback: Osc52Clipboard,
}

impl App {
    pub fn new(config: Config, request: TransferRequest) -> App {
        let options = config.chart_options().unwrap_or_else(|e| {
            tracing::warn!(error = %e, color = %config.chart_color, "falling back to default chart options");
            ChartOptions::default()
        });
        let data = ChartData::new(
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            vec![12.0, 19.0, 3.0, 5.0, 2.0, 3.0, 9.0],
        );

        App {
            presenter: Presenter::new(config.timing(), config.notification_duration(), config.reopen_policy),
            transfer: TransferRunner::new(),
            request,
            chart: ChartPanel::new("Weekly requests", data, options),
            modal_layer: ModalLayer::default(),
            should_quit: false,
            clipboard: CommandClipboard::default(),
            clipboard_fallback: Osc52Clipboard,
            config,
        }
    }

    fn quit_confirm_open(&self) -> bool {
        self.presenter
            .modals
            .topmost_open()
            .is_some_and(|m| m.id == QUIT_MODAL)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::ForceQuit);
        }

        if self.quit_confirm_open() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ForceQuit),
                KeyCode::Char('n') | KeyCode::Char('q') => {
                    Some(Action::CloseModal(QUIT_MODAL.to_string()))
                }
                KeyCode::Esc => Some(Action::CloseAllModals),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(Action::OpenModal(QUIT_MODAL.to_string())),
            KeyCode::Char('d') => Some(Action::StartDownload),
            KeyCode::Char('y') => Some(Action::CopySummary),
            KeyCode::Char('m') => Some(Action::OpenModal(ABOUT_MODAL.to_string())),
            KeyCode::Char('M') | KeyCode::Char('?') => Some(Action::OpenModal(HELP_MODAL.to_string())),
            KeyCode::Char('n') => Some(Action::NotifyBurst),
            KeyCode::Char('p') => Some(Action::ToggleProgress),
            KeyCode::Char('+') => Some(Action::AdvanceProgress),
            KeyCode::Esc => Some(Action::CloseAllModals),
            _ => self.chart.handle_key_event(key),
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        match self
            .modal_layer
            .hit_test(&self.presenter.modals, mouse.column, mouse.row)
        {
            Some((id, ClickTarget::Backdrop)) => Some(Action::BackdropClick(id)),
            _ => None,
        }
    }

    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if !matches!(action, Action::Tick(_)) {
            tracing::debug!(%action, "update");
        }

        match action {
            Action::Tick(elapsed) => {
                self.presenter.tick(elapsed);
                self.transfer.poll(elapsed, &mut self.presenter);
            }
            Action::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "terminal resized");
            }
            Action::ForceQuit => {
                tracing::info!("quitting");
                self.should_quit = true;
            }
            Action::OpenModal(id) => {
                let content = match id.as_str() {
                    QUIT_MODAL => QUIT_CONTENT,
                    ABOUT_MODAL => ABOUT_CONTENT,
                    HELP_MODAL => HELP_CONTENT,
                    _ => "",
                };
                if let Err(e) = self.presenter.modals.open(&id, content) {
                    tracing::warn!(error = %e, "modal not opened");
                    self.presenter.show_warning(&e.to_string());
                }
            }
            Action::CloseModal(id) => {
                self.presenter.modals.close(&id);
            }
            Action::CloseAllModals => {
                self.presenter.modals.escape();
            }
            Action::BackdropClick(id) => {
                self.presenter.modals.click(&id, ClickTarget::Backdrop);
            }
            Action::StartDownload => {
                self.transfer.start(self.request.clone(), &mut self.presenter);
            }
            Action::ToggleProgress => {
                if self.transfer.is_busy() {
                    self.presenter.show_warning("A download is already in progress");
                } else if self.presenter.progress.phase().is_open() {
                    self.presenter.hide_progress();
                } else {
                    self.presenter.show_progress("Working", "Press + to advance", 0.0);
                }
            }
            Action::AdvanceProgress => {
                let progress = &self.presenter.progress;
                if !self.transfer.is_busy() && progress.phase().is_open() {
                    let next = progress.state().percent() + MANUAL_STEP;
                    if next >= 100.0 {
                        self.presenter.update_progress("Done", 100.0);
                        self.presenter.hide_progress();
                        self.presenter.show_success("Task finished");
                    } else {
                        self.presenter.update_progress("Working...", next);
                    }
                }
            }
            Action::NotifyBurst => {
                self.presenter.show_info("Heads up: this is an info toast");
                self.presenter.show_success("Saved successfully");
                self.presenter.show_warning("Disk is getting full");
                self.presenter.show_error("Something went wrong");
            }
            Action::CopySummary => {
                let summary = self.chart.summary();
                copy_to_clipboard(
                    &summary,
                    &mut self.clipboard,
                    &mut self.clipboard_fallback,
                    &mut self.presenter.notifications,
                );
            }
            Action::RotateSeries | Action::ZeroSeries => {
                return self.chart.update(&action, &mut self.presenter);
            }
        }
        Ok(None)
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let layout = calculate_main_layout(area);

        self.chart.draw(frame, layout.chart);
        draw_status(frame, layout.status, &self.presenter);
        draw_help_bar(frame, layout.help);

        self.modal_layer.draw(frame, area, &self.presenter.modals);
        draw_progress(frame, area, &self.presenter.progress);
        draw_toasts(frame, area, &self.presenter.notifications);
    }

    /// Whether overlays are still moving and the screen should keep redrawing
    pub fn is_animating(&self) -> bool {
        self.presenter.is_animating() || self.transfer.is_busy()
    }
}
