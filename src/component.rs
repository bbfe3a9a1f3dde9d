//! Component trait - interface for the dashboard's drawable pieces
//!
//! Components turn input into Actions and render themselves. Overlay state
//! lives in the `Presenter`, so `update` receives it by reference instead of
//! components keeping copies of it.

use crate::action::Action;
use crate::model::Presenter;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Map a key press to an Action without touching state
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        let _ = key;
        None
    }

    /// Apply an Action, optionally returning a follow-up
    fn update(&mut self, action: &Action, presenter: &mut Presenter) -> Result<Option<Action>> {
        let _ = (action, presenter);
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect);
}
