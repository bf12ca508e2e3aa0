//! Component trait
//!
//! Components turn terminal events into Actions and draw themselves. State
//! changes go through `update`, never through the event handlers.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// A piece of the screen
///
/// 1. `handle_key_event` / `handle_mouse_event` map input to an Action
/// 2. `update` applies an Action and may return a follow-up
/// 3. `draw` renders into `area`
///
/// Components whose drawing needs outside data expose a `draw_with_*`
/// method and keep `draw` for what they can render alone.
pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an Action; the returned Action is dispatched next
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
