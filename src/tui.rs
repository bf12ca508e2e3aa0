//! Terminal setup, teardown and event polling
//!
//! Wraps ratatui's Terminal. Mouse capture is on: clicks drive the
//! pagination controls, the menu and outside-click dismissal.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    time::Duration,
};

/// Whether an event is worth handing to the app
///
/// Key releases and mouse moves, drags and scrolls are dropped so the
/// caller treats them as idle time and keeps ticking.
pub fn is_relevant(event: &Event) -> bool {
    match event {
        Event::Key(key) => key.kind == KeyEventKind::Press,
        Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
        _ => true,
    }
}

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Polling timeout for events
    pub tick_rate: Duration,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen, raw mode and mouse capture
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore the terminal. Also runs on Drop.
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Poll for the next relevant event
    ///
    /// `None` means the tick elapsed, or the event was filtered out.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        let event = event::read()?;
        Ok(is_relevant(&event).then_some(event))
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    };

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_release_is_dropped() {
        let press = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(is_relevant(&Event::Key(press)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(!is_relevant(&Event::Key(release)));
    }

    #[test]
    fn test_only_mouse_presses_pass() {
        assert!(is_relevant(&mouse(MouseEventKind::Down(MouseButton::Left))));
        assert!(!is_relevant(&mouse(MouseEventKind::Moved)));
        assert!(!is_relevant(&mouse(MouseEventKind::Up(MouseButton::Left))));
        assert!(!is_relevant(&mouse(MouseEventKind::ScrollDown)));
    }

    #[test]
    fn test_resize_passes() {
        assert!(is_relevant(&Event::Resize(120, 40)));
    }
}
