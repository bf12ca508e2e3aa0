//! Home component - Main application screen
//!
//! Displays the navigation menu, the active table with its search box and
//! pagination strip, and the status and help bars. Owns selection and focus.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::dropdown::render_nav;
use crate::components::pagination::{render_controls, ControlHitboxes};
use crate::components::summary::render_summary;
use crate::components::table::TableComponent;
use crate::model::catalog::{search_input_id, TABLE_IDS};
use crate::model::{InventorySummary, ViewState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nav,
    Table,
}

/// Screen regions from the last draw, for mouse hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hitboxes {
    pub nav: Rect,
    pub table: Rect,
    pub controls: ControlHitboxes,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct HomeComponent {
    /// Table shown in the main panel
    pub active_table: String,

    pub focus: Focus,

    /// Highlighted line of the navigation menu
    pub nav_cursor: usize,

    /// Selected row, as a position among the visible rows
    pub selected: Option<usize>,

    /// Whether keys go to the search box
    pub search_mode: bool,

    pub hitboxes: Hitboxes,
}

impl HomeComponent {
    pub fn new(active_table: impl Into<String>) -> Self {
        Self {
            active_table: active_table.into(),
            focus: Focus::Table,
            nav_cursor: 0,
            selected: Some(0),
            search_mode: false,
            hitboxes: Hitboxes::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show_table(&mut self, table_id: &str, visible: usize) {
        self.active_table = table_id.to_string();
        self.focus = Focus::Table;
        self.search_mode = false;
        self.select_first(visible);
    }

    /// Select next visible row, wrapping to the first
    pub fn next(&mut self, visible: usize) {
        if visible == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < visible => i + 1,
            _ => 0,
        });
    }

    /// Select previous visible row, wrapping to the last
    pub fn previous(&mut self, visible: usize) {
        if visible == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 && i < visible => i - 1,
            _ => visible - 1,
        });
    }

    pub fn select_first(&mut self, visible: usize) {
        self.selected = (visible > 0).then_some(0);
    }

    pub fn select_last(&mut self, visible: usize) {
        self.selected = visible.checked_sub(1);
    }

    /// Keep the selection on a row that still exists
    pub fn clamp_selection(&mut self, visible: usize) {
        self.selected = match (self.selected, visible) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => Some(0),
        };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Menu
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Nav => Focus::Table,
            Focus::Table => Focus::Nav,
        };
    }

    pub fn nav_down(&mut self, lines: usize) {
        if lines > 0 {
            self.nav_cursor = (self.nav_cursor + 1) % lines;
        }
    }

    pub fn nav_up(&mut self, lines: usize) {
        if lines > 0 {
            self.nav_cursor = self.nav_cursor.checked_sub(1).unwrap_or(lines - 1);
        }
    }

    pub fn clamp_nav(&mut self, lines: usize) {
        self.nav_cursor = self.nav_cursor.min(lines.saturating_sub(1));
    }

    fn table_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditSelected),
            KeyCode::Char('s') => Some(Action::EditReturnStatus),
            KeyCode::Char('r') => Some(Action::ProcessSelected),
            KeyCode::Char('d') => Some(Action::DeleteSelected),
            KeyCode::Char('a') => Some(Action::NewRecord),
            KeyCode::Char('l') => Some(Action::AllocateSelected),
            KeyCode::Char('x') => Some(Action::ExportTable),
            _ => None,
        }
    }

    fn nav_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NavDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::NavUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::NavSelect),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                TABLE_IDS.get(index).map(|id| Action::ShowTable(id.to_string()))
            }
            _ => match self.focus {
                Focus::Nav => self.nav_key(key),
                Focus::Table => self.table_key(key),
            },
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the view state, see draw_home_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub view: &'a ViewState,
    pub summary: &'a InventorySummary,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    table: &mut TableComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    let cursor = (home.focus == Focus::Nav).then_some(home.nav_cursor);
    render_nav(frame, layout.nav, &ctx.view.dropdowns, cursor, &home.active_table);
    render_summary(frame, layout.summary, ctx.summary);
    render_search(frame, layout.search, home, ctx.view);

    let controls = match ctx.view.table(&home.active_table) {
        Ok(active) => {
            table.draw_with_table(
                frame,
                layout.table,
                active,
                home.selected,
                home.focus == Focus::Table,
            );
            render_controls(frame, layout.controls, active.controls())
        }
        Err(e) => {
            let paragraph = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, layout.table);
            ControlHitboxes::default()
        }
    };

    home.hitboxes = Hitboxes {
        nav: layout.nav,
        table: layout.table,
        controls,
    };

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_search(frame: &mut Frame, area: Rect, home: &HomeComponent, view: &ViewState) {
    let query = view
        .query_input(&search_input_id(&home.active_table))
        .map(|input| input.value.as_str())
        .unwrap_or_default();

    let (text, style) = if query.is_empty() && !home.search_mode {
        ("Press / to search".to_string(), Style::default().fg(Color::DarkGray))
    } else if home.search_mode {
        (format!("{}▏", query), Style::default().fg(Color::White))
    } else {
        (query.to_string(), Style::default().fg(Color::White))
    };

    let border = if home.search_mode {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![Span::styled(
        " inventory ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn help_key(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.search_mode {
        vec![
            help_key("Esc/Enter", Color::Yellow),
            Span::raw("Done  "),
            help_key("Backspace", Color::Cyan),
            Span::raw("Delete"),
        ]
    } else if home.focus == Focus::Nav {
        vec![
            help_key("j/k", Color::Cyan),
            Span::raw("Move "),
            help_key("Enter", Color::Green),
            Span::raw("Open "),
            help_key("Tab", Color::Cyan),
            Span::raw("Table "),
            help_key("q", Color::Yellow),
            Span::raw("Quit"),
        ]
    } else {
        vec![
            help_key("q", Color::Yellow),
            Span::raw("Quit "),
            help_key("a", Color::Green),
            Span::raw("Add "),
            help_key("e", Color::Green),
            Span::raw("Edit "),
            help_key("s", Color::Green),
            Span::raw("Status "),
            help_key("r", Color::Green),
            Span::raw("Process "),
            help_key("l", Color::Green),
            Span::raw("Allocate "),
            help_key("d", Color::Red),
            Span::raw("Delete "),
            help_key("/", Color::Cyan),
            Span::raw("Search "),
            help_key("n/p", Color::Cyan),
            Span::raw("Page "),
            help_key("x", Color::Magenta),
            Span::raw("Export "),
            help_key("Tab", Color::Cyan),
            Span::raw("Menu"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_row_selection_wraps() {
        let mut home = HomeComponent::new("kits");
        home.next(3);
        home.next(3);
        assert_eq!(home.selected, Some(2));
        home.next(3);
        assert_eq!(home.selected, Some(0));
        home.previous(3);
        assert_eq!(home.selected, Some(2));
        home.next(0);
        assert_eq!(home.selected, None);
    }

    #[test]
    fn test_clamp_selection() {
        let mut home = HomeComponent::new("kits");
        home.selected = Some(40);
        home.clamp_selection(10);
        assert_eq!(home.selected, Some(9));
        home.clamp_selection(0);
        assert_eq!(home.selected, None);
        home.clamp_selection(2);
        assert_eq!(home.selected, Some(0));
    }

    #[test]
    fn test_keys_depend_on_focus() {
        let mut home = HomeComponent::new("kits");
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('j'))).unwrap(),
            Some(Action::NextRow)
        );
        home.toggle_focus();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('j'))).unwrap(),
            Some(Action::NavDown)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::ShowTable("returns".into()))
        );
    }

    #[test]
    fn test_creation_keys() {
        let mut home = HomeComponent::new("kits");
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::NewRecord)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('l'))).unwrap(),
            Some(Action::AllocateSelected)
        );
    }

    #[test]
    fn test_nav_cursor_wraps() {
        let mut home = HomeComponent::new("kits");
        home.nav_up(4);
        assert_eq!(home.nav_cursor, 3);
        home.nav_down(4);
        assert_eq!(home.nav_cursor, 0);
        home.nav_cursor = 5;
        home.clamp_nav(2);
        assert_eq!(home.nav_cursor, 1);
    }
}
