//! Navigation menu built from the dropdown panels
//!
//! Each panel is a header line with an arrow; an open panel lists its
//! tables underneath. A panel still entering is drawn dimmed and slid left
//! by its offset.

use crate::model::dropdown::{Dropdown, DropdownGroup};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const ENTRY_INDENT: i16 = 4;

/// One selectable line of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLine {
    /// Dropdown header, by dropdown id
    Header(String),
    /// Table link, by table id
    Entry(String),
}

/// Flatten the panels into menu lines; closed panels contribute only a header
pub fn nav_lines(group: &DropdownGroup) -> Vec<NavLine> {
    let mut lines = Vec::new();
    for panel in group.panels() {
        lines.push(NavLine::Header(panel.id.clone()));
        if panel.open {
            lines.extend(
                panel
                    .entries
                    .iter()
                    .map(|e| NavLine::Entry(e.table_id.clone())),
            );
        }
    }
    lines
}

/// Menu line under a terminal row, if any
pub fn line_at(area: Rect, row: u16, line_count: usize) -> Option<usize> {
    // Skip the top border
    let first = area.y.saturating_add(1);
    if row < first {
        return None;
    }
    let index = (row - first) as usize;
    (index < line_count).then_some(index)
}

fn header_item(panel: &Dropdown) -> ListItem<'static> {
    let arrow = if panel.arrow_rotated { "▾" } else { "▸" };
    ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", arrow), Style::default().fg(Color::Yellow)),
        Span::styled(
            panel.label.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
}

fn entry_item(panel: &Dropdown, label: &str, active: bool) -> ListItem<'static> {
    let indent = (ENTRY_INDENT + panel.offset).max(0) as usize;
    let mut style = if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    if panel.is_entering() {
        style = style.add_modifier(Modifier::DIM);
    }
    ListItem::new(Line::from(Span::styled(
        format!("{}{}", " ".repeat(indent), label),
        style,
    )))
}

/// Block title naming the open panel
pub fn menu_title(group: &DropdownGroup) -> String {
    match group.open_panel() {
        Some(panel) => format!(" Menu: {} ", panel.label),
        None => " Menu ".to_string(),
    }
}

/// Draw the menu; `cursor` is highlighted only when the menu has focus
pub fn render_nav(
    frame: &mut Frame,
    area: Rect,
    group: &DropdownGroup,
    cursor: Option<usize>,
    active_table: &str,
) {
    let mut items = Vec::new();
    for panel in group.panels() {
        items.push(header_item(panel));
        if panel.open {
            for entry in &panel.entries {
                items.push(entry_item(panel, &entry.label, entry.table_id == active_table));
            }
        }
    }

    let border_color = if cursor.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(menu_title(group))
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}
