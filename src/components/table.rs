//! Table component for record display
//!
//! Renders a table's header and its currently visible rows with column
//! alignment. Widths are measured in terminal cells.

use crate::model::table::Table;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow
const MAX_COLUMN_WIDTH: usize = 32;

/// Lines above the first data row (header and separator)
pub const HEADER_LINES: usize = 2;

/// Pad or cut `text` to exactly `width` cells
pub fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    let budget = width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&".".repeat(width.min(3)));
    used += width.min(3);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Column widths over the header and the visible rows
pub fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for (_, row) in table.visible_rows() {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }
    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    widths
}

/// Table component: keeps the row window in view of the selection
#[derive(Debug, Default)]
pub struct TableComponent {
    scroll: usize,
}

impl TableComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build table lines; `selected` indexes the visible rows
    pub fn build_table_lines(table: &Table, selected: Option<usize>) -> Vec<Line<'static>> {
        let widths = column_widths(table);
        let mut lines = Vec::new();

        let header_spans: Vec<Span> = table
            .headers
            .iter()
            .enumerate()
            .flat_map(|(i, h)| {
                vec![
                    Span::styled(
                        fit(h, widths[i]),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        for (position, (_, row)) in table.visible_rows().enumerate() {
            let style = if selected == Some(position) {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let spans: Vec<Span> = row
                .cells
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(10);
                    vec![Span::styled(fit(cell, width), style), Span::styled(" │ ", style)]
                })
                .collect();
            lines.push(Line::from(spans));
        }

        lines
    }

    /// Visible row under a terminal row, given where the table was drawn
    pub fn row_at(&self, area: Rect, row: u16, visible: usize) -> Option<usize> {
        // Border, then header and separator
        let first = area.y as usize + 1 + HEADER_LINES;
        let row = row as usize;
        if row < first || row >= (area.y + area.height.saturating_sub(1)) as usize {
            return None;
        }
        let index = self.scroll + (row - first);
        (index < visible).then_some(index)
    }

    fn follow(&mut self, selected: Option<usize>, body_height: usize) {
        let Some(selected) = selected else {
            self.scroll = 0;
            return;
        };
        if body_height == 0 {
            return;
        }
        if selected < self.scroll {
            self.scroll = selected;
        } else if selected >= self.scroll + body_height {
            self.scroll = selected + 1 - body_height;
        }
    }

    pub fn draw_with_table(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        table: &Table,
        selected: Option<usize>,
        focused: bool,
    ) {
        let lines = Self::build_table_lines(table, selected);
        let visible = lines.len() - HEADER_LINES;
        let body_height = (area.height.saturating_sub(2) as usize).saturating_sub(HEADER_LINES);
        self.scroll = self.scroll.min(visible.saturating_sub(1));
        self.follow(selected, body_height);

        // Header stays put while the body scrolls
        let mut content: Vec<Line> = lines[..HEADER_LINES].to_vec();
        content.extend(lines.into_iter().skip(HEADER_LINES + self.scroll));

        let mut title = format!(" {} ({}/{}) ", table.title, visible, table.len());
        if let Some(query) = table.query().filter(|q| !q.is_empty()) {
            title = format!("{}[filter:{}] ", title, query);
        }
        let border = if focused { Color::Cyan } else { Color::DarkGray };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);

        if visible > body_height && body_height > 0 {
            let mut scrollbar_state =
                ScrollbarState::new(visible.saturating_sub(body_height)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{RecordFamily, RecordRef};
    use crate::model::table::Row;

    fn table() -> Table {
        let rows = ["Lagos Island", "Ikeja", "Surulere"]
            .iter()
            .enumerate()
            .map(|(i, station)| {
                Row::new(
                    RecordRef {
                        family: RecordFamily::Replacement,
                        id: i as i64,
                    },
                    vec![format!("0801111111{i}"), station.to_string()],
                )
            })
            .collect();
        Table::new("replacements", "Replacements", vec!["Rider No.".into(), "Station".into()])
            .with_rows(rows)
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("Yaba", 6), "Yaba  ");
        assert_eq!(fit("Victoria Island", 8), "Victo...");
        assert_eq!(fit("ab", 2), "ab");
        assert_eq!(fit("abc", 2), "..");
    }

    #[test]
    fn test_fit_counts_wide_chars() {
        assert_eq!(fit("日本", 4), "日本");
        assert_eq!(fit("日本語テキスト", 7).width(), 7);
    }

    #[test]
    fn test_lines_follow_visibility() {
        let mut table = table();
        assert_eq!(TableComponent::build_table_lines(&table, None).len(), 5);
        table.filter("ikeja");
        let lines = TableComponent::build_table_lines(&table, Some(0));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].spans[0].style.bg, Some(Color::Blue));
    }

    #[test]
    fn test_column_widths_use_visible_rows() {
        let mut table = table();
        assert_eq!(column_widths(&table), vec![11, 12]);
        table.filter("yaba");
        assert_eq!(column_widths(&table), vec![9, 7]);
    }

    #[test]
    fn test_row_at() {
        let component = TableComponent::new();
        let area = Rect::new(24, 3, 80, 10);
        assert_eq!(component.row_at(area, 6, 3), Some(0));
        assert_eq!(component.row_at(area, 8, 3), Some(2));
        assert_eq!(component.row_at(area, 9, 3), None);
        assert_eq!(component.row_at(area, 5, 3), None);
    }
}
