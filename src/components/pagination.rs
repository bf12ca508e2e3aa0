//! Pagination controls strip
//!
//! Drawn under a paginated table: an optional Previous control, the
//! "Page X of Y" label, and an optional Next control. Each control carries
//! the page it leads to, so a click resolves to a paginate call directly.

use crate::model::table::PaginationControls;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PREVIOUS: &str = " ‹ Previous ";
const NEXT: &str = " Next › ";

/// A clickable control and the page it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHitbox {
    pub area: Rect,
    pub page: usize,
}

/// Where the controls were last drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlHitboxes {
    pub previous: Option<ControlHitbox>,
    pub next: Option<ControlHitbox>,
}

impl ControlHitboxes {
    /// Page targeted by the control under a terminal cell
    pub fn page_at(&self, column: u16, row: u16) -> Option<usize> {
        [self.previous, self.next]
            .into_iter()
            .flatten()
            .find(|hit| crate::components::layout::contains(hit.area, column, row))
            .map(|hit| hit.page)
    }
}

fn segment(area: Rect, x: u16, text: &str) -> Rect {
    let width = (text.width() as u16).min(area.right().saturating_sub(x));
    Rect::new(x, area.y, width, 1.min(area.height))
}

/// Lay the strip out left to right from the area's origin
pub fn layout_controls(area: Rect, controls: &PaginationControls) -> ControlHitboxes {
    let mut x = area.x;
    let mut hitboxes = ControlHitboxes::default();

    if let Some(page) = controls.previous {
        let rect = segment(area, x, PREVIOUS);
        hitboxes.previous = Some(ControlHitbox { area: rect, page });
        x = x.saturating_add(rect.width + 1);
    }

    let label = format!(" {} ", controls.label());
    x = x.saturating_add(label.width() as u16 + 1);

    if let Some(page) = controls.next {
        let rect = segment(area, x, NEXT);
        hitboxes.next = Some(ControlHitbox { area: rect, page });
    }
    hitboxes
}

/// Draw the strip and return its hitboxes; nothing is drawn for a table
/// that was never paginated
pub fn render_controls(
    frame: &mut Frame,
    area: Rect,
    controls: Option<&PaginationControls>,
) -> ControlHitboxes {
    let Some(controls) = controls else {
        return ControlHitboxes::default();
    };

    let button = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    if controls.previous.is_some() {
        spans.push(Span::styled(PREVIOUS, button));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!(" {} ", controls.label()),
        Style::default().fg(Color::Yellow),
    ));
    spans.push(Span::raw(" "));
    if controls.next.is_some() {
        spans.push(Span::styled(NEXT, button));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    layout_controls(area, controls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page_has_both_controls() {
        let area = Rect::new(24, 30, 80, 1);
        let hitboxes = layout_controls(area, &PaginationControls::build(2, 3));

        let previous = hitboxes.previous.unwrap();
        assert_eq!(previous.page, 1);
        assert_eq!(previous.area.x, 24);
        assert_eq!(previous.area.width, PREVIOUS.width() as u16);

        let next = hitboxes.next.unwrap();
        assert_eq!(next.page, 3);
        assert!(next.area.x > previous.area.right());

        assert_eq!(hitboxes.page_at(25, 30), Some(1));
        assert_eq!(hitboxes.page_at(next.area.x, 30), Some(3));
        assert_eq!(hitboxes.page_at(25, 31), None);
    }

    #[test]
    fn test_edges_drop_controls() {
        let area = Rect::new(0, 0, 80, 1);
        let first = layout_controls(area, &PaginationControls::build(1, 3));
        assert!(first.previous.is_none());
        assert_eq!(first.next.unwrap().page, 2);

        let empty = layout_controls(area, &PaginationControls::build(1, 0));
        assert_eq!(empty, ControlHitboxes::default());
    }
}
