//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation menu column
const NAV_WIDTH: u16 = 24;

/// Height of the stock summary under the menu, borders included
pub const SUMMARY_HEIGHT: u16 = 12;

/// Main screen layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub nav: Rect,
    pub summary: Rect,
    pub search: Rect,
    pub table: Rect,
    pub controls: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Whether a terminal cell lies inside `rect`
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    // Content + status line + help bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Navigation menu on the left, table panel on the right
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(0)])
        .split(main_chunks[0]);

    // Menu above the stock summary
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(SUMMARY_HEIGHT)])
        .split(horizontal_chunks[0]);

    // Search box, table, pagination controls
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(horizontal_chunks[1]);

    MainLayout {
        nav: left_chunks[0],
        summary: left_chunks[1],
        search: right_chunks[0],
        table: right_chunks[1],
        controls: right_chunks[2],
        status: main_chunks[1],
        help: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 60, 20);
        assert_eq!(popup, Rect::new(20, 10, 60, 20));

        let small = centered_popup(Rect::new(0, 0, 30, 10), 60, 20);
        assert_eq!(small, Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(5, 5, 10, 3);
        assert!(contains(rect, 5, 5));
        assert!(contains(rect, 14, 7));
        assert!(!contains(rect, 15, 7));
        assert!(!contains(rect, 4, 5));
        assert!(!contains(rect, 5, 8));
    }

    #[test]
    fn test_main_layout_columns() {
        let layout = calculate_main_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.nav.width, NAV_WIDTH);
        assert_eq!(layout.nav.height, 38 - SUMMARY_HEIGHT);
        assert_eq!(layout.summary.y, 38 - SUMMARY_HEIGHT);
        assert_eq!(layout.summary.width, NAV_WIDTH);
        assert_eq!(layout.search.x, NAV_WIDTH);
        assert_eq!(layout.controls.height, 1);
        assert_eq!(layout.help.y, 39);
        assert_eq!(layout.status.y, 38);
    }
}
