//! Stock summary panel under the navigation menu

use crate::model::summary::InventorySummary;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn figure(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {}: ", label)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn summary_lines(summary: &InventorySummary) -> Vec<Line<'static>> {
    let stock_color = if summary.out_of_stock > 0 {
        Color::Red
    } else {
        Color::Green
    };

    vec![
        figure("Items", summary.total_items.to_string(), Color::Cyan),
        figure(
            "Kits/Parts",
            format!("{}/{}", summary.kit_count, summary.part_count),
            Color::Cyan,
        ),
        figure("Imported", summary.total_imported.to_string(), Color::White),
        figure("Installed", summary.total_installed.to_string(), Color::White),
        figure("Available", summary.total_available.to_string(), Color::White),
        figure(
            "In stock",
            format!("{:.1}%", summary.stock_availability),
            Color::Green,
        ),
        figure("Out", summary.out_of_stock.to_string(), stock_color),
        figure("Low", summary.low_stock.to_string(), Color::Yellow),
        figure(
            "Returns",
            format!("{} ({} pending)", summary.return_count, summary.pending_returns),
            Color::White,
        ),
        figure("Allocations", summary.allocation_count.to_string(), Color::White),
    ]
}

pub fn render_summary(frame: &mut Frame, area: Rect, summary: &InventorySummary) {
    let paragraph = Paragraph::new(summary_lines(summary)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Stock ",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
