//! Blocking yes/no confirmation dialog
//!
//! Used before following a delete link and before quitting.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Default)]
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn draw_with_prompt(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        prompt: &str,
        detail: Option<&str>,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 52, 9);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(detail) = detail {
            content.push(Line::from(Span::styled(
                detail.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes  "),
            Span::styled(
                " n/Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No, cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(format!(" {} ", title))
                    .title_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_prompt(frame, area, "Quit?", "Are you sure you want to quit?", None)
    }
}
