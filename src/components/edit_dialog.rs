//! Record edit dialog
//!
//! One component draws every dialog family from its form. Required fields
//! that failed validation get a red border cue; the submission target is
//! shown in the footer.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::dialog::DialogKind;
use crate::model::form::{FieldKind, FieldMark, Form, FormField};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;

const DIALOG_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 18;

/// Edit dialog; remembers where each family was last drawn
#[derive(Debug, Default)]
pub struct EditDialog {
    areas: HashMap<DialogKind, Rect>,
}

impl EditDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Popup area from the last draw of a family
    pub fn area(&self, kind: DialogKind) -> Option<Rect> {
        self.areas.get(&kind).copied()
    }

    /// Map a key to an action for the dialog of `kind`
    pub fn key_action(kind: DialogKind, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseDialog(kind)),
            KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => Some(Action::FieldNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FieldPrev),
            KeyCode::Right => Some(Action::FieldCycle(true)),
            KeyCode::Left => Some(Action::FieldCycle(false)),
            KeyCode::Backspace => Some(Action::FieldBackspace),
            KeyCode::Char(c) => Some(Action::FieldInput(c)),
            _ => None,
        }
    }

    fn field_line(field: &FormField, focused: bool) -> Line<'static> {
        let marker = if field.required { "*" } else { " " };
        let label_style = match field.mark {
            FieldMark::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            FieldMark::Neutral if focused => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            FieldMark::Neutral => Style::default().fg(Color::Gray),
        };
        let value = match field.kind {
            FieldKind::Choice(_) => format!("‹ {} ›", field.value),
            _ if focused => format!("{}▏", field.value),
            _ => field.value.clone(),
        };
        let (open, close) = match field.mark {
            FieldMark::Error => ("[", "]"),
            FieldMark::Neutral => (" ", " "),
        };
        let bracket = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let value_style = if focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        Line::from(vec![
            Span::styled(
                format!("{:>width$}{} ", field.label, marker, width = LABEL_WIDTH),
                label_style,
            ),
            Span::styled(open, bracket),
            Span::styled(value, value_style),
            Span::styled(close, bracket),
        ])
    }

    /// Draw one dialog over `area`
    pub fn draw_with_form(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        kind: DialogKind,
        form: &Form,
    ) -> Result<()> {
        let spec = kind.spec();
        let height = form.fields.len() as u16 + 7;
        let popup_area = centered_popup(area, DIALOG_WIDTH, height);
        self.areas.insert(kind, popup_area);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        for (i, field) in form.fields.iter().enumerate() {
            content.push(Self::field_line(field, i == form.focus));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            format!(" POST {}", form.action),
            Style::default().fg(Color::DarkGray),
        )));
        content.push(Line::from(vec![
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next  "),
            Span::styled(
                " ←/→ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Choose  "),
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Save  "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close"),
        ]));

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", spec.title))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for EditDialog {
    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the form, see draw_with_form
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn field(kind: FieldKind, mark: FieldMark) -> FormField {
        FormField {
            id: "status",
            label: "Status",
            kind,
            required: true,
            value: "pending".into(),
            mark,
        }
    }

    #[test]
    fn test_error_mark_draws_red_brackets() {
        let line = EditDialog::field_line(&field(FieldKind::Text, FieldMark::Error), false);
        assert_eq!(line.spans[1].content, "[");
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_choice_value_shows_arrows() {
        let options: &'static [&'static str] = &["pending", "processed"];
        let line = EditDialog::field_line(&field(FieldKind::Choice(options), FieldMark::Neutral), true);
        assert_eq!(line.spans[2].content, "‹ pending ›");
    }

    #[test]
    fn test_key_actions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            EditDialog::key_action(DialogKind::Return, key(KeyCode::Esc)),
            Some(Action::CloseDialog(DialogKind::Return))
        );
        assert_eq!(
            EditDialog::key_action(DialogKind::Return, key(KeyCode::Char('7'))),
            Some(Action::FieldInput('7'))
        );
        assert_eq!(
            EditDialog::key_action(DialogKind::Item, key(KeyCode::Enter)),
            Some(Action::SubmitForm)
        );
    }
}
