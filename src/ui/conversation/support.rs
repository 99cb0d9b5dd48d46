//! Support contact dialog

use crate::locale::Strings;
use crate::support::{SupportError, SupportField, SupportRequest, is_valid_email};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

#[derive(Debug, PartialEq)]
pub enum SupportDialogResult {
    Submitted(SupportRequest),
    Cancelled,
    None,
}

/// Which hint the dialog is showing under its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogHint {
    MissingField,
    InvalidEmail,
}

/// Form state while the support dialog is open
#[derive(Debug, Clone)]
pub struct SupportDialog {
    request: SupportRequest,
    focus: SupportField,
    hint: Option<DialogHint>,
}

impl Default for SupportDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportDialog {
    pub fn new() -> Self {
        Self {
            request: SupportRequest::default(),
            focus: SupportField::Name,
            hint: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SupportDialogResult {
        if key.kind != KeyEventKind::Press {
            return SupportDialogResult::None;
        }

        match key.code {
            KeyCode::Esc => return SupportDialogResult::Cancelled,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter
                if self.focus == SupportField::Message
                    && key.modifiers.contains(KeyModifiers::SHIFT) =>
            {
                self.request.message.push('\n');
            }
            KeyCode::Enter => return self.try_submit(),
            KeyCode::Backspace => {
                self.request.field_mut(self.focus).pop();
                self.hint = None;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request.field_mut(self.focus).push(c);
                self.hint = None;
            }
            _ => {}
        }

        SupportDialogResult::None
    }

    pub fn paste(&mut self, text: &str) {
        let field = self.request.field_mut(self.focus);
        if self.focus == SupportField::Message {
            field.push_str(&text.replace('\r', ""));
        } else {
            field.push_str(text.lines().next().unwrap_or_default());
        }
    }

    /// Required-field and address checks done by the form inputs
    fn try_submit(&mut self) -> SupportDialogResult {
        if let Err(SupportError::MissingField(field)) = self.request.validate() {
            self.focus = field;
            self.hint = Some(DialogHint::MissingField);
            return SupportDialogResult::None;
        }
        if !is_valid_email(&self.request.email) {
            self.focus = SupportField::Email;
            self.hint = Some(DialogHint::InvalidEmail);
            return SupportDialogResult::None;
        }

        SupportDialogResult::Submitted(self.request.clone())
    }
}

/// Centered rectangle of the given size, clamped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal rendering of the dialog
pub struct SupportDialogView<'a> {
    pub dialog: &'a SupportDialog,
    pub strings: &'static Strings,
}

impl Widget for SupportDialogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered_rect(60, 16, area);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" 🎧 {} ", self.strings.support_title))
            .style(Style::default().fg(Color::Magenta));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        if inner.is_empty() {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Min(3),    // Message
                Constraint::Length(1), // Hint
                Constraint::Length(1), // Keys
            ])
            .split(inner);

        let fields = [
            (SupportField::Name, self.strings.name),
            (SupportField::Email, self.strings.email),
            (SupportField::Message, self.strings.message),
        ];
        for (index, (field, label)) in fields.into_iter().enumerate() {
            self.render_field(field, label, chunks[index], buf);
        }

        let hint = match self.dialog.hint {
            Some(DialogHint::MissingField) => self.strings.missing_field,
            Some(DialogHint::InvalidEmail) => self.strings.invalid_email,
            None => "",
        };
        if !chunks[3].is_empty() {
            buf.set_line(
                chunks[3].x,
                chunks[3].y,
                &Line::from(Span::styled(hint, Style::default().fg(Color::Red))),
                chunks[3].width,
            );
        }

        let keys = Line::from(vec![
            Span::styled(
                format!("[{}] ", self.strings.submit),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.strings.dialog_hints, Style::default().fg(Color::DarkGray)),
        ]);
        if !chunks[4].is_empty() {
            buf.set_line(chunks[4].x, chunks[4].y, &keys, chunks[4].width);
        }
    }
}

impl SupportDialogView<'_> {
    fn render_field(&self, field: SupportField, label: &str, area: Rect, buf: &mut Buffer) {
        let focused = self.dialog.focus == field;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} * ", label))
            .style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            });
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let mut value = self.dialog.request.field(field).to_string();
        if focused {
            value.push('▌');
        }
        let lines: Vec<&str> = value.split('\n').collect();
        let start = lines.len().saturating_sub(inner.height as usize);
        for (i, text) in lines[start..].iter().enumerate() {
            let line = Line::from(Span::styled(*text, Style::default().fg(Color::White)));
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut SupportDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_form_focuses_first_missing_field() {
        let mut dialog = SupportDialog::new();
        dialog.handle_key(key(KeyCode::Tab));

        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), SupportDialogResult::None);
        assert_eq!(dialog.focus, SupportField::Name);
        assert_eq!(dialog.hint, Some(DialogHint::MissingField));
    }

    #[test]
    fn invalid_email_is_caught_by_the_input() {
        let mut dialog = SupportDialog::new();
        type_text(&mut dialog, "Anna");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "anna-at-example");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "Help me");

        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), SupportDialogResult::None);
        assert_eq!(dialog.focus, SupportField::Email);
        assert_eq!(dialog.hint, Some(DialogHint::InvalidEmail));
    }

    #[test]
    fn complete_form_is_submitted() {
        let mut dialog = SupportDialog::new();
        type_text(&mut dialog, "Anna");
        dialog.handle_key(key(KeyCode::Tab));
        dialog.paste("anna@example.com\nignored");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "Hi");
        dialog.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut dialog, "there");

        let expected = SupportRequest {
            name: "Anna".into(),
            email: "anna@example.com".into(),
            message: "Hi\nthere".into(),
        };
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            SupportDialogResult::Submitted(expected)
        );
    }

    #[test]
    fn escape_cancels() {
        let mut dialog = SupportDialog::new();
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), SupportDialogResult::Cancelled);
    }

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(60, 16, area), area);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
    }
}
