use crate::ui::conversation::commands::{ParsedCommand, parse_slash_command};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Result returned when the user interacts with the conversation composer
#[derive(Debug, PartialEq)]
pub enum ComposerResult {
    Submitted(String),
    Command(ParsedCommand),
    None,
}

/// Cursor state for editing the pending input.
///
/// The text itself lives in the conversation; the composer only tracks
/// where the cursor is, counted in characters.
#[derive(Debug, Clone, Default)]
pub struct ConversationComposer {
    cursor_position: usize,
}

impl ConversationComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Handle key input against the pending input text
    pub fn handle_key(&mut self, key: KeyEvent, input: &mut String) -> ComposerResult {
        if key.kind != KeyEventKind::Press {
            return ComposerResult::None;
        }
        self.cursor_position = self.cursor_position.min(input.chars().count());

        match key.code {
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.insert_char(input, '\n');
                } else if !input.trim().is_empty() {
                    // Clearing the input is up to the caller (submit does it).
                    self.cursor_position = 0;
                    if let Some(command) = parse_slash_command(input) {
                        input.clear();
                        return ComposerResult::Command(command);
                    }
                    return ComposerResult::Submitted(input.clone());
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(input, c);
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    let at = byte_index(input, self.cursor_position);
                    input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor_position < input.chars().count() {
                    let at = byte_index(input, self.cursor_position);
                    input.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor_position < input.chars().count() {
                    self.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                self.cursor_position = 0;
            }
            KeyCode::End => {
                self.cursor_position = input.chars().count();
            }
            _ => {}
        }

        ComposerResult::None
    }

    /// Insert pasted text at the cursor
    pub fn paste(&mut self, input: &mut String, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.insert_char(input, c);
        }
    }

    /// Insert a character at the cursor position
    fn insert_char(&mut self, input: &mut String, c: char) {
        self.cursor_position = self.cursor_position.min(input.chars().count());
        let at = byte_index(input, self.cursor_position);
        input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn reset(&mut self) {
        self.cursor_position = 0;
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Input box showing the pending text or the placeholder
pub struct ComposerView<'a> {
    pub input: &'a str,
    pub cursor_position: usize,
    pub placeholder: &'a str,
    pub title: &'a str,
    pub has_focus: bool,
}

impl Widget for ComposerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ⏎ ", self.title))
            .style(if self.has_focus {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.is_empty() {
            return;
        }

        if self.input.is_empty() {
            let placeholder_line = Line::from(vec![Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(inner_area.x, inner_area.y, &placeholder_line, inner_area.width);
            return;
        }

        let mut content = self.input.to_string();
        if self.has_focus {
            content.insert(byte_index(&content, self.cursor_position), '▌');
        }

        // Show the last lines when the input grows past the box
        let text_lines: Vec<&str> = content.split('\n').collect();
        let start = text_lines.len().saturating_sub(inner_area.height as usize);
        for (i, line_text) in text_lines[start..].iter().enumerate() {
            let line = Line::from(vec![Span::styled(*line_text, Style::default().fg(Color::White))]);
            buf.set_line(inner_area.x, inner_area.y + i as u16, &line, inner_area.width);
        }
    }
}
