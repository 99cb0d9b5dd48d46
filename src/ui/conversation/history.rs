//! Conversation history display component

use crate::conversation::Message;
use crate::events::{ConversationRole, Language};
use crate::locale;
use crate::ui::text::wrap_text;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Read-only view over the conversation messages
pub struct ConversationHistory<'a> {
    messages: &'a [Message],
    language: Language,
    show_timestamps: bool,
}

impl<'a> ConversationHistory<'a> {
    pub fn new(messages: &'a [Message], language: Language) -> Self {
        Self {
            messages,
            language,
            show_timestamps: true,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    /// All lines for the history, oldest first.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut all_lines = Vec::new();
        for message in self.messages {
            all_lines.extend(self.render_message(message, width));
            // spacing between messages
            all_lines.push(Line::from(""));
        }
        all_lines
    }

    /// Render a single message into lines
    fn render_message(&self, message: &Message, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (role_icon, label_style) = match message.role {
            ConversationRole::User => ("👤", Style::default().fg(Color::Magenta)),
            ConversationRole::Assistant => ("🤖", Style::default().fg(Color::Cyan)),
        };

        let mut header = vec![Span::styled(
            format!("{} ", role_icon),
            label_style.add_modifier(Modifier::BOLD),
        )];
        if self.show_timestamps {
            header.push(Span::styled(
                locale::format_time(self.language, &message.timestamp),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        let content_style = match message.role {
            ConversationRole::User => Style::default().fg(Color::White),
            ConversationRole::Assistant => Style::default().fg(Color::Green),
        };
        for content_line in wrap_text(&message.content, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(content_line, content_style),
            ]));
        }

        lines
    }
}

impl Widget for ConversationHistory<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" 💬 {} ", locale::strings(self.language).title));

        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.is_empty() {
            return;
        }

        // Keep the newest lines visible
        let all_lines = self.lines(inner_area.width);
        let height = inner_area.height as usize;
        let start = all_lines.len().saturating_sub(height);

        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Conversation;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn greeting_is_rendered_with_assistant_icon() {
        let conversation = Conversation::new(Language::En);
        let history = ConversationHistory::new(conversation.messages(), Language::En)
            .show_timestamps(false);

        let text = text_of(&history.lines(80));
        assert_eq!(text[0].trim(), "🤖");
        assert!(text[1].contains(locale::EN.welcome_message));
    }

    #[test]
    fn newest_lines_stay_visible() {
        let mut conversation = Conversation::new(Language::En);
        for i in 0..10 {
            let pending = conversation.begin_submit(&format!("question {i}")).unwrap();
            conversation.settle(pending.ticket, Ok(Some(format!("answer {i}"))));
        }

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        ConversationHistory::new(conversation.messages(), Language::En).render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.get(x, y).symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("answer 9"));
        assert!(!rendered.contains("question 0"));
        assert!(rendered.contains(locale::EN.title));
    }

    #[test]
    fn borders_only_area_draws_no_messages() {
        let conversation = Conversation::new(Language::En);
        for height in 0..=2 {
            let area = Rect::new(0, 0, 30, height);
            let mut buf = Buffer::empty(area);
            ConversationHistory::new(conversation.messages(), Language::En).render(area, &mut buf);
        }
    }
}
