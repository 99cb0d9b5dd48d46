use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// "Thinking" indicator shown while a reply is pending
pub struct TypingIndicator<'a> {
    label: &'a str,
    frame: u8,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(label: &'a str, frame: u8) -> Self {
        Self { label, frame }
    }

    fn dots(&self) -> &'static str {
        match self.frame % 4 {
            0 => ".",
            1 => "..",
            2 => "...",
            _ => "   ",
        }
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let indicator = Line::from(vec![
            Span::styled("🤖 ", Style::default().fg(Color::Cyan)),
            Span::styled(self.label.to_string(), Style::default().fg(Color::Green)),
            Span::styled(self.dots(), Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(area.x, area.y, &indicator, area.width);
    }
}
