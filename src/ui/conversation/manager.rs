use std::sync::Arc;
use std::time::Instant;

use crate::conversation::{Conversation, PendingReply};
use crate::events::AppEvent;
use crate::locale;
use crate::reply::ReplyService;
use crate::ui::conversation::{
    ComposerResult, ComposerView, ConversationComposer, ConversationHistory, ParsedCommand,
    SlashCommand, SupportDialog, SupportDialogResult, SupportDialogView, TypingIndicator,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use tokio::sync::mpsc;

/// Actions that can be requested by the conversation manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Exit,
}

/// Manages the conversation flow and UI components
pub struct ConversationManager {
    conversation: Conversation,
    composer: ConversationComposer,
    support_dialog: Option<SupportDialog>,
    service: Arc<dyn ReplyService>,
    reply_tx: mpsc::UnboundedSender<AppEvent>,
    show_timestamps: bool,
    animation_frame: u8,
}

impl ConversationManager {
    pub fn new(
        conversation: Conversation,
        service: Arc<dyn ReplyService>,
        reply_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            conversation,
            composer: ConversationComposer::new(),
            support_dialog: None,
            service,
            reply_tx,
            show_timestamps: true,
            animation_frame: 0,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return ConversationAction::Exit;
        }

        if let Some(dialog) = self.support_dialog.as_mut() {
            match dialog.handle_key(key) {
                SupportDialogResult::Submitted(request) => {
                    if self.conversation.submit_support_request(&request).is_ok() {
                        self.support_dialog = None;
                    }
                }
                SupportDialogResult::Cancelled => self.close_support(),
                SupportDialogResult::None => {}
            }
            return ConversationAction::None;
        }

        match key.code {
            KeyCode::Char('l') if ctrl => {
                self.conversation.toggle_language();
                ConversationAction::None
            }
            KeyCode::Char('s') if ctrl => {
                self.open_support();
                ConversationAction::None
            }
            _ => match self.composer.handle_key(key, self.conversation.pending_input_mut()) {
                ComposerResult::Submitted(text) => {
                    self.submit(&text);
                    ConversationAction::None
                }
                ComposerResult::Command(command) => self.handle_slash_command(command),
                ComposerResult::None => ConversationAction::None,
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self.support_dialog.as_mut() {
            Some(dialog) => dialog.paste(text),
            None => self.composer.paste(self.conversation.pending_input_mut(), text),
        }
    }

    /// Apply a settled reply or advance the animation
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReplySettled { ticket, outcome } => {
                self.conversation.settle(ticket, outcome);
            }
            AppEvent::Tick => {
                self.animation_frame = self.animation_frame.wrapping_add(1);
                self.conversation.expire_notice(Instant::now());
            }
        }
    }

    /// Send the text and spawn the reply request in the background.
    ///
    /// Sending is allowed while earlier replies are pending; replies are
    /// appended in the order they complete.
    pub fn submit(&mut self, text: &str) -> bool {
        let Some(PendingReply { ticket, request }) = self.conversation.begin_submit(text) else {
            return false;
        };
        self.composer.reset();

        let service = Arc::clone(&self.service);
        let reply_tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let outcome = service.reply(&request).await;
            if reply_tx.send(AppEvent::ReplySettled { ticket, outcome }).is_err() {
                tracing::debug!(%ticket, "reply arrived after the UI shut down");
            }
        });
        true
    }

    fn open_support(&mut self) {
        self.conversation.open_support();
        self.support_dialog = Some(SupportDialog::new());
    }

    fn close_support(&mut self) {
        self.conversation.close_support();
        self.support_dialog = None;
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, command: ParsedCommand) -> ConversationAction {
        match command.command {
            SlashCommand::Lang => {
                match command.language_target() {
                    Some(language) => self.conversation.set_language(language),
                    None => self.conversation.toggle_language(),
                }
                ConversationAction::None
            }
            SlashCommand::Support => {
                self.open_support();
                ConversationAction::None
            }
            SlashCommand::Help => {
                let help = locale::strings(self.conversation.language()).help;
                self.conversation.show_notice(help);
                ConversationAction::None
            }
            SlashCommand::Bye => ConversationAction::Exit,
        }
    }

    /// Render the conversation UI components
    pub fn render_conversation_ui(&self, area: Rect, buf: &mut Buffer) {
        let language = self.conversation.language();
        let strings = locale::strings(language);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(5),    // History
                Constraint::Length(1), // Typing indicator
                Constraint::Length(3), // Composer
                Constraint::Length(1), // Notice / key hints
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        ConversationHistory::new(self.conversation.messages(), language)
            .show_timestamps(self.show_timestamps)
            .render(chunks[1], buf);

        if self.conversation.awaiting_reply() {
            TypingIndicator::new(strings.thinking_message, self.animation_frame).render(chunks[2], buf);
        }

        ComposerView {
            input: self.conversation.pending_input(),
            cursor_position: self.composer.cursor_position(),
            placeholder: strings.placeholder,
            title: strings.send,
            has_focus: !self.conversation.support_open(),
        }
        .render(chunks[3], buf);

        let footer = match self.conversation.active_notice(Instant::now()) {
            Some(notice) => Line::from(Span::styled(
                format!("✔ {}", notice.text),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(strings.key_hints, Style::default().fg(Color::DarkGray))),
        };
        if !chunks[4].is_empty() {
            buf.set_line(chunks[4].x, chunks[4].y, &footer, chunks[4].width);
        }

        if let Some(dialog) = &self.support_dialog {
            SupportDialogView { dialog, strings }.render(area, buf);
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let language = self.conversation.language();
        let strings = locale::strings(language);

        let title = Line::from(vec![
            Span::styled(
                strings.title,
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("🌐 {}", language.badge()), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(format!("🎧 {}", strings.support), Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(area.x, area.y, &title, area.width);

        if area.height > 1 {
            let subtitle = Line::from(Span::styled(strings.subtitle, Style::default().fg(Color::Gray)));
            buf.set_line(area.x, area.y + 1, &subtitle, area.width);
        }
    }
}
