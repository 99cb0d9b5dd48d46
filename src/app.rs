use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::conversation::Conversation;
use crate::events::{AppEvent, TuiEvent};
use crate::reply::ReplyService;
use crate::tui::{self, EventHandler, Tui};
use crate::ui::conversation::{ConversationAction, ConversationManager};

/// Terminal chat application: one screen, one conversation
pub struct App {
    manager: ConversationManager,
    app_tx: mpsc::UnboundedSender<AppEvent>,
    app_rx: mpsc::UnboundedReceiver<AppEvent>,
    config: Config,
}

impl App {
    pub fn new(config: Config, service: Arc<dyn ReplyService>) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        let conversation =
            Conversation::new(config.language).with_notice_duration(config.notice_duration());
        let manager = ConversationManager::new(conversation, service, app_tx.clone())
            .show_timestamps(config.ui.show_timestamps);

        Self {
            manager,
            app_tx,
            app_rx,
            config,
        }
    }

    /// Set up the terminal, run the event loop, and always restore the terminal.
    pub async fn run(mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init().context("Failed to initialize terminal")?;

        let result = self.event_loop(&mut terminal).await;

        tui::restore().context("Failed to restore terminal")?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventHandler::new(self.config.tick_rate(), self.app_tx.clone());
        tracing::info!(language = %self.config.language, "chat session started");

        loop {
            terminal.draw(|frame| {
                self.manager
                    .render_conversation_ui(frame.size(), frame.buffer_mut())
            })?;

            tokio::select! {
                event = events.next() => {
                    if self.handle_terminal_event(event) == ConversationAction::Exit {
                        break;
                    }
                }
                Some(event) = self.app_rx.recv() => self.manager.handle_event(event),
                else => break,
            }
        }

        tracing::info!(
            pending = self.manager.conversation().in_flight_count(),
            "chat session ended"
        );
        Ok(())
    }

    /// `None` means the terminal input stream is gone and nothing can quit the app.
    fn handle_terminal_event(&mut self, event: Option<TuiEvent>) -> ConversationAction {
        match event {
            Some(TuiEvent::Key(key)) => self.manager.handle_key(key),
            Some(TuiEvent::Paste(text)) => {
                self.manager.handle_paste(&text);
                ConversationAction::None
            }
            // Next draw picks up the new size
            Some(TuiEvent::Resize(_, _)) => ConversationAction::None,
            None => {
                tracing::warn!("terminal event stream closed");
                ConversationAction::Exit
            }
        }
    }
}
