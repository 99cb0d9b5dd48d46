//! Conversation state and the operations that mutate it

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::events::{ConversationRole, Language};
use crate::locale;
use crate::reply::{ReplyError, ReplyRequest, ReplyService};
use crate::support::{SupportError, SupportRequest};

/// Per-session message identifier, increasing in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single message in the conversation
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub role: ConversationRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Handle for a request that has been sent but not settled yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: Uuid,
    pub request: ReplyRequest,
}

/// Transient toast shown at the bottom of the screen
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// Session state owned by the chat screen
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    pending_input: String,
    language: Language,
    /// Requests in flight, keyed by ticket, with the language they were sent in
    in_flight: HashMap<Uuid, Language>,
    next_id: u64,
    support_open: bool,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl Conversation {
    pub fn new(language: Language) -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            pending_input: String::new(),
            language,
            in_flight: HashMap::new(),
            next_id: 1,
            support_open: false,
            notice: None,
            notice_duration: Duration::from_millis(3000),
        };
        conversation.reset_to_greeting();
        conversation
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn pending_input_mut(&mut self) -> &mut String {
        &mut self.pending_input
    }

    /// True while at least one request has not settled.
    pub fn awaiting_reply(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Append the user message and register a request for it.
    ///
    /// Returns `None` without touching state when `text` is blank.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }

        self.push(ConversationRole::User, text.to_string());
        self.pending_input.clear();

        let ticket = Uuid::new_v4();
        self.in_flight.insert(ticket, self.language);
        tracing::debug!(%ticket, language = %self.language, "reply requested");

        Some(PendingReply {
            ticket,
            request: ReplyRequest {
                message: text.to_string(),
                language: self.language,
            },
        })
    }

    /// Append the assistant message for a settled request.
    ///
    /// Fallback strings use the language the request was sent in. Unknown or
    /// already settled tickets are ignored; returns the appended message id.
    pub fn settle(
        &mut self,
        ticket: Uuid,
        outcome: Result<Option<String>, ReplyError>,
    ) -> Option<MessageId> {
        let Some(language) = self.in_flight.remove(&ticket) else {
            tracing::warn!(%ticket, "ignoring reply for unknown request");
            return None;
        };

        let strings = locale::strings(language);
        let content = match outcome {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(%ticket, "reply service returned no usable text");
                strings.generic_error.to_string()
            }
            Err(e) => {
                tracing::error!(%ticket, error = %e, "error calling reply service");
                strings.connection_error.to_string()
            }
        };

        Some(self.push(ConversationRole::Assistant, content))
    }

    /// Send `text` through `service` and wait for the reply.
    ///
    /// Returns `false` if the text was blank and nothing happened.
    pub async fn submit<S>(&mut self, service: &S, text: &str) -> bool
    where
        S: ReplyService + ?Sized,
    {
        let Some(pending) = self.begin_submit(text) else {
            return false;
        };
        let outcome = service.reply(&pending.request).await;
        self.settle(pending.ticket, outcome);
        true
    }

    /// Switch language and replace the history with a fresh greeting.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.reset_to_greeting();
        tracing::info!(%language, "language switched, conversation reset");
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggled());
    }

    pub fn support_open(&self) -> bool {
        self.support_open
    }

    pub fn open_support(&mut self) {
        self.support_open = true;
    }

    pub fn close_support(&mut self) {
        self.support_open = false;
    }

    /// Acknowledge a support request locally: notice plus dialog close.
    pub fn submit_support_request(&mut self, request: &SupportRequest) -> Result<(), SupportError> {
        request.validate()?;

        tracing::info!(name = %request.name, "support request submitted");
        let text = locale::strings(self.language).success_message;
        self.show_notice(text);
        self.support_open = false;
        Ok(())
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            shown_at: Instant::now(),
            duration: self.notice_duration,
        });
    }

    pub fn active_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired(now))
    }

    /// Drop the notice once it has expired.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            self.notice = None;
        }
    }

    fn reset_to_greeting(&mut self) {
        self.messages.clear();
        let greeting = locale::strings(self.language).welcome_message.to_string();
        self.push(ConversationRole::Assistant, greeting);
    }

    fn push(&mut self, role: ConversationRole, content: String) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: Local::now(),
        });
        id
    }
}
