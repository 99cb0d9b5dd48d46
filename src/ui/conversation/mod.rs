//! Conversation UI components for chat interface

pub mod commands;
pub mod composer;
pub mod history;
pub mod manager;
pub mod support;
pub mod typing;

pub use commands::{ParsedCommand, SlashCommand};
pub use composer::{ComposerResult, ComposerView, ConversationComposer};
pub use history::ConversationHistory;
pub use manager::{ConversationAction, ConversationManager};
pub use support::{SupportDialog, SupportDialogResult, SupportDialogView};
pub use typing::TypingIndicator;
