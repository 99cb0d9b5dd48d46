//! UI strings for the two supported locales

use chrono::{DateTime, Local};

use crate::events::Language;

/// Every user-visible string of one locale
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub placeholder: &'static str,
    pub send: &'static str,
    pub support: &'static str,
    pub support_title: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub message: &'static str,
    pub submit: &'static str,
    pub success_message: &'static str,
    pub welcome_message: &'static str,
    pub thinking_message: &'static str,
    /// Assistant content when the service answered without usable text
    pub generic_error: &'static str,
    /// Assistant content when the request itself failed
    pub connection_error: &'static str,
    pub invalid_email: &'static str,
    pub missing_field: &'static str,
    pub key_hints: &'static str,
    pub dialog_hints: &'static str,
    pub help: &'static str,
}

pub static RU: Strings = Strings {
    title: "Mega Chat",
    subtitle: "Ваш персональный AI-ассистент",
    placeholder: "Напишите ваше сообщение...",
    send: "Отправить",
    support: "Поддержка",
    support_title: "Свяжитесь с нами",
    name: "Ваше имя",
    email: "Ваш email",
    message: "Ваше сообщение",
    submit: "Отправить",
    success_message: "Сообщение успешно отправлено!",
    welcome_message: "Привет! Я Mega Chat AI. Чем могу помочь сегодня?",
    thinking_message: "Обрабатываю ваш запрос...",
    generic_error: "Извините, произошла ошибка.",
    connection_error: "Извините, не удалось получить ответ. Проверьте подключение к интернету.",
    invalid_email: "Введите корректный email",
    missing_field: "Заполните это поле",
    key_hints: "Enter — отправить · Ctrl+L — язык · Ctrl+S — поддержка · Ctrl+C — выход",
    dialog_hints: "Tab — следующее поле · Enter — отправить · Esc — закрыть",
    help: "/lang [ru|en] — сменить язык · /support — поддержка · /help — помощь · /bye — выход",
};

pub static EN: Strings = Strings {
    title: "Mega Chat",
    subtitle: "Your personal AI assistant",
    placeholder: "Type your message...",
    send: "Send",
    support: "Support",
    support_title: "Contact us",
    name: "Your name",
    email: "Your email",
    message: "Your message",
    submit: "Submit",
    success_message: "Message sent successfully!",
    welcome_message: "Hello! I'm Mega Chat AI. How can I help you today?",
    thinking_message: "Processing your request...",
    generic_error: "Sorry, an error occurred.",
    connection_error: "Sorry, failed to get a response. Please check your internet connection.",
    invalid_email: "Please enter a valid email",
    missing_field: "Please fill out this field",
    key_hints: "Enter send · Ctrl+L language · Ctrl+S support · Ctrl+C quit",
    dialog_hints: "Tab next field · Enter submit · Esc close",
    help: "/lang [ru|en] switch language · /support contact us · /help this help · /bye quit",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::Ru => &RU,
        Language::En => &EN,
    }
}

/// Hour and minute in the locale's customary clock (`14:05` / `02:05 PM`).
pub fn format_time(language: Language, timestamp: &DateTime<Local>) -> String {
    match language {
        Language::Ru => timestamp.format("%H:%M").to_string(),
        Language::En => timestamp.format("%I:%M %p").to_string(),
    }
}
