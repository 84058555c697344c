//! Canned HTML reply templates.
//!
//! Replies go out with HTML parse mode, so every user-supplied field is
//! escaped before interpolation.

use mynah_core::sanitize::escape_html;
use mynah_telegram::types::{Chat, Document, User};

use crate::files::FileReport;

/// Format the /start greeting.
pub fn welcome(from: Option<&User>, chat_id: i64, thread_id: i64, preview_limit: usize) -> String {
    let name = sender_name(from);
    let user_id = from.map(|u| u.id).unwrap_or(0);
    format!(
        "\u{1f389} <b>Welcome, {name}!</b>\n\n\
         \u{1f916} <b>I am a topic-aware helper bot</b>\n\n\
         \u{2728} <b>Commands:</b>\n\
         \u{2022} /start - show this message\n\
         \u{2022} /help - get help\n\
         \u{2022} /features - what the bot can do\n\
         \u{2022} /info - chat information\n\n\
         \u{1f6e0} <b>What I can do:</b>\n\
         \u{2705} Reply in the same topic the message came from\n\
         \u{2705} Work in groups and private chats\n\
         \u{2705} Inspect photos and documents\n\
         \u{2705} Detect JPEG images\n\
         \u{2705} Show detailed message information\n\
         \u{2705} Configurable API log output\n\n\
         \u{2699} <b>Configuration:</b>\n\
         \u{2022} Max API log output: <b>{preview_limit} characters</b>\n\n\
         \u{1f4ca} <b>About this message:</b>\n\
         \u{2022} \u{1f464} Your name: <b>{name}</b>\n\
         \u{2022} \u{1f194} Your ID: <code>{user_id}</code>\n\
         \u{2022} \u{1f4ac} Chat ID: <code>{chat_id}</code>\n\
         \u{2022} \u{1f3f7} Topic ID: <code>{thread_id}</code>"
    )
}

/// Format the /help reply.
pub fn help_text(preview_limit: usize) -> String {
    format!(
        "\u{1f198} <b>Bot help</b>\n\n\
         \u{1f4da} <b>Available commands:</b>\n\
         \u{2022} /start - start talking to the bot\n\
         \u{2022} /help - show this help\n\
         \u{2022} /features - what the bot can do\n\
         \u{2022} /info - current chat information\n\n\
         \u{2699} <b>Settings:</b>\n\
         \u{2022} Max API log output: <b>{preview_limit} characters</b>"
    )
}

/// Format the /features reply.
pub fn features(preview_limit: usize) -> String {
    format!(
        "\u{1f680} <b>Bot features</b>\n\n\
         \u{1f527} <b>Technical:</b>\n\
         \u{2022} <b>Configurable API log output</b> - max length: \
         <b>{preview_limit} characters</b>\n\n\
         \u{2699} <b>Configuration keys:</b>\n\
         \u{2022} MYNAH_LOG_PREVIEW_LIMIT - max API log output \
         (current value: {preview_limit})"
    )
}

/// Format the /info chat summary.
pub fn chat_info(chat: &Chat, thread_id: i64, preview_limit: usize) -> String {
    let chat_type = chat_type_label(&chat.chat_type);
    let title = chat_title(chat);
    let topic_status = if thread_id != 0 {
        format!("\u{2705} yes (ID: {thread_id})")
    } else {
        "\u{274c} no (main chat)".to_string()
    };
    format!(
        "\u{2139} <b>Chat information</b>\n\n\
         \u{1f4cb} <b>Basics:</b>\n\
         \u{2022} \u{1f4ac} Chat type: <b>{chat_type}</b>\n\
         \u{2022} \u{1f3f7} Title: <b>{title}</b>\n\
         \u{2022} \u{1f194} Chat ID: <code>{}</code>\n\
         \u{2022} \u{1f3f7} Topic: {topic_status}\n\n\
         \u{1f527} <b>Technical:</b>\n\
         \u{2022} Max API log output: <b>{preview_limit} characters</b>",
        chat.id
    )
}

/// Format the default text-echo reply.
pub fn echo(
    text: &str,
    from: Option<&User>,
    chat_id: i64,
    thread_id: i64,
    preview_limit: usize,
) -> String {
    let name = sender_name(from);
    let username = from
        .and_then(|u| u.username.as_deref())
        .map(|u| format!(" (@{})", escape_html(u)))
        .unwrap_or_default();
    format!(
        "\u{2705} <b>Message received!</b>\n\n\
         \u{1f4dd} <b>Your message:</b>\n\
         <code>{}</code>\n\n\
         \u{1f464} <b>From:</b> <b>{name}</b>{username}\n\n\
         \u{1f4ca} <b>Technical details:</b>\n\
         \u{2022} \u{1f4ac} Chat ID: <code>{chat_id}</code>\n\
         \u{2022} \u{1f3f7} Topic ID: <code>{thread_id}</code>\n\
         \u{2022} \u{1f4cf} Max API log output: <b>{preview_limit} characters</b>\n\n\
         \u{1f3af} <i>This reply was sent to the same topic!</i>",
        escape_html(text)
    )
}

/// Format the photo report.
pub fn photo_report(report: &FileReport, caption: Option<&str>) -> String {
    let dimensions = report.dimensions.as_deref().unwrap_or("?");
    format!(
        "\u{1f4f8} <b>Photo received!</b>\n\n\
         \u{1f5bc} <b>Photo details:</b>\n\
         \u{2022} \u{1f4cf} Dimensions: <b>{dimensions}</b>\n\
         \u{2022} \u{1f4be} Size: <b>{}</b>\n\
         \u{2022} \u{1f3f7} Type: <b>{}</b>\n\n\
         \u{1f4dd} <b>Caption:</b> {}\n\n\
         \u{1f3af} <i>Photo processed!</i>",
        report.size_kb,
        report.kind,
        caption_text(caption)
    )
}

/// Format the document report with its JPEG verdict.
pub fn document_report(doc: &Document, report: &FileReport, caption: Option<&str>) -> String {
    let name = escape_html(doc.file_name.as_deref().unwrap_or("unnamed"));
    let mime = escape_html(doc.mime_type.as_deref().unwrap_or("unknown"));
    let verdict = if report.is_jpeg {
        "\u{2705} <b>This is a JPEG image!</b>"
    } else {
        "\u{274c} <b>This is not a JPEG image</b>"
    };
    format!(
        "\u{1f4ce} <b>Document received!</b>\n\n\
         \u{1f4cb} <b>File details:</b>\n\
         \u{2022} \u{1f4dd} Name: <code>{name}</code>\n\
         \u{2022} \u{1f3f7} MIME type: <b>{mime}</b>\n\
         \u{2022} \u{1f4be} Size: <b>{}</b>\n\n\
         \u{1f4dd} <b>Caption:</b> {}\n\n\
         {verdict}\n\n\
         \u{1f3af} <i>Checked against the JPEG format!</i>",
        report.size_kb,
        caption_text(caption)
    )
}

/// Format the reply for messages with no text, photo, or document.
pub fn other_message() -> String {
    "\u{1f52e} <b>Received a message of another type!</b>\n\n\
     \u{1f4a1} <b>What I can inspect:</b>\n\
     \u{2022} \u{1f4f8} Photos (always JPEG after Telegram re-encoding)\n\
     \u{2022} \u{1f4ce} Documents (checked for the JPEG format)\n\
     \u{2022} \u{1f4ac} Text messages"
        .to_string()
}

fn sender_name(from: Option<&User>) -> String {
    from.map(|u| escape_html(&u.first_name))
        .unwrap_or_else(|| "friend".to_string())
}

fn chat_title(chat: &Chat) -> String {
    match chat.title.as_deref() {
        Some(t) if !t.is_empty() => escape_html(t),
        _ => "Untitled".to_string(),
    }
}

fn chat_type_label(chat_type: &str) -> &'static str {
    match chat_type {
        "private" => "\u{1f4ac} Private chat",
        "group" => "\u{1f465} Group",
        "supergroup" => "\u{1f31f} Supergroup",
        "channel" => "\u{1f4e2} Channel",
        _ => "Unknown",
    }
}

fn caption_text(caption: Option<&str>) -> String {
    match caption {
        Some(c) if !c.is_empty() => escape_html(c),
        _ => "<i>no caption</i>".to_string(),
    }
}
