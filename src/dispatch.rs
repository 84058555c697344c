//! Update dispatch: classify each inbound message and send the canned reply
//! back to the same chat and topic.

use async_trait::async_trait;
use mynah_core::error::MynahError;
use mynah_telegram::types::{Message, Update};
use mynah_telegram::{TelegramApi, UpdateHandler};
use tracing::{debug, error, info};

use crate::files;
use crate::replies;

/// Recognized slash commands.
#[derive(Debug, PartialEq)]
pub enum Command {
    Start,
    Help,
    Features,
    Info,
}

impl Command {
    /// Parse a command from message text. Returns `None` for anything that
    /// is not a known command (those fall through to the echo reply).
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/help@mynah_bot" -> "/help").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/features" => Some(Self::Features),
            "/info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// The single handling path chosen for a message.
#[derive(Debug, PartialEq)]
pub enum MessageKind {
    Photo,
    Document,
    Other,
    Command(Command),
    Text,
}

/// Decide the handling path for a message. Exactly one path applies.
///
/// Order matters: a photo may carry command-looking caption text and must
/// still be handled as a photo.
pub fn classify(msg: &Message) -> MessageKind {
    if msg.photo.as_deref().is_some_and(|p| !p.is_empty()) {
        return MessageKind::Photo;
    }
    if msg.document.as_ref().is_some_and(|d| !d.file_id.is_empty()) {
        return MessageKind::Document;
    }

    let text = msg.text.as_deref().unwrap_or("");
    if text.is_empty() {
        return MessageKind::Other;
    }

    match Command::parse(text) {
        Some(cmd) => MessageKind::Command(cmd),
        None => MessageKind::Text,
    }
}

/// Replies to every message with a canned report, routed into the topic the
/// message came from.
pub struct Dispatcher {
    api: TelegramApi,
    preview_limit: usize,
}

impl Dispatcher {
    pub fn new(api: TelegramApi, preview_limit: usize) -> Self {
        Self { api, preview_limit }
    }

    /// Build the reply text for a classified message.
    fn reply_for(&self, msg: &Message, kind: &MessageKind) -> String {
        let thread_id = msg.message_thread_id.unwrap_or(0);
        match kind {
            MessageKind::Photo => {
                let photos = msg.photo.as_deref().unwrap_or_default();
                match files::largest_photo(photos) {
                    Some(photo) => replies::photo_report(
                        &files::inspect_photo(photo),
                        msg.caption.as_deref(),
                    ),
                    None => replies::other_message(),
                }
            }
            MessageKind::Document => match msg.document.as_ref() {
                Some(doc) => replies::document_report(
                    doc,
                    &files::inspect_document(doc),
                    msg.caption.as_deref(),
                ),
                None => replies::other_message(),
            },
            MessageKind::Other => replies::other_message(),
            MessageKind::Command(Command::Start) => {
                replies::welcome(msg.from.as_ref(), msg.chat.id, thread_id, self.preview_limit)
            }
            MessageKind::Command(Command::Help) => replies::help_text(self.preview_limit),
            MessageKind::Command(Command::Features) => replies::features(self.preview_limit),
            MessageKind::Command(Command::Info) => {
                replies::chat_info(&msg.chat, thread_id, self.preview_limit)
            }
            MessageKind::Text => replies::echo(
                msg.text.as_deref().unwrap_or(""),
                msg.from.as_ref(),
                msg.chat.id,
                thread_id,
                self.preview_limit,
            ),
        }
    }
}

#[async_trait]
impl UpdateHandler for Dispatcher {
    async fn handle(&self, update: Update) -> Result<(), MynahError> {
        let Some(msg) = update.message else {
            debug!("update {} carries no message, skipping", update.update_id);
            return Ok(());
        };

        let kind = classify(&msg);
        log_message(&msg, &kind);

        let reply = self.reply_for(&msg, &kind);
        if let Err(e) = self
            .api
            .send_message(msg.chat.id, msg.message_thread_id, &reply)
            .await
        {
            error!("reply to chat {} failed: {e}", msg.chat.id);
        }

        Ok(())
    }
}

fn log_message(msg: &Message, kind: &MessageKind) {
    let sender = msg
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .unwrap_or("?");
    info!(
        "message {} from {} in chat {} (type: {}, topic: {}) -> {:?}",
        msg.message_id,
        sender,
        msg.chat.id,
        msg.chat.chat_type,
        msg.message_thread_id.unwrap_or(0),
        kind
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_classify_photo_first() {
        let msg = message(
            r#"{
                "message_id": 1,
                "chat": {"id": 1, "type": "private"},
                "photo": [{"file_id": "p", "width": 1, "height": 1}],
                "caption": "/start"
            }"#,
        );
        // Command-looking captions must not outrank the photo path.
        assert_eq!(classify(&msg), MessageKind::Photo);
    }

    #[test]
    fn test_classify_document() {
        let msg = message(
            r#"{
                "message_id": 1,
                "chat": {"id": 1, "type": "private"},
                "document": {"file_id": "d", "file_name": "a.pdf"}
            }"#,
        );
        assert_eq!(classify(&msg), MessageKind::Document);
    }

    #[test]
    fn test_classify_document_with_blank_file_id_is_other() {
        let msg = message(
            r#"{
                "message_id": 1,
                "chat": {"id": 1, "type": "private"},
                "document": {"file_id": ""}
            }"#,
        );
        assert_eq!(classify(&msg), MessageKind::Other);
    }

    #[test]
    fn test_classify_empty_text_is_other() {
        let msg = message(r#"{"message_id": 1, "chat": {"id": 1, "type": "private"}}"#);
        assert_eq!(classify(&msg), MessageKind::Other);

        let msg = message(
            r#"{"message_id": 1, "chat": {"id": 1, "type": "private"}, "text": ""}"#,
        );
        assert_eq!(classify(&msg), MessageKind::Other);
    }

    #[test]
    fn test_classify_commands() {
        for (text, cmd) in [
            ("/start", Command::Start),
            ("/help", Command::Help),
            ("/features", Command::Features),
            ("/info", Command::Info),
        ] {
            let msg = message(&format!(
                r#"{{"message_id": 1, "chat": {{"id": 1, "type": "private"}}, "text": "{text}"}}"#
            ));
            assert_eq!(classify(&msg), MessageKind::Command(cmd), "text: {text}");
        }
    }

    #[test]
    fn test_classify_default_is_echo() {
        let msg = message(
            r#"{"message_id": 1, "chat": {"id": 1, "type": "private"}, "text": "hello"}"#,
        );
        assert_eq!(classify(&msg), MessageKind::Text);

        // Unknown commands echo too.
        let msg = message(
            r#"{"message_id": 1, "chat": {"id": 1, "type": "private"}, "text": "/unknown"}"#,
        );
        assert_eq!(classify(&msg), MessageKind::Text);
    }

    #[test]
    fn test_command_parse_strips_bot_mention() {
        assert_eq!(Command::parse("/start@mynah_bot"), Some(Command::Start));
        assert_eq!(Command::parse("/help trailing words"), Some(Command::Help));
        assert_eq!(Command::parse("  /info"), Some(Command::Info));
        assert_eq!(Command::parse("start"), None);
        assert_eq!(Command::parse(""), None);
    }

    const TOKEN: &str = "123:ABC";

    fn api_for(server: &mockito::ServerGuard) -> TelegramApi {
        TelegramApi::with_base_url(&server.url(), TOKEN)
    }

    #[tokio::test]
    async fn test_start_command_replies_once_without_thread() {
        let mut server = mockito::Server::new_async().await;

        // The actual reply: one sendMessage to chat 1 mentioning the sender.
        let reply_mock = server
            .mock("POST", format!("/bot{TOKEN}/sendMessage").as_str())
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::PartialJson(serde_json::json!({"chat_id": 1})),
                mockito::Matcher::Regex("Ann".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {"message_id": 9, "chat": {"id": 1, "type": "private"}}}"#)
            .expect(1)
            .create_async()
            .await;

        // Registered after the reply mock, so it is consulted first: any
        // request carrying a thread parameter lands here and fails expect(0).
        let no_thread_mock = server
            .mock("POST", format!("/bot{TOKEN}/sendMessage").as_str())
            .match_body(mockito::Matcher::Regex("message_thread_id".to_string()))
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 5,
                "message": {
                    "message_id": 1,
                    "chat": {"id": 1, "type": "private"},
                    "text": "/start",
                    "from": {"id": 7, "first_name": "Ann"}
                }
            }"#,
        )
        .unwrap();

        let dispatcher = Dispatcher::new(api_for(&server), 200);
        dispatcher.handle(update).await.unwrap();

        reply_mock.assert_async().await;
        no_thread_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_topic_message_replies_into_topic() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{TOKEN}/sendMessage").as_str())
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "chat_id": -100,
                "message_thread_id": 29,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {"message_id": 9, "chat": {"id": -100, "type": "supergroup"}}}"#)
            .expect(1)
            .create_async()
            .await;

        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 6,
                "message": {
                    "message_id": 2,
                    "chat": {"id": -100, "type": "supergroup"},
                    "message_thread_id": 29,
                    "text": "hello there"
                }
            }"#,
        )
        .unwrap();

        let dispatcher = Dispatcher::new(api_for(&server), 200);
        dispatcher.handle(update).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        // No mocks registered: the send comes back 501 and the handler must
        // still report success so the poll cursor moves on.
        let server = mockito::Server::new_async().await;

        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 7,
                "message": {
                    "message_id": 3,
                    "chat": {"id": 1, "type": "private"},
                    "text": "hi"
                }
            }"#,
        )
        .unwrap();

        let dispatcher = Dispatcher::new(api_for(&server), 200);
        assert!(dispatcher.handle(update).await.is_ok());
    }

    #[tokio::test]
    async fn test_message_less_update_is_skipped() {
        let server = mockito::Server::new_async().await;
        let update: Update = serde_json::from_str(r#"{"update_id": 8}"#).unwrap();

        let dispatcher = Dispatcher::new(api_for(&server), 200);
        assert!(dispatcher.handle(update).await.is_ok());
    }
}
