//! HTTP client for the Telegram Bot API.

use std::time::Duration;

use mynah_core::config::DEFAULT_LOG_PREVIEW_LIMIT;
use mynah_core::error::MynahError;
use mynah_core::sanitize::truncate_for_log;
use tracing::debug;

use crate::types::{ApiResponse, BotIdentity, Update};
use crate::util::split_message;

/// Server-side long-poll window for `getUpdates`, in seconds.
pub const POLL_TIMEOUT_SECS: u64 = 60;

/// Telegram's per-message length limit.
pub const MESSAGE_LIMIT: usize = 4096;

/// Client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
    log_preview_limit: usize,
}

impl TelegramApi {
    /// Create a client against the production Bot API.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url("https://api.telegram.org", bot_token)
    }

    /// Create a client against an arbitrary API root (used by tests).
    pub fn with_base_url(root: &str, bot_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{root}/bot{bot_token}"),
            log_preview_limit: DEFAULT_LOG_PREVIEW_LIMIT,
        }
    }

    /// Set how many characters of raw API responses are echoed to the logs.
    pub fn with_log_preview_limit(mut self, limit: usize) -> Self {
        self.log_preview_limit = limit;
        self
    }

    /// Verify the bot credential and fetch the bot's identity.
    pub async fn get_me(&self) -> Result<BotIdentity, MynahError> {
        let url = format!("{}/getMe", self.base_url);
        let body: ApiResponse<BotIdentity> = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MynahError::Telegram(format!("getMe failed: {e}")))?
            .json()
            .await
            .map_err(|e| MynahError::Telegram(format!("getMe parse failed: {e}")))?;

        match body.result {
            Some(me) if body.ok => Ok(me),
            _ => Err(MynahError::Telegram(format!(
                "getMe rejected: {}",
                body.description.unwrap_or_default()
            ))),
        }
    }

    /// Long-poll for the next batch of updates.
    ///
    /// Holds the request open for up to [`POLL_TIMEOUT_SECS`]; `offset`
    /// acknowledges every update below it on the server side.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, MynahError> {
        let mut url = format!("{}/getUpdates?timeout={POLL_TIMEOUT_SECS}", self.base_url);
        if let Some(off) = offset {
            url.push_str(&format!("&offset={off}"));
        }

        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 5))
            .send()
            .await
            .map_err(|e| MynahError::Telegram(format!("getUpdates failed: {e}")))?;

        let raw = resp
            .text()
            .await
            .map_err(|e| MynahError::Telegram(format!("getUpdates read failed: {e}")))?;
        debug!(
            "getUpdates response: {}",
            truncate_for_log(&raw, self.log_preview_limit)
        );

        let body: ApiResponse<Vec<Update>> = serde_json::from_str(&raw)?;
        if !body.ok {
            return Err(MynahError::Telegram(format!(
                "getUpdates rejected: {}",
                body.description.unwrap_or_default()
            )));
        }
        Ok(body.result.unwrap_or_default())
    }

    /// Send an HTML-formatted message, splitting it when it exceeds
    /// Telegram's length limit.
    ///
    /// A present, non-zero `thread_id` routes the reply into that forum
    /// topic; otherwise it lands in the main chat stream.
    pub async fn send_message(
        &self,
        chat_id: i64,
        thread_id: Option<i64>,
        text: &str,
    ) -> Result<(), MynahError> {
        let url = format!("{}/sendMessage", self.base_url);

        for chunk in split_message(text, MESSAGE_LIMIT) {
            let body = message_payload(chat_id, thread_id, chunk);
            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| MynahError::Telegram(format!("sendMessage failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(MynahError::Telegram(format!(
                    "sendMessage failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }
}

/// Build a `sendMessage` body. The thread parameter is attached only for a
/// present, non-zero topic ID, so main-chat replies stay in the main stream.
pub(crate) fn message_payload(
    chat_id: i64,
    thread_id: Option<i64>,
    text: &str,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "HTML",
    });
    if let Some(id) = thread_id {
        if id != 0 {
            body["message_thread_id"] = serde_json::json!(id);
        }
    }
    body
}
