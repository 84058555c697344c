//! Long-polling update loop.

use std::time::Duration;

use async_trait::async_trait;
use mynah_core::error::MynahError;
use tracing::error;

use crate::api::TelegramApi;
use crate::types::Update;

/// Ceiling for the failure retry delay.
const MAX_BACKOFF_SECS: u64 = 60;

/// Handles one update at a time, in arrival order.
#[async_trait]
pub trait UpdateHandler {
    async fn handle(&self, update: Update) -> Result<(), MynahError>;
}

/// Retry delay schedule for consecutive poll failures: 1s doubling to a
/// 60s cap, reset after any successful poll.
pub(crate) struct Backoff {
    secs: u64,
}

impl Backoff {
    pub(crate) fn new() -> Self {
        Self { secs: 1 }
    }

    /// Delay before the next attempt; the one after doubles, up to the cap.
    pub(crate) fn next_delay(&mut self) -> Duration {
        let delay = Duration::from_secs(self.secs);
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
        delay
    }

    pub(crate) fn reset(&mut self) {
        self.secs = 1;
    }
}

/// Poll for updates until the surrounding task is cancelled.
///
/// The offset cursor lives on this loop's stack; a restart resumes from
/// wherever the server left off. Poll failures back off exponentially
/// (1s doubling to a 60s cap, reset after any success) and never advance
/// the cursor. Handler failures are logged and the cursor advances anyway,
/// so one bad update cannot wedge the loop.
pub async fn run<H: UpdateHandler + Sync>(
    api: &TelegramApi,
    handler: &H,
) -> Result<(), MynahError> {
    let mut offset: Option<i64> = None;
    let mut backoff = Backoff::new();

    loop {
        match poll_once(api, handler, offset).await {
            Ok(next) => {
                // Successful poll -- reset backoff.
                backoff.reset();
                offset = next;
            }
            Err(e) => {
                let delay = backoff.next_delay();
                error!("telegram poll error (retry in {}s): {e}", delay.as_secs());
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// One poll-and-dispatch cycle. Returns the cursor for the next cycle.
pub(crate) async fn poll_once<H: UpdateHandler + Sync>(
    api: &TelegramApi,
    handler: &H,
    mut offset: Option<i64>,
) -> Result<Option<i64>, MynahError> {
    let updates = api.get_updates(offset).await?;

    for update in updates {
        let update_id = update.update_id;
        if let Err(e) = handler.handle(update).await {
            error!("update {update_id} failed: {e}");
        }
        offset = advance(offset, update_id);
    }

    Ok(offset)
}

/// Advance the poll cursor past `update_id`. Never moves backwards.
pub(crate) fn advance(cursor: Option<i64>, update_id: i64) -> Option<i64> {
    let next = update_id + 1;
    Some(cursor.map_or(next, |c| c.max(next)))
}
