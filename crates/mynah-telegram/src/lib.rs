//! # mynah-telegram
//!
//! Telegram Bot API client: wire types, HTTP methods, and the long-polling
//! update loop. Docs: <https://core.telegram.org/bots/api>

pub mod api;
pub mod polling;
pub mod types;
pub mod util;


pub use api::TelegramApi;
pub use polling::UpdateHandler;
