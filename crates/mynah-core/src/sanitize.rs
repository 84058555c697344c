//! Sanitization of user-supplied text before it reaches replies or logs.
//!
//! Replies are sent with HTML parse mode, so any interpolated user text must
//! have its markup characters neutralized first.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate text to `limit` characters for log output, appending `...` when
/// anything was cut. Counts characters, not bytes, so multi-byte input never
/// splits mid-glyph.
pub fn truncate_for_log(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}
