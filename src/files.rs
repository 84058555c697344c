//! File classification and inspection.

use mynah_telegram::types::{Document, PhotoSize};

/// What the bot reports about a received file.
#[derive(Debug, PartialEq)]
pub struct FileReport {
    pub is_jpeg: bool,
    /// Reported kind: `image/jpeg` for JPEG content, `document` otherwise.
    pub kind: &'static str,
    /// `WxH` of the inspected photo variant; absent for documents.
    pub dimensions: Option<String>,
    pub size_kb: String,
}

/// Check whether a file is a JPEG image, by MIME type or file extension.
///
/// Accepts MIME types starting with `image/jpeg`, the nonstandard
/// `image/jpg`, and `.jpg`/`.jpeg` extensions in any case.
pub fn is_jpeg(mime_type: &str, file_name: &str) -> bool {
    if mime_type.starts_with("image/jpeg") {
        return true;
    }

    let name = file_name.to_lowercase();
    if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        return true;
    }

    mime_type == "image/jpg"
}

/// Pick the photo variant with the largest byte size.
pub fn largest_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    photos.iter().max_by_key(|p| p.file_size.unwrap_or(0))
}

/// Inspect a photo variant. Telegram re-encodes photo uploads as JPEG, so
/// the kind is always `image/jpeg`.
pub fn inspect_photo(photo: &PhotoSize) -> FileReport {
    FileReport {
        is_jpeg: true,
        kind: "image/jpeg",
        dimensions: Some(format!("{}x{}", photo.width, photo.height)),
        size_kb: format_size_kb(photo.file_size.unwrap_or(0)),
    }
}

/// Inspect a generically-uploaded document.
pub fn inspect_document(doc: &Document) -> FileReport {
    let jpeg = is_jpeg(
        doc.mime_type.as_deref().unwrap_or(""),
        doc.file_name.as_deref().unwrap_or(""),
    );
    FileReport {
        is_jpeg: jpeg,
        kind: if jpeg { "image/jpeg" } else { "document" },
        dimensions: None,
        size_kb: format_size_kb(doc.file_size.unwrap_or(0)),
    }
}

fn format_size_kb(bytes: i64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
