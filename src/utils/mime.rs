//! MIME type detection for file parts

use crate::defaults::body::OCTET_STREAM;

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file name (extension-based)
pub fn guess_mime_from_file_name(file_name: &str) -> Option<String> {
    mime_guess::from_path(file_name)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer the file name, then the bytes, otherwise octet-stream
pub fn guess_mime(file_name: &str, bytes: Option<&[u8]>) -> String {
    if let Some(m) = guess_mime_from_file_name(file_name) {
        return m;
    }
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    OCTET_STREAM.to_string()
}
