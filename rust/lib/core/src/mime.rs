//! Content types by file extension.
//!
//! Shared by the client (declared type of a selected file) and the server
//! (static asset responses, resume upload checks).

pub const PDF: &str = "application/pdf";
pub const JPEG: &str = "image/jpeg";
pub const HTML: &str = "text/html";
pub const CSS: &str = "text/css";
pub const JAVASCRIPT: &str = "application/javascript";
pub const DOC: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map a file name to its content type by extension (case-insensitive).
/// Unknown extensions map to `application/octet-stream`.
pub fn from_file_name(name: &str) -> &'static str {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return OCTET_STREAM,
    };
    match ext.as_str() {
        "jpg" | "jpeg" => JPEG,
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => PDF,
        "doc" => DOC,
        "docx" => DOCX,
        "html" | "htm" => HTML,
        "css" => CSS,
        "js" | "mjs" => JAVASCRIPT,
        "txt" => "text/plain",
        _ => OCTET_STREAM,
    }
}

/// True for any `image/*` type.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}
