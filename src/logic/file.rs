//! File type detection
//!
//! Pure functions for mapping file names to MIME types when indexing the
//! catalog. Detection is extension based and case insensitive.

use std::path::Path;

/// Guess a MIME type from a file name or path
///
/// Returns `None` for files with no extension or an unknown one; the
/// indexer still catalogues those (they show up under DOCUMENTS) with
/// `application/octet-stream`.
///
/// # Examples
/// ```
/// use mediamaster::logic::file::mime_type_for_path;
///
/// assert_eq!(mime_type_for_path("photo.JPG"), Some("image/jpeg"));
/// assert_eq!(mime_type_for_path("/music/song.mp3"), Some("audio/mpeg"));
/// assert_eq!(mime_type_for_path("notes"), None);
/// ```
pub fn mime_type_for_path(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "3gp" => "video/3gpp",
        "mp3" => "audio/mpeg",
        "wav" => "audio/x-wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime)
}

/// Fallback MIME type for files the extension table doesn't know
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        for name in ["a.png", "b.jpg", "c.JPEG", "d.gif", "e.bmp", "f.webp", "g.tif", "h.TIFF"] {
            let mime = mime_type_for_path(name).unwrap();
            assert!(mime.starts_with("image/"), "{} -> {}", name, mime);
        }
    }

    #[test]
    fn test_audio_allow_list_types_are_detected() {
        assert_eq!(mime_type_for_path("a.mp3"), Some("audio/mpeg"));
        assert_eq!(mime_type_for_path("a.wav"), Some("audio/x-wav"));
        assert_eq!(mime_type_for_path("a.ogg"), Some("audio/ogg"));
        assert_eq!(mime_type_for_path("a.m4a"), Some("audio/mp4"));
    }

    #[test]
    fn test_video_extensions() {
        assert_eq!(mime_type_for_path("clip.mp4"), Some("video/mp4"));
        assert_eq!(mime_type_for_path("clip.MKV"), Some("video/x-matroska"));
    }

    #[test]
    fn test_unknown_and_missing_extensions() {
        assert_eq!(mime_type_for_path("archive.xyz"), None);
        assert_eq!(mime_type_for_path("Makefile"), None);
        assert_eq!(mime_type_for_path(".hidden"), None);
    }
}
