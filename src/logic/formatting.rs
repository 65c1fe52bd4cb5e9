//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use chrono::{DateTime, Local, TimeZone};

/// Format a byte count for the secondary line of audio/document rows
///
/// Uses integer division with truncation (no decimals, no rounding):
/// below 1 KiB the raw byte count, below 1 MiB whole kilobytes, otherwise
/// whole megabytes. A missing size renders as "Unknown size".
///
/// # Examples
/// ```
/// use mediamaster::logic::formatting::format_file_size;
///
/// assert_eq!(format_file_size(Some(500)), "500 B");
/// assert_eq!(format_file_size(Some(2048)), "2 KB");
/// assert_eq!(format_file_size(Some(5_242_880)), "5 MB");
/// assert_eq!(format_file_size(None), "Unknown size");
/// ```
pub fn format_file_size(size: Option<u64>) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    match size {
        None => "Unknown size".to_string(),
        Some(bytes) if bytes < KB => format!("{} B", bytes),
        Some(bytes) if bytes < MB => format!("{} KB", bytes / KB),
        Some(bytes) => format!("{} MB", bytes / MB),
    }
}

/// Format a catalog `date_added` timestamp (unix seconds) in local time
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_date_added(unix_seconds: i64) -> Option<String> {
    let utc: DateTime<chrono::Utc> = chrono::Utc.timestamp_opt(unix_seconds, 0).single()?;
    let local: DateTime<Local> = utc.with_timezone(&Local);
    Some(local.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_bytes() {
        assert_eq!(format_file_size(Some(0)), "0 B");
        assert_eq!(format_file_size(Some(500)), "500 B");
        assert_eq!(format_file_size(Some(1023)), "1023 B");
    }

    #[test]
    fn test_format_file_size_kilobytes_truncate() {
        assert_eq!(format_file_size(Some(1024)), "1 KB");
        assert_eq!(format_file_size(Some(2048)), "2 KB");
        // 1.99 KB truncates, never rounds up
        assert_eq!(format_file_size(Some(2047)), "1 KB");
        assert_eq!(format_file_size(Some(1024 * 1024 - 1)), "1023 KB");
    }

    #[test]
    fn test_format_file_size_megabytes_truncate() {
        assert_eq!(format_file_size(Some(1024 * 1024)), "1 MB");
        assert_eq!(format_file_size(Some(5_242_880)), "5 MB");
        assert_eq!(format_file_size(Some(5_242_880 + 1_048_575)), "5 MB");
        // No larger units: gigabytes still render in MB
        assert_eq!(format_file_size(Some(3 * 1024 * 1024 * 1024)), "3072 MB");
    }

    #[test]
    fn test_format_file_size_unknown() {
        assert_eq!(format_file_size(None), "Unknown size");
    }

    #[test]
    fn test_format_date_added_shape() {
        let formatted = format_date_added(1_700_000_000).unwrap();
        // "YYYY-MM-DD HH:MM" regardless of local timezone
        assert_eq!(formatted.len(), 16);
        assert!(formatted.starts_with("2023-11-1"));
    }
}
