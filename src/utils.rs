/// Utility functions used throughout the application

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for debug mode, set once from the command line
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Append a line to the debug log (no-op unless debug mode is enabled)
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("mediamaster-debug.log");
    path
}

/// Get platform-specific data fallback path
pub fn get_data_fallback_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("mediamaster-data");
    path
}

/// Resolve the directory holding the catalog and grant databases
///
/// An explicit override wins; otherwise the platform local data dir is used,
/// falling back to a temp-dir location when none is available.
pub fn get_data_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir {
        return expand_home(dir);
    }

    match dirs::data_local_dir() {
        Some(dir) => dir.join("mediamaster"),
        None => get_data_fallback_path(),
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/srv/media"), PathBuf::from("/srv/media"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Pictures"), home.join("Pictures"));
        }
    }

    #[test]
    fn test_data_dir_override() {
        assert_eq!(get_data_dir(Some("/tmp/mm")), PathBuf::from("/tmp/mm"));
    }
}
