//! UI state transition logic
//!
//! Pure functions for UI timing decisions.

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Check whether a toast that has been visible for `elapsed_ms` should go
///
/// # Examples
/// ```
/// use mediamaster::logic::ui::should_dismiss_toast;
///
/// assert!(!should_dismiss_toast(0));
/// assert!(!should_dismiss_toast(1499));
/// assert!(should_dismiss_toast(1500));
/// ```
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Spinner frame for the "Please wait" indicator, advancing every 100ms
pub fn spinner_frame(elapsed_ms: u128) -> char {
    const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
    FRAMES[((elapsed_ms / 100) % FRAMES.len() as u128) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_threshold() {
        assert!(!should_dismiss_toast(TOAST_DURATION_MS - 1));
        assert!(should_dismiss_toast(TOAST_DURATION_MS));
        assert!(should_dismiss_toast(10_000));
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), '|');
        assert_eq!(spinner_frame(100), '/');
        assert_eq!(spinner_frame(399), '-');
        assert_eq!(spinner_frame(400), '|');
    }
}
