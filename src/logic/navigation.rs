//! Navigation selection logic
//!
//! Pure functions for calculating selection indices and the scroll window of
//! the virtualized media list.

/// Calculate the next selection index with wrapping
///
/// Advances the selection to the next item in the list. If at the end,
/// wraps around to the beginning. If no item is selected, selects the first item.
///
/// # Examples
/// ```
/// use mediamaster::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= list_len - 1 => 0, // Wrap to start
        Some(i) => i + 1,
        None => 0,
    })
}

/// Calculate the previous selection index with wrapping
///
/// # Examples
/// ```
/// use mediamaster::logic::navigation::prev_selection;
///
/// assert_eq!(prev_selection(None, 0), None);
/// assert_eq!(prev_selection(Some(1), 3), Some(0));
/// assert_eq!(prev_selection(Some(0), 3), Some(2));
/// assert_eq!(prev_selection(None, 3), Some(2));
/// ```
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1, // Wrap to end
        Some(i) => i - 1,
    })
}

/// Move the selection by `delta` rows, clamping at both ends (no wrap)
///
/// Used for page up/down where wrapping would be disorienting.
pub fn offset_selection(current: Option<usize>, delta: isize, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    let base = current.unwrap_or(0) as isize;
    let target = (base + delta).clamp(0, list_len as isize - 1);
    Some(target as usize)
}

/// Adjust the first visible row so the selected row stays on screen
///
/// `visible_rows` is how many rows fit in the viewport. The returned offset
/// never scrolls past the point where the last row is at the bottom.
///
/// # Examples
/// ```
/// use mediamaster::logic::navigation::scroll_offset_for;
///
/// // Selection inside the window: unchanged
/// assert_eq!(scroll_offset_for(0, Some(2), 5, 20), 0);
/// // Selection below the window: scroll so it's the last visible row
/// assert_eq!(scroll_offset_for(0, Some(7), 5, 20), 3);
/// // Selection above the window: scroll up to it
/// assert_eq!(scroll_offset_for(10, Some(4), 5, 20), 4);
/// ```
pub fn scroll_offset_for(
    current_offset: usize,
    selected: Option<usize>,
    visible_rows: usize,
    list_len: usize,
) -> usize {
    if list_len == 0 || visible_rows == 0 {
        return 0;
    }

    let max_offset = list_len.saturating_sub(visible_rows);
    let mut offset = current_offset.min(max_offset);

    if let Some(sel) = selected {
        if sel < offset {
            offset = sel;
        } else if sel >= offset + visible_rows {
            offset = sel + 1 - visible_rows;
        }
    }

    offset.min(max_offset)
}

/// Positions currently inside the viewport: `offset..offset + visible_rows`,
/// clipped to the list length
pub fn visible_range(offset: usize, visible_rows: usize, list_len: usize) -> std::ops::Range<usize> {
    let start = offset.min(list_len);
    let end = (offset + visible_rows).min(list_len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_selection_empty_list() {
        assert_eq!(next_selection(None, 0), None);
        assert_eq!(next_selection(Some(5), 0), None);
    }

    #[test]
    fn test_next_selection_single_item_wraps_to_itself() {
        assert_eq!(next_selection(Some(0), 1), Some(0));
    }

    #[test]
    fn test_prev_selection_single_item_wraps_to_itself() {
        assert_eq!(prev_selection(Some(0), 1), Some(0));
    }

    #[test]
    fn test_offset_selection_clamps() {
        assert_eq!(offset_selection(Some(2), 10, 5), Some(4));
        assert_eq!(offset_selection(Some(2), -10, 5), Some(0));
        assert_eq!(offset_selection(None, 3, 5), Some(3));
        assert_eq!(offset_selection(Some(0), 3, 0), None);
    }

    #[test]
    fn test_scroll_offset_clamps_to_list_end() {
        // Stale large offset after the list shrank
        assert_eq!(scroll_offset_for(50, Some(1), 5, 8), 1);
        assert_eq!(scroll_offset_for(50, None, 5, 8), 3);
    }

    #[test]
    fn test_scroll_offset_list_shorter_than_viewport() {
        assert_eq!(scroll_offset_for(0, Some(2), 10, 3), 0);
    }

    #[test]
    fn test_scroll_offset_empty() {
        assert_eq!(scroll_offset_for(4, Some(1), 5, 0), 0);
        assert_eq!(scroll_offset_for(4, Some(1), 0, 10), 0);
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(visible_range(0, 5, 20), 0..5);
        assert_eq!(visible_range(18, 5, 20), 18..20);
        assert_eq!(visible_range(25, 5, 20), 20..20);
    }
}
