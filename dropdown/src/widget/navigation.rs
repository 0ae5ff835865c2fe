//! Keyboard focus movement over the result list.
//!
//! Focus is an index into the results, or `None` when no row is focused.
//! Movement clamps at both ends; it never wraps.

/// Focus after moving down one row in a list of `len` rows.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(index) => Some((index + 1).min(len - 1)),
    }
}

/// Focus after moving up one row in a list of `len` rows.
///
/// Moving up never enters the list: with no row focused, none stays focused.
pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    current.map(|index| index.saturating_sub(1).min(len - 1))
}

/// `index` if it addresses a row in a list of `len` rows.
pub fn valid_index(index: usize, len: usize) -> Option<usize> {
    (index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_clamps_at_last_row() {
        let mut focus = None;
        for _ in 0..10 {
            focus = next_index(focus, 3);
        }
        assert_eq!(focus, Some(2));
    }

    #[test]
    fn test_prev_clamps_at_first_row() {
        let mut focus = Some(2);
        for _ in 0..10 {
            focus = prev_index(focus, 3);
        }
        assert_eq!(focus, Some(0));
    }

    #[test]
    fn test_empty_list_has_no_focus() {
        assert_eq!(next_index(None, 0), None);
        assert_eq!(prev_index(None, 0), None);
        assert_eq!(next_index(Some(4), 0), None);
    }

    #[test]
    fn test_prev_from_none_stays_unfocused() {
        assert_eq!(prev_index(None, 5), None);
    }

    #[test]
    fn test_valid_index() {
        assert_eq!(valid_index(1, 2), Some(1));
        assert_eq!(valid_index(2, 2), None);
    }
}
