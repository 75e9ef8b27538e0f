//! UI state transition logic
//!
//! Pure functions for cycling through option lists and moving selections.

/// Cycle forward through `options`, where `None` stands for "all"
///
/// The order is: None → first → ... → last → None.
///
/// # Examples
/// ```
/// use tenderdesk::logic::ui::cycle_option;
///
/// let statuses = ["active", "inactive"];
/// assert_eq!(cycle_option(&statuses, None), Some("active"));
/// assert_eq!(cycle_option(&statuses, Some("active")), Some("inactive"));
/// assert_eq!(cycle_option(&statuses, Some("inactive")), None);
/// ```
pub fn cycle_option<'a>(options: &[&'a str], current: Option<&str>) -> Option<&'a str> {
    match current {
        None => options.first().copied(),
        Some(value) => match options.iter().position(|o| *o == value) {
            Some(idx) => options.get(idx + 1).copied(),
            None => options.first().copied(),
        },
    }
}

/// Cycle through a closed list of values without an "all" slot
pub fn cycle_value<'a>(options: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }

    let len = options.len();
    let next = match options.iter().position(|o| *o == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None => 0,
    };

    options.get(next).copied()
}

/// Move a list selection by `delta`, clamped to the list
pub fn move_selection(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current.unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    Some(next as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_option_unknown_value_restarts() {
        assert_eq!(cycle_option(&["a", "b"], Some("zzz")), Some("a"));
    }

    #[test]
    fn test_cycle_option_empty_list() {
        assert_eq!(cycle_option(&[], None), None);
    }

    #[test]
    fn test_cycle_value_wraps_both_ways() {
        let options = ["draft", "active", "cancelled"];
        assert_eq!(cycle_value(&options, "cancelled", true), Some("draft"));
        assert_eq!(cycle_value(&options, "draft", false), Some("cancelled"));
        assert_eq!(cycle_value(&options, "", true), Some("draft"));
    }

    #[test]
    fn test_move_selection_clamps() {
        assert_eq!(move_selection(None, 0, 1), None);
        assert_eq!(move_selection(None, 3, 1), Some(1));
        assert_eq!(move_selection(Some(2), 3, 5), Some(2));
        assert_eq!(move_selection(Some(1), 3, -4), Some(0));
    }
}
