//! Pagination logic
//!
//! Pure functions deciding which page links a list section shows.

/// Rows requested per list page
pub const PAGE_SIZE: u32 = 10;

/// Pager model derived from a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub current: u32,
    pub total: u32,
    /// Windowed page numbers around `current`
    pub pages: Vec<u32>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Page numbers shown around the current page: two before, two after,
/// clipped to `[1, total]`
///
/// # Examples
/// ```
/// use tenderdesk::logic::pagination::page_window;
///
/// assert_eq!(page_window(1, 10), vec![1, 2, 3]);
/// assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
/// assert_eq!(page_window(10, 10), vec![8, 9, 10]);
/// assert_eq!(page_window(2, 3), vec![1, 2, 3]);
/// ```
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total == 0 {
        return Vec::new();
    }

    let start = current.saturating_sub(2).max(1);
    let end = current.saturating_add(2).min(total);

    (start..=end).collect()
}

/// Build the pager for a response, `None` when there is at most one page
pub fn build_pager(current: u32, total: u32) -> Option<Pager> {
    if total <= 1 {
        return None;
    }

    Some(Pager {
        current,
        total,
        pages: page_window(current, total),
        has_previous: current > 1,
        has_next: current < total,
    })
}

/// Clamp a requested page into the valid range for `total` pages
pub fn clamp_page(requested: u32, total: u32) -> u32 {
    requested.max(1).min(total.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_clipped_at_start() {
        assert_eq!(page_window(1, 2), vec![1, 2]);
        assert_eq!(page_window(2, 8), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_window_is_clipped_at_end() {
        assert_eq!(page_window(7, 8), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_window_never_exceeds_five() {
        for total in 1..30 {
            for current in 1..=total {
                let window = page_window(current, total);
                assert!(window.len() <= 5);
                assert!(window.len() == total.min(5) as usize || window.len() >= 3);
                assert!(window.contains(&current));
                assert!(window.iter().all(|p| *p >= 1 && *p <= total));
            }
        }
    }

    #[test]
    fn test_empty_total_has_no_window() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_single_page_has_no_pager() {
        assert!(build_pager(1, 0).is_none());
        assert!(build_pager(1, 1).is_none());
    }

    #[test]
    fn test_pager_edges() {
        let first = build_pager(1, 4).unwrap();
        assert!(!first.has_previous);
        assert!(first.has_next);

        let last = build_pager(4, 4).unwrap();
        assert!(last.has_previous);
        assert!(!last.has_next);
        assert_eq!(last.current, 4);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
    }
}
