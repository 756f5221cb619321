//! One page of a paginated listing.

/// An ordered slice of items plus the counts needed to navigate around it.
///
/// Pages are derived per request and never persisted. `current_page` is
/// 1-based and `page_size` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, current_page: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            current_page,
            page_size,
        }
    }

    /// `ceil(total_count / page_size)`; zero for an empty collection.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        self.total_count.div_ceil(size) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Row offset of the first item on this page.
    pub fn offset(current_page: u32, page_size: u32) -> u64 {
        u64::from(current_page.saturating_sub(1)) * u64::from(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total_count: u64, current_page: u32, page_size: u32) -> Page<()> {
        Page::new(vec![], total_count, current_page, page_size)
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(page(0, 1, 10).total_pages(), 0);
        assert_eq!(page(1, 1, 10).total_pages(), 1);
        assert_eq!(page(10, 1, 10).total_pages(), 1);
        assert_eq!(page(11, 1, 10).total_pages(), 2);
        assert_eq!(page(41, 1, 20).total_pages(), 3);
        assert_eq!(page(7, 1, 1).total_pages(), 7);
    }

    #[test]
    fn test_total_pages_matches_formula_for_ranges() {
        for total in 0..=60u64 {
            for size in 1..=20u32 {
                let expected = ((total as f64) / (size as f64)).ceil() as u32;
                assert_eq!(page(total, 1, size).total_pages(), expected);
            }
        }
    }

    #[test]
    fn test_navigation_flags() {
        let first = page(25, 1, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = page(25, 2, 10);
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = page(25, 3, 10);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_collection_has_no_neighbours() {
        let empty = page(0, 1, 10);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_page_past_the_end() {
        let beyond = page(5, 4, 10);
        assert!(beyond.has_previous());
        assert!(!beyond.has_next());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::<()>::offset(1, 10), 0);
        assert_eq!(Page::<()>::offset(3, 20), 40);
    }
}
