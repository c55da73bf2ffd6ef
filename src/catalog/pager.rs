/// Number of records rendered per page.
pub const PAGE_SIZE: usize = 12;

/// Tracks the next page boundary over the active subset.
///
/// Knows nothing about rendering; the caller decides what to do with a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    /// 1-based index of the next page to take.
    next_page_index: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            page_size: PAGE_SIZE,
            next_page_index: 1,
        }
    }

    pub fn reset(&mut self) {
        self.next_page_index = 1;
    }

    pub fn next_page_index(&self) -> usize {
        self.next_page_index
    }

    /// Whether another page can be taken from a subset of `active_len` records.
    ///
    /// An empty subset always reports `true` so the first render attempt can
    /// surface the "no products" notice.
    pub fn has_more(&self, active_len: usize) -> bool {
        if active_len == 0 {
            return true;
        }
        self.consumed() < active_len
    }

    /// Slice out the next page (clipped, possibly empty) and advance.
    pub fn take_page<'a, T>(&mut self, active: &'a [T]) -> &'a [T] {
        let start = self.consumed().min(active.len());
        let end = start.saturating_add(self.page_size).min(active.len());
        self.next_page_index += 1;
        &active[start..end]
    }

    fn consumed(&self) -> usize {
        (self.next_page_index - 1).saturating_mul(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_new_pager_starts_at_first_page() {
        let pager = Pager::new();
        assert_eq!(pager.next_page_index(), 1);
        assert_eq!(pager.page_size, PAGE_SIZE);
    }

    #[test]
    fn test_fourteen_records_split_twelve_then_two() {
        let items: Vec<u32> = (0..14).collect();
        let mut pager = Pager::new();

        assert!(pager.has_more(items.len()));
        assert_eq!(pager.take_page(&items), &items[0..12]);
        assert!(pager.has_more(items.len()));
        assert_eq!(pager.take_page(&items), &items[12..14]);
        assert!(!pager.has_more(items.len()));
    }

    #[test]
    fn test_take_page_past_end_is_empty() {
        let items = [1, 2, 3];
        let mut pager = Pager::new();
        assert_eq!(pager.take_page(&items).len(), 3);
        assert!(pager.take_page(&items).is_empty());
        assert_eq!(pager.next_page_index(), 3);
    }

    #[test]
    fn test_empty_subset_always_has_more() {
        let mut pager = Pager::new();
        let empty: [u8; 0] = [];
        assert!(pager.has_more(0));
        assert!(pager.take_page(&empty).is_empty());
        assert!(pager.has_more(0));
    }

    #[test]
    fn test_exact_multiple_exhausts() {
        let items: Vec<u32> = (0..24).collect();
        let mut pager = Pager::new();
        pager.take_page(&items);
        pager.take_page(&items);
        assert!(!pager.has_more(items.len()));
    }

    #[test]
    fn test_reset_rewinds_to_first_page() {
        let items: Vec<u32> = (0..30).collect();
        let mut pager = Pager::new();
        pager.take_page(&items);
        pager.take_page(&items);
        pager.reset();
        assert_eq!(pager.next_page_index(), 1);
        assert_eq!(pager.take_page(&items)[0], 0);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_subset_exactly_once(len in 1usize..200) {
            let items: Vec<usize> = (0..len).collect();
            let mut pager = Pager::new();
            let mut seen = Vec::new();
            while pager.has_more(items.len()) {
                let page = pager.take_page(&items);
                prop_assert!(!page.is_empty());
                prop_assert!(page.len() <= PAGE_SIZE);
                seen.extend_from_slice(page);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
