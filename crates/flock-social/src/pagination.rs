use flock_types::models::Page;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized page-number request: `page >= 1`, `1 <= size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Wrap one page of `results` out of `count` total items.
    /// Past the end, `previous` points at the last non-empty page.
    pub fn into_page<T>(self, count: u64, results: Vec<T>) -> Page<T> {
        let size = u64::from(self.size);
        let last_page = count.div_ceil(size).max(1);
        let page = u64::from(self.page);

        let next = (page * size < count).then(|| self.page + 1);
        let previous = (page > 1).then(|| page.saturating_sub(1).min(last_page) as u32);

        Page {
            count,
            next,
            previous,
            results,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_bounds() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.size(), 1);
        assert_eq!(PageRequest::new(2, 10_000).size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn links_for_middle_and_last_pages() {
        let middle = PageRequest::new(2, 10).into_page(25, vec![0; 10]);
        assert_eq!(middle.next, Some(3));
        assert_eq!(middle.previous, Some(1));

        let last = PageRequest::new(3, 10).into_page(25, vec![0; 5]);
        assert_eq!(last.next, None);
        assert_eq!(last.previous, Some(2));
    }

    #[test]
    fn past_the_end_points_back_to_last_page() {
        let page = PageRequest::new(9, 10).into_page::<u8>(25, vec![]);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, Some(3));
    }

    #[test]
    fn empty_listing_has_no_links() {
        let page = PageRequest::first().into_page::<u8>(0, vec![]);
        assert_eq!(page.count, 0);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }
}
