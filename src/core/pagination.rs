//! Pagination state for the paged listing.

/// Current page and total pages of the paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total pages as last reported by the API (at least 1).
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Controls are only shown when there is more than one page.
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Back to page 1 (new query or category).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clamp a requested page into `[1, total_pages]`.
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(1, self.total_pages.max(1))
    }

    /// Move to `requested` (clamped). Returns the new page if it changed.
    pub fn request(&mut self, requested: u32) -> Option<u32> {
        let target = self.clamp(requested);
        if target == self.page {
            return None;
        }
        self.page = target;
        Some(target)
    }

    /// Record the page and total reported by a completed fetch.
    pub fn update_from_response(&mut self, page: u32, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page = page.clamp(1, self.total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(total: u32) -> Pagination {
        let mut p = Pagination::default();
        p.update_from_response(1, total);
        p
    }

    #[test]
    fn test_request_in_range() {
        let mut p = with_total(5);
        assert_eq!(p.request(3), Some(3));
        assert_eq!(p.page(), 3);
        assert_eq!(p.request(5), Some(5));
    }

    #[test]
    fn test_request_out_of_range_is_clamped() {
        let mut p = with_total(5);
        assert_eq!(p.request(0), None);
        assert_eq!(p.page(), 1);

        assert_eq!(p.request(6), Some(5));
        assert_eq!(p.request(6), None);
        assert_eq!(p.page(), 5);
    }

    #[test]
    fn test_controls_visibility() {
        assert!(!with_total(1).has_controls());
        assert!(!with_total(0).has_controls());
        let p = with_total(5);
        assert!(p.has_controls());
        assert!(!p.has_previous());
        assert!(p.has_next());
    }

    #[test]
    fn test_reset() {
        let mut p = with_total(5);
        p.request(4);
        p.reset();
        assert_eq!(p.page(), 1);
        assert_eq!(p.total_pages(), 1);
    }
}
