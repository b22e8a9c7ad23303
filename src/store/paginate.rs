//! Page slicing for listing views

use serde::Serialize;

/// Splits a list into fixed-size pages
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
}

/// One page of a [`Paginator`]
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// 1-based page number
    pub number: usize,
    pub num_pages: usize,
    /// Total item count across all pages
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
    pub items: Vec<T>,
}

impl<T: Clone> Paginator<T> {
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Always at least one, even with no items
    pub fn num_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Page for a raw page parameter
    ///
    /// A missing or non-numeric value gives the first page; a number outside
    /// `1..=num_pages` gives the last page.
    pub fn page(&self, number: Option<&str>) -> Page<T> {
        let num_pages = self.num_pages();
        let number = match number.map(|n| n.trim().parse::<i64>()) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 || n as usize > num_pages => num_pages,
            Some(Ok(n)) => n as usize,
        };
        self.page_number(number)
    }

    /// Page by number, clamped into range
    pub fn page_number(&self, number: usize) -> Page<T> {
        let num_pages = self.num_pages();
        let number = number.clamp(1, num_pages);
        let start = (number - 1) * self.per_page;
        let end = (start + self.per_page).min(self.items.len());
        let items = self.items.get(start..end).unwrap_or_default().to_vec();

        Page {
            number,
            num_pages,
            count: self.items.len(),
            has_next: number < num_pages,
            has_previous: number > 1,
            next_page_number: (number < num_pages).then_some(number + 1),
            previous_page_number: (number > 1).then(|| number - 1),
            items,
        }
    }

    /// Every page in order
    pub fn pages(&self) -> Vec<Page<T>> {
        (1..=self.num_pages()).map(|n| self.page_number(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> Paginator<u32> {
        Paginator::new((1..=9).collect(), 4)
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(paginator().num_pages(), 3);
        assert_eq!(Paginator::<u32>::new(Vec::new(), 4).num_pages(), 1);
        assert_eq!(Paginator::new(vec![1, 2, 3, 4], 4).num_pages(), 1);
    }

    #[test]
    fn test_page_slices() {
        let p = paginator();
        assert_eq!(p.page(Some("1")).items, vec![1, 2, 3, 4]);
        let last = p.page(Some("3"));
        assert_eq!(last.items, vec![9]);
        assert!(!last.has_next);
        assert!(last.has_previous);
        assert_eq!(last.previous_page_number, Some(2));
    }

    #[test]
    fn test_missing_or_invalid_number_gives_first_page() {
        let p = paginator();
        assert_eq!(p.page(None).number, 1);
        assert_eq!(p.page(Some("abc")).number, 1);
    }

    #[test]
    fn test_out_of_range_gives_last_page() {
        let p = paginator();
        assert_eq!(p.page(Some("99")).number, 3);
        assert_eq!(p.page(Some("0")).number, 3);
        assert_eq!(p.page(Some("-2")).number, 3);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let page = Paginator::<u32>::new(Vec::new(), 2).page(Some("5"));
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next && !page.has_previous);
    }

    #[test]
    fn test_pages() {
        let pages = paginator().pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].items, vec![5, 6, 7, 8]);
        assert_eq!(pages[1].next_page_number, Some(3));
    }
}
