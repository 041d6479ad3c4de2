use crate::error::{AppError, DisplayError};

/// Position of one page inside the remote record set
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub total_records: u64,
    pub records_on_page: usize,
}

impl PaginationInfo {
    pub fn new(
        page_index: usize,
        page_size: usize,
        total_records: u64,
        records_on_page: usize,
    ) -> Result<Self, AppError> {
        if page_size == 0 {
            return Err(AppError::Display(DisplayError::Pagination(
                "Page size must be greater than 0".to_string(),
            )));
        }

        Ok(Self {
            page_index,
            page_size,
            total_records,
            records_on_page,
        })
    }

    pub fn current_page(&self) -> usize {
        self.page_index + 1
    }

    pub fn total_pages(&self) -> u64 {
        self.total_records.div_ceil(self.page_size as u64).max(1)
    }

    pub fn is_first_page(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        (self.current_page() as u64) >= self.total_pages()
    }

    /// One-based position of the first record on this page
    pub fn start_item(&self) -> u64 {
        (self.page_index as u64) * (self.page_size as u64) + 1
    }

    pub fn end_item(&self) -> u64 {
        self.start_item() + self.records_on_page as u64 - 1
    }

    /// Generate pagination information string
    pub fn summary(&self) -> String {
        if self.total_records == 0 {
            return format!("No records on page {}", self.current_page());
        }
        if self.records_on_page == 0 {
            return format!(
                "No records on page {} of {}",
                self.current_page(),
                self.total_pages()
            );
        }

        format!(
            "Showing {}-{} of {} records (Page {} of {})",
            self.start_item(),
            self.end_item(),
            self.total_records,
            self.current_page(),
            self.total_pages()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let info = PaginationInfo::new(0, 12, 100, 12).expect("valid pagination");
        assert_eq!(info.current_page(), 1);
        assert_eq!(info.total_pages(), 9);
        assert!(info.is_first_page());
        assert!(!info.is_last_page());
        assert_eq!(info.summary(), "Showing 1-12 of 100 records (Page 1 of 9)");
    }

    #[test]
    fn test_last_partial_page() {
        let info = PaginationInfo::new(8, 12, 100, 4).expect("valid pagination");
        assert!(info.is_last_page());
        assert_eq!(info.start_item(), 97);
        assert_eq!(info.end_item(), 100);
        assert_eq!(info.summary(), "Showing 97-100 of 100 records (Page 9 of 9)");
    }

    #[test]
    fn test_empty_source() {
        let info = PaginationInfo::new(0, 12, 0, 0).expect("valid pagination");
        assert_eq!(info.total_pages(), 1);
        assert!(info.is_last_page());
        assert_eq!(info.summary(), "No records on page 1");
    }

    #[test]
    fn test_page_past_the_end() {
        let info = PaginationInfo::new(20, 12, 100, 0).expect("valid pagination");
        assert_eq!(info.summary(), "No records on page 21 of 9");
    }

    #[test]
    fn test_invalid_page_size() {
        assert!(PaginationInfo::new(0, 0, 100, 0).is_err());
    }
}
