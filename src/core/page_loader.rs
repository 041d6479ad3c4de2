use crate::api::models::{Artwork, Page};
use crate::core::source::{PAGE_SIZE, PageSource};
use crate::error::FetchError;

/// The page currently held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub page_index: usize,
    pub records: Vec<Artwork>,
    pub total_records: u64,
}

impl PageState {
    /// Replace the held page with a freshly fetched one
    pub fn apply(&mut self, page_index: usize, page: Page) {
        self.page_index = page_index;
        self.records = page.records;
        self.total_records = page.total_records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads one page at a time from a [`PageSource`] and keeps the last good one.
///
/// `load` borrows the loader mutably for the whole request, so there is no
/// loading flag to observe here. The controller reports one in
/// `TableSnapshot::loading`; one-shot CLI commands show a spinner instead.
pub struct PageLoader<'a> {
    source: &'a dyn PageSource,
    state: PageState,
}

impl<'a> PageLoader<'a> {
    pub fn new(source: &'a dyn PageSource) -> Self {
        Self {
            source,
            state: PageState::default(),
        }
    }

    /// Fetch `page_index` and make it the current page.
    ///
    /// On failure the error is logged and returned, and the previously held
    /// page (empty before the first success) stays in place.
    pub async fn load(&mut self, page_index: usize) -> Result<&PageState, FetchError> {
        match self.source.fetch_page(page_index, PAGE_SIZE).await {
            Ok(page) => {
                log::debug!(
                    "Loaded page {} ({} records, {} total)",
                    page_index,
                    page.len(),
                    page.total_records
                );
                self.state.apply(page_index, page);
                Ok(&self.state)
            }
            Err(e) => {
                log::error!("Fetching error: {} ({})", e, e.endpoint());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockSource;

    #[tokio::test]
    async fn test_load_requests_page_with_fixed_size() {
        let source = MockSource::new(100);
        let mut loader = PageLoader::new(&source);

        let state = loader.load(3).await.expect("load failed");
        assert_eq!(state.page_index, 3);
        assert_eq!(state.total_records, 100);
        assert_eq!(state.len(), 12);
        assert_eq!(state.records[0].id, 37);

        assert_eq!(source.calls(), vec![(3, PAGE_SIZE)]);
    }

    #[tokio::test]
    async fn test_load_stores_exactly_returned_records() {
        let source = MockSource::new(100);
        let mut loader = PageLoader::new(&source);

        loader.load(8).await.expect("load failed");
        assert_eq!(loader.state().records, source.page(8, PAGE_SIZE).records);
        assert_eq!(loader.state().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_page() {
        let source = MockSource::new(100).failing_on(1);
        let mut loader = PageLoader::new(&source);

        loader.load(0).await.expect("first load failed");
        let before = loader.state().clone();

        let result = loader.load(1).await;
        assert!(result.is_err());
        assert_eq!(loader.state(), &before);
    }

    #[tokio::test]
    async fn test_failed_first_load_leaves_empty_state() {
        let source = MockSource::new(100).failing_on(0);
        let mut loader = PageLoader::new(&source);

        assert!(loader.load(0).await.is_err());
        assert!(loader.state().is_empty());
        assert_eq!(loader.state().total_records, 0);
    }
}
