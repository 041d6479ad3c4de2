//! In-memory page sources shared by the core tests.

use crate::api::models::{Artwork, Page};
use crate::core::source::PageSource;
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn artwork(id: u64) -> Artwork {
    Artwork {
        id,
        title: format!("Artwork {}", id),
        place_of_origin: "France".to_string(),
        artist_display: "Unknown artist".to_string(),
        inscriptions: String::new(),
        date_start: Some(1900),
        date_end: Some(1905),
    }
}

/// Serves `total` artworks with ids `1..=total`, paged like the real API.
pub struct MockSource {
    total: u64,
    fail_on: Option<usize>,
    gates: HashMap<usize, Arc<Notify>>,
    calls: Mutex<Vec<(usize, usize)>>,
}

impl MockSource {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            fail_on: None,
            gates: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests for `page_index` fail with a connection error.
    pub fn failing_on(mut self, page_index: usize) -> Self {
        self.fail_on = Some(page_index);
        self
    }

    /// Requests for `page_index` wait until the returned handle is notified.
    pub fn gated_on(mut self, page_index: usize) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(page_index, Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn page(&self, page_index: usize, page_size: usize) -> Page {
        let start = (page_index * page_size) as u64;
        let end = (start + page_size as u64).min(self.total);
        let records = (start..end).map(|i| artwork(i + 1)).collect();
        Page::new(records, self.total)
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn fetch_page(&self, page_index: usize, page_size: usize) -> Result<Page, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((page_index, page_size));
        }

        if let Some(gate) = self.gates.get(&page_index) {
            gate.notified().await;
        }

        if self.fail_on == Some(page_index) {
            return Err(FetchError::Connection {
                endpoint: format!("/artworks?page={}&limit={}", page_index + 1, page_size),
                message: "connection reset".to_string(),
            });
        }

        Ok(self.page(page_index, page_size))
    }
}
