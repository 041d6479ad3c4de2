use crate::api::client::ArtworksClient;
use crate::api::models::Page;
use crate::error::FetchError;
use async_trait::async_trait;

/// Number of records per page. The table never changes it.
pub const PAGE_SIZE: usize = 12;

/// Anything that can hand out one page of artworks at a time.
///
/// `page_index` is zero-based here; implementations translate it to
/// whatever numbering the remote side uses.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page_index: usize, page_size: usize) -> Result<Page, FetchError>;
}

#[async_trait]
impl PageSource for ArtworksClient {
    async fn fetch_page(&self, page_index: usize, page_size: usize) -> Result<Page, FetchError> {
        self.list_artworks(page_index as u64 + 1, page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_source_uses_one_based_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/artworks"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pagination": { "total": 1 },
                "data": [{ "id": 5, "title": "Only" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ArtworksClient::new(server.uri()).expect("client creation failed");
        let source: &dyn PageSource = &client;
        let page = source.fetch_page(0, PAGE_SIZE).await.expect("fetch failed");

        assert_eq!(page.total_records, 1);
        assert_eq!(page.records[0].id, 5);
    }
}
