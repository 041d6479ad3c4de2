use crate::api::models::{ArtworksResponse, Page};
use crate::error::FetchError;
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("artwork-table/", env!("CARGO_PKG_VERSION"));
const ARTWORKS_ENDPOINT: &str = "/artworks";

#[derive(Debug, Clone)]
pub struct ArtworksClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
}

impl ArtworksClient {
    // Create client with default settings
    pub fn new(base_url: String) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(ArtworksClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Fetch one page of artworks.
    ///
    /// `page_number` is one-based, as the remote API counts pages.
    pub async fn list_artworks(&self, page_number: u64, limit: usize) -> Result<Page, FetchError> {
        let endpoint = format!("{}?page={}&limit={}", ARTWORKS_ENDPOINT, page_number, limit);

        let response = self
            .build_request(Method::GET, ARTWORKS_ENDPOINT)
            .query(&[("page", page_number.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| convert_request_error(e, &endpoint, self.timeout_secs))?;

        let status = response.status();

        if status.is_success() {
            let body: ArtworksResponse = response
                .json()
                .await
                .map_err(|e| convert_json_error(e, &endpoint))?;
            Ok(Page::from(body))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                408 | 504 => Err(FetchError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint,
                }),
                _ => Err(FetchError::Http {
                    status: status.as_u16(),
                    endpoint,
                    message: error_text,
                }),
            }
        }
    }
}
