//! Input validation utilities

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Convert a one-based page number typed by the user into a page index
pub fn page_number_to_index(page_number: usize) -> crate::Result<usize> {
    page_number
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidArguments("Page numbers start at 1".to_string()).into())
}
