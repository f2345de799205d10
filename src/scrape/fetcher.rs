//! HTTP fetcher for the archive page
//!
//! The page is fetched once per run. Any failure here is fatal: without
//! the page there is nothing to import.

use crate::config::FetchConfig;
use crate::ChefError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Example
///
/// ```no_run
/// use toybox_chef::config::FetchConfig;
/// use toybox_chef::scrape::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the archive page body
///
/// # Returns
///
/// * `Ok(String)` - The page HTML
/// * `Err(ChefError::Http)` - The request failed (connection, timeout, body)
/// * `Err(ChefError::HttpStatus)` - The server answered with a non-2xx status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ChefError> {
    tracing::info!("Fetching archive page: {}", url);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            tracing::error!("Request timeout for {}", url);
        } else if e.is_connect() {
            tracing::error!("Connection refused for {}", url);
        }
        ChefError::Http {
            url: url.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChefError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| ChefError::Http {
        url: url.to_string(),
        source: e,
    })?;

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
