//! HTTP client wrapping reqwest.
//!
//! One GET per run. No retries; the timeout comes from configuration.

use crate::error::{ScrapeError, ScrapeResult};
use std::time::Duration;

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client used to download the exchange-rate page.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a client with the given request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("cadeca-rates/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET request.
    ///
    /// The body is returned whatever the status code; a non-2xx page is only
    /// logged and will usually fail later at container lookup.
    pub async fn fetch(&self, url: &str) -> ScrapeResult<Page> {
        tracing::debug!(url, "fetching page");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?;

        let status = resp.status().as_u16();
        if resp.url().as_str() != url {
            tracing::debug!(url, final_url = %resp.url(), "followed redirect");
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?
            .to_vec();

        let page = Page { status, body };

        if page.is_success() {
            tracing::debug!(status, bytes = page.body.len(), "page fetched");
        } else {
            tracing::debug!(status, url, "non-success status, processing body anyway");
        }

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_success_range() {
        let mut page = Page {
            status: 200,
            body: Vec::new(),
        };
        assert!(page.is_success());
        page.status = 404;
        assert!(!page.is_success());
        page.status = 302;
        assert!(!page.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = PageFetcher::new(2000);
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch(_)));
    }
}
