//! HTTP client for the World Athletics certification list page.

use std::future::Future;
use std::time::Duration;

use devshoes_core::AppConfig;
use reqwest::Client;

use crate::error::ScraperError;

/// Anything that can produce the raw certification page.
///
/// [`CertCheckClient`] is the production implementation; tests substitute a
/// fixed string.
pub trait PageSource {
    /// Returns the page HTML as text.
    fn fetch_page(&self) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// Fetches the certification list page over HTTP.
///
/// One GET per call. Non-2xx responses become [`ScraperError::UnexpectedStatus`];
/// nothing is retried or cached.
pub struct CertCheckClient {
    client: Client,
    url: String,
}

impl CertCheckClient {
    /// Creates a client for `url` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`CertCheckClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.catalog.data_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network, TLS or body decoding failure.
    pub async fn fetch_html(&self) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url = %self.url, bytes = body.len(), "fetched certification page");
        Ok(body)
    }
}

impl PageSource for CertCheckClient {
    fn fetch_page(&self) -> impl Future<Output = Result<String, ScraperError>> + Send {
        self.fetch_html()
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
