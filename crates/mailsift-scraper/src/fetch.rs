//! Single-shot HTTP page fetcher.

use std::time::Duration;

use reqwest::Client;

use mailsift_core::{AppConfig, Target};

use crate::error::ScraperError;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,*/*;q=0.8";

/// Transport settings for [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// When `true`, TLS certificates are not verified. This lets the fetcher
    /// read sites with expired or self-signed certificates at the cost of
    /// exposing the request to interception. Off by default.
    pub accept_invalid_certs: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: mailsift_core::config::DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: mailsift_core::config::DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.fetch_timeout_secs,
            user_agent: config.user_agent.clone(),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Raw response of one page fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub body: String,
}

/// Issues exactly one GET per call, with no retries.
pub struct PageFetcher {
    client: Client,
    timeout_secs: u64,
}

impl PageFetcher {
    /// Builds the underlying `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Client`] if the client cannot be constructed
    /// (e.g., the TLS backend fails to initialize).
    pub fn new(options: &FetchOptions) -> Result<Self, ScraperError> {
        if options.accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is disabled for page fetches; responses may be intercepted"
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(options.user_agent.as_str())
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(ScraperError::Client)?;

        Ok(Self {
            client,
            timeout_secs: options.timeout_secs,
        })
    }

    /// Fetches the body of `target`.
    ///
    /// Non-2xx responses are not treated as failures: their body is returned
    /// as-is with the status recorded in [`FetchResult::status`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Unreachable`] when the URL does not parse, its
    /// scheme is not HTTP(S), or the request fails at the transport level
    /// (DNS, connect, TLS, timeout, truncated body).
    pub async fn fetch(&self, target: &Target) -> Result<FetchResult, ScraperError> {
        let url = target.as_str();
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::Unreachable {
            url: url.to_owned(),
            reason: format!("invalid URL: {e}"),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::Unreachable {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| self.unreachable(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                url,
                status = status.as_u16(),
                "non-success status; scanning body anyway"
            );
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.unreachable(url, &e))?;

        Ok(FetchResult {
            status: status.as_u16(),
            body,
        })
    }

    fn unreachable(&self, url: &str, err: &reqwest::Error) -> ScraperError {
        let reason = if err.is_timeout() {
            format!("request timed out after {}s", self.timeout_secs)
        } else {
            describe_error_chain(err)
        };
        ScraperError::Unreachable {
            url: url.to_owned(),
            reason,
        }
    }
}

/// Joins an error and its `source()` chain into one line. reqwest's top-level
/// message alone ("error sending request") hides the DNS/connect cause.
fn describe_error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
