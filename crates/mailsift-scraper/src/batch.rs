//! Fetch → extract → match orchestration for one or many URLs.

use futures::stream::{self, StreamExt};

use mailsift_core::{ScrapeRecord, Target};

use crate::email::extract_emails;
use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::text::extract_text;

/// Runs the scrape pipeline over URL lists with per-URL failure isolation.
pub struct BatchProcessor {
    fetcher: PageFetcher,
    max_concurrent: usize,
}

impl BatchProcessor {
    /// `max_concurrent` bounds in-flight fetches; `1` (or `0`) processes
    /// URLs strictly one after another.
    #[must_use]
    pub fn new(fetcher: PageFetcher, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Normalizes `raw` and scrapes it; see [`Self::scrape`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidInput`]: `raw` is empty or blank.
    /// - Anything [`Self::scrape`] returns.
    pub async fn scrape_url(&self, raw: &str) -> Result<Vec<String>, ScraperError> {
        let target = Target::parse(raw)?;
        self.scrape(&target).await
    }

    /// Scrapes a single page and returns the addresses found on it.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Unreachable`]: the page could not be fetched.
    /// - [`ScraperError::ExtractionFailure`]: the parser task died.
    pub async fn scrape(&self, target: &Target) -> Result<Vec<String>, ScraperError> {
        let page = self.fetcher.fetch(target).await?;
        let url = target.to_string();

        // html5ever is CPU-bound on large pages; keep it off the async workers.
        let emails = tokio::task::spawn_blocking(move || extract_emails(&extract_text(&page.body)))
            .await
            .map_err(|e| ScraperError::ExtractionFailure {
                url,
                reason: e.to_string(),
            })?;

        tracing::debug!(url = %target, found = emails.len(), "scraped page");
        Ok(emails)
    }

    /// Scrapes every non-blank entry of `urls`, one record per entry, in input
    /// order.
    ///
    /// Blank entries produce no record at all, whereas every other failure is
    /// captured in a `success = false` record. A failing URL never affects the
    /// others.
    pub async fn process<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ScrapeRecord> {
        let entries: Vec<&str> = urls
            .iter()
            .map(AsRef::as_ref)
            .filter(|raw| {
                let blank = raw.trim().is_empty();
                if blank {
                    tracing::debug!("skipping blank URL entry");
                }
                !blank
            })
            .collect();

        let total = entries.len();
        let pending: Vec<_> = entries.into_iter().map(|raw| self.process_one(raw)).collect();
        let records: Vec<ScrapeRecord> = stream::iter(pending)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let failed = records.iter().filter(|r| !r.success).count();
        tracing::info!(total, failed, "batch scrape finished");
        records
    }

    async fn process_one(&self, raw: &str) -> ScrapeRecord {
        let target = match Target::parse(raw) {
            Ok(target) => target,
            Err(e) => return ScrapeRecord::failed(raw.trim(), e.to_string()),
        };

        match self.scrape(&target).await {
            Ok(emails) => ScrapeRecord::succeeded(target.into_string(), emails),
            Err(e) => {
                tracing::warn!(url = %target, error = %e, "scrape failed; continuing batch");
                ScrapeRecord::failed(target.into_string(), e.to_string())
            }
        }
    }
}
