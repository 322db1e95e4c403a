use serde::{Deserialize, Serialize};

/// Outcome of scraping one URL.
///
/// Built by the batch processor and consumed by the spreadsheet exporter. When
/// a record arrives over the wire, missing `emails` and `error` fields fall
/// back to an empty list and `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub url: String,
    pub success: bool,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScrapeRecord {
    #[must_use]
    pub fn succeeded(url: impl Into<String>, emails: Vec<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            emails,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            emails: Vec::new(),
            error: Some(error.into()),
        }
    }
}
