//! Caller-supplied URL normalization.

use crate::CoreError;

/// A URL that is guaranteed to carry an explicit `http://` or `https://` scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    /// Trims `raw` and prepends `http://` when no HTTP(S) scheme is present.
    ///
    /// The scheme check is case-sensitive: `HTTP://x` does not count as a
    /// scheme and becomes `http://HTTP://x`, which later fails to fetch.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] when `raw` is empty or whitespace.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("URL is required".to_string()));
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(Self(trimmed.to_string()))
        } else {
            Ok(Self(format!("http://{trimmed}")))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
