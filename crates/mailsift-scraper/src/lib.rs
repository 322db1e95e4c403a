pub mod batch;
pub mod email;
pub mod error;
pub mod fetch;
pub mod text;

pub use batch::BatchProcessor;
pub use email::extract_emails;
pub use error::ScraperError;
pub use fetch::{FetchOptions, FetchResult, PageFetcher};
pub use text::extract_text;
