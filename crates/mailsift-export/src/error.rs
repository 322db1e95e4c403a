use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No results to export")]
    NothingToExport,

    #[error("file not found: {filename}")]
    NotFound { filename: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
