pub mod error;
pub mod output_dir;
pub mod xlsx;

pub use error::ExportError;
pub use output_dir::OutputDir;
pub use xlsx::{export_filename, export_records, export_records_at, spreadsheet_rows, SpreadsheetRow};
