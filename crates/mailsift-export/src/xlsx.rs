//! Styled `.xlsx` serialization of scrape records.

use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, XlsxError};

use mailsift_core::ScrapeRecord;

use crate::error::ExportError;
use crate::output_dir::OutputDir;

const SHEET_NAME: &str = "Emails";
const HEADERS: [&str; 2] = ["URL", "Email"];
const HEADER_FILL: u32 = 0x0044_72C4;
const COLUMN_WIDTH: f64 = 40.0;
const EMAIL_SEPARATOR: &str = "; ";

/// One data row of the export: the page URL and its joined email list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRow {
    pub url: String,
    pub emails: String,
}

/// Maps records to data rows: failed records are dropped and each successful
/// record becomes exactly one row with its emails joined by `"; "`.
#[must_use]
pub fn spreadsheet_rows(records: &[ScrapeRecord]) -> Vec<SpreadsheetRow> {
    records
        .iter()
        .filter(|r| r.success)
        .map(|r| SpreadsheetRow {
            url: r.url.clone(),
            emails: r.emails.join(EMAIL_SEPARATOR),
        })
        .collect()
}

/// Writes `records` to a new timestamped workbook in `dir` and returns the
/// bare file name.
///
/// # Errors
///
/// - [`ExportError::NothingToExport`]: `records` is empty; no file is created.
/// - [`ExportError::Xlsx`]: the workbook could not be built or saved.
pub fn export_records(dir: &OutputDir, records: &[ScrapeRecord]) -> Result<String, ExportError> {
    export_records_at(dir, records, Local::now().naive_local())
}

/// Same as [`export_records`] with an explicit timestamp for the file name.
///
/// # Errors
///
/// See [`export_records`].
pub fn export_records_at(
    dir: &OutputDir,
    records: &[ScrapeRecord],
    timestamp: NaiveDateTime,
) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let rows = spreadsheet_rows(records);
    let filename = export_filename(timestamp);
    let path = dir.path().join(&filename);

    let mut workbook = build_workbook(&rows)?;
    workbook.save(&path)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        rows = rows.len(),
        "exported spreadsheet"
    );
    Ok(filename)
}

/// `scraper_results_<YYYYMMDD>_<HHMMSS>.xlsx`
#[must_use]
pub fn export_filename(timestamp: NaiveDateTime) -> String {
    timestamp
        .format("scraper_results_%Y%m%d_%H%M%S.xlsx")
        .to_string()
}

/// Bold white text on a solid blue fill, centered both ways.
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn build_workbook(rows: &[SpreadsheetRow]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = header_format();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header_format)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        sheet.write_string(row_num, 0, &row.url)?;
        if !row.emails.is_empty() {
            sheet.write_string(row_num, 1, &row.emails)?;
        }
    }

    Ok(workbook)
}
