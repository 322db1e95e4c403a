//! `mailsift batch`: scrape a URL list and optionally export it.

use std::path::Path;

use anyhow::Context;

use mailsift_core::ScrapeRecord;
use mailsift_export::OutputDir;
use mailsift_scraper::BatchProcessor;

/// Scrapes `urls` plus any entries from `file`, printing one summary line per
/// record. When `output` is set the records are also exported there.
pub(crate) async fn run(
    processor: &BatchProcessor,
    mut urls: Vec<String>,
    file: Option<&Path>,
    output: Option<&OutputDir>,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read URL list {}", path.display()))?;
        let before = urls.len();
        urls.extend(read_url_lines(&contents));
        if urls[before..].iter().all(|u| u.is_empty()) {
            tracing::warn!(path = %path.display(), "URL list file contains no URLs");
        }
    }

    if urls.iter().all(|u| u.trim().is_empty()) {
        anyhow::bail!("no URLs given; pass them as arguments or with --file");
    }

    let records = processor.process(&urls).await;
    for line in summary_lines(&records) {
        println!("{line}");
    }

    if let Some(output) = output {
        tracing::info!(
            records = records.len(),
            dir = %output.path().display(),
            "exporting results"
        );
        let filename = mailsift_export::export_records(output, &records)
            .context("failed to export results")?;
        println!("exported {}", output.path().join(filename).display());
    }

    Ok(())
}

/// Splits a URL list file into entries. Blank lines are kept so the batch
/// processor applies its own skip rule to them.
fn read_url_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(|line| line.trim().to_string())
}

fn summary_lines(records: &[ScrapeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            if record.success {
                if record.emails.is_empty() {
                    format!("ok   {} (no emails)", record.url)
                } else {
                    format!("ok   {} {}", record.url, record.emails.join("; "))
                }
            } else {
                format!(
                    "fail {} {}",
                    record.url,
                    record.error.as_deref().unwrap_or("unknown error")
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsift_scraper::{FetchOptions, PageFetcher};

    const UNREACHABLE: &str = "127.0.0.1:1";

    fn test_processor() -> BatchProcessor {
        let options = FetchOptions {
            timeout_secs: 2,
            ..FetchOptions::default()
        };
        BatchProcessor::new(PageFetcher::new(&options).expect("fetcher"), 1)
    }

    fn xlsx_files(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".xlsx"))
            .collect()
    }

    #[tokio::test]
    async fn run_exports_into_the_given_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let output = OutputDir::init(tmp.path()).unwrap();

        run(&test_processor(), vec![UNREACHABLE.to_string()], None, Some(&output))
            .await
            .expect("batch run");

        let files = xlsx_files(tmp.path());
        assert_eq!(files.len(), 1, "got: {files:?}");
        assert!(files[0].starts_with("scraper_results_"));
    }

    #[tokio::test]
    async fn run_without_output_dir_writes_no_file() {
        let tmp = tempfile::tempdir().unwrap();

        run(&test_processor(), vec![UNREACHABLE.to_string()], None, None)
            .await
            .expect("batch run");

        assert!(xlsx_files(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn run_with_comment_only_file_has_no_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("urls.txt");
        std::fs::write(&list, "# nothing here\n\n").unwrap();

        let err = run(&test_processor(), Vec::new(), Some(&list), None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no URLs given"), "got: {err}");
    }

    #[test]
    fn read_url_lines_skips_comments_and_trims() {
        let lines: Vec<String> = read_url_lines("# list\n a.com \n\nb.com\n").collect();
        assert_eq!(lines, vec!["a.com", "", "b.com"]);
    }

    #[test]
    fn summary_lines_describe_each_outcome() {
        let records = vec![
            ScrapeRecord::succeeded("http://a.com", vec!["x@a.com".into(), "y@a.com".into()]),
            ScrapeRecord::succeeded("http://b.com", vec![]),
            ScrapeRecord::failed("http://c.com", "could not reach http://c.com: refused"),
        ];
        assert_eq!(
            summary_lines(&records),
            vec![
                "ok   http://a.com x@a.com; y@a.com",
                "ok   http://b.com (no emails)",
                "fail http://c.com could not reach http://c.com: refused",
            ]
        );
    }
}
