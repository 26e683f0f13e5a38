//! Tabular export of completed items.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::scorer::Classification;

use super::item::BatchItem;

pub const CSV_HEADER: &str = "URL,Risk Score,Classification,Processing Time (s)";

/// One exported row; only completed items produce rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub url: String,
    pub risk_score: u8,
    pub classification: Classification,
    pub elapsed_secs: f64,
}

/// Rows for every completed item, in batch order. Other states are skipped.
pub fn completed_rows(items: &[BatchItem]) -> Vec<ExportRow> {
    items
        .iter()
        .filter_map(|item| {
            let result = item.result()?;
            Some(ExportRow {
                url: item.url().to_string(),
                risk_score: result.risk_score(),
                classification: result.classification(),
                elapsed_secs: item.elapsed_secs().unwrap_or(0.0),
            })
        })
        .collect()
}

/// Wraps a field in double quotes, doubling any quotes inside it.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders rows as CSV with [`CSV_HEADER`]. URLs are always quoted.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{:.2}",
            quote(&row.url),
            row.risk_score,
            row.classification,
            row.elapsed_secs
        ));
    }
    out.push('\n');
    out
}

/// Writes rows as CSV to `path`.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    fs::write(path, to_csv(rows)).with_context(|| format!("write export: {}", path.display()))?;
    tracing::info!(rows = rows.len(), path = %path.display(), "exported completed items");
    Ok(())
}

/// `phishing_analysis_<date>.csv` for the given day.
pub fn export_filename_for(date: NaiveDate) -> String {
    format!("phishing_analysis_{}.csv", date.format("%Y-%m-%d"))
}

/// Export file name for today (UTC).
pub fn default_export_filename() -> String {
    export_filename_for(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::item::ItemState;
    use crate::scorer::AnalysisResult;

    fn completed(url: &str, score: u8, secs: f64) -> BatchItem {
        let mut item = BatchItem::pending(url.into());
        item.set_state(ItemState::Completed {
            result: AnalysisResult::new(url, score, vec![]),
            elapsed_secs: secs,
        });
        item
    }

    #[test]
    fn only_completed_items_exported() {
        let mut errored = BatchItem::pending("https://err.example".into());
        errored.set_state(ItemState::Errored {
            error: "x".into(),
            elapsed_secs: 1.0,
        });
        let items = vec![
            completed("https://a.example", 10, 1.234),
            BatchItem::pending("https://p.example".into()),
            errored,
            completed("http://bit.ly/fake-link", 80, 2.0),
        ];
        let rows = completed_rows(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://a.example");
        assert_eq!(rows[1].classification, Classification::Dangerous);
    }

    #[test]
    fn csv_layout() {
        let rows = completed_rows(&[completed("https://a.example/x,y", 45, 1.236)]);
        assert_eq!(
            to_csv(&rows),
            "URL,Risk Score,Classification,Processing Time (s)\n\"https://a.example/x,y\",45,suspicious,1.24\n"
        );
    }

    #[test]
    fn quotes_doubled() {
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn header_only_when_nothing_completed() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn filename_uses_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename_for(date), "phishing_analysis_2024-03-09.csv");
    }

    #[test]
    fn write_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = completed_rows(&[completed("https://a.example", 5, 0.5)]);
        write_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(CSV_HEADER));
        assert!(text.contains("\"https://a.example\",5,safe,0.50"));
    }
}
