//! Presentation of a finished research run: terminal Markdown, JSON, and CSV export.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::markdown::{sanitize_heading, table};
use crate::research::table::{COLUMNS, ResultRow, ResultTable};
use crate::research::ResearchReport;

pub const NO_RESULTS: &str = "No results found with given filters.";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Serialized view of a row. Field names match `COLUMNS`.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Keyword")]
    keyword: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "Views")]
    views: u64,
    #[serde(rename = "Subscribers")]
    subscribers: u64,
    #[serde(rename = "Likes")]
    likes: u64,
    #[serde(rename = "Comments")]
    comments: u64,
    #[serde(rename = "Publish Date")]
    publish_date: &'a str,
    #[serde(rename = "Channel Name")]
    channel_name: &'a str,
    #[serde(rename = "Channel URL")]
    channel_url: String,
}

impl<'a> From<&'a ResultRow> for ExportRow<'a> {
    fn from(row: &'a ResultRow) -> Self {
        Self {
            keyword: &row.keyword,
            title: &row.title,
            description: row.display_description(),
            url: row.url(),
            views: row.views,
            subscribers: row.subscribers,
            likes: row.likes,
            comments: row.comments,
            publish_date: row.publish_date(),
            channel_name: &row.channel_name,
            channel_url: row.channel_url(),
        }
    }
}

/// Write the header row followed by one record per result row.
/// An empty table still produces the header.
pub fn write_csv<W: io::Write>(table: &ResultTable, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in table.rows() {
        wtr.serialize(ExportRow::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

/// JSON array of objects keyed by column name, in column order.
pub fn to_json(table: &ResultTable) -> Result<String, ExportError> {
    let rows: Vec<ExportRow<'_>> = table.rows().iter().map(ExportRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Human-readable report for the terminal.
pub fn format_report(report: &ResearchReport, keywords: &[String]) -> String {
    let searched: Vec<&str> = keywords.iter().map(|k| k.trim()).collect();
    let mut out = format!(
        "# Niche research: {}\n\n",
        sanitize_heading(&searched.join(", "))
    );

    if report.table.is_empty() {
        out.push_str(NO_RESULTS);
        out.push_str("\n\n");
    } else {
        out.push_str(&format!(
            "{} result(s) from {} of {} keyword(s)\n\n",
            report.table.len(),
            report.table.keywords().len(),
            searched.len()
        ));
        out.push_str(&table(
            report.table.columns(),
            report.table.rows().iter().map(ResultRow::cells),
        ));
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str("## Skipped keywords\n\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
        out.push('\n');
    }

    out
}
