//! Aggregate Reporting
//!
//! The two ways results leave the pipeline: a text table for an interactive
//! terminal, and a JSON debug dump written to disk for standalone runs.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::aggregator::ArticleAggregate;

/// Default file for the debug dump
pub const DEFAULT_DUMP_PATH: &str = "attestations.json";

/// Widest article column in the table before URLs are truncated
const MAX_ARTICLE_WIDTH: usize = 60;

/// Errors that can occur while writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize aggregates to pretty JSON
pub fn to_json(aggregates: &[ArticleAggregate]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(aggregates)
}

/// Deserialize aggregates from JSON
pub fn from_json(json: &str) -> Result<Vec<ArticleAggregate>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Expand ~ to home directory in path
pub fn expand_path(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Write the aggregates as JSON to a local file
///
/// # Returns
/// The path written to, after `~` expansion
pub fn write_debug_dump(path: &str, aggregates: &[ArticleAggregate]) -> Result<PathBuf, ReportError> {
    let path = PathBuf::from(expand_path(path));
    let json = to_json(aggregates)?;

    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&path, json).map_err(io_err)?;

    info!("Wrote {} article aggregates to {}", aggregates.len(), path.display());
    Ok(path)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Render aggregates as a fixed-width text table
pub fn render_table(aggregates: &[ArticleAggregate]) -> String {
    if aggregates.is_empty() {
        return "No attestations found.\n".to_string();
    }

    let width = aggregates
        .iter()
        .map(|a| a.article_page.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Article".len(), MAX_ARTICLE_WIDTH);

    let mut out = format!(
        "{:<width$}  {:>8}  {:>8}  {:>6}\n",
        "Article", "Positive", "Negative", "Total"
    );
    out.push_str(&format!("{}\n", "-".repeat(width + 30)));
    for a in aggregates {
        out.push_str(&format!(
            "{:<width$}  {:>8}  {:>8}  {:>6}\n",
            truncate(&a.article_page, width),
            a.positive_feedback,
            a.negative_feedback,
            a.transaction_count
        ));
    }
    out
}
