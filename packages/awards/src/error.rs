//! Error types for the awards scraper.
//!
//! Every failure is fatal for the run: errors bubble up to `main`, which
//! prints them and exits non-zero.

use thiserror::Error;

/// Main error type for the awards scraper.
#[derive(Debug, Error)]
pub enum AwardsError {
    /// Invalid IMDb event ID format.
    #[error("Invalid event ID format: '{0}'. Expected evXXXXXXX (e.g., ev0000003)")]
    InvalidEventId(String),

    /// Year label is neither `YYYY` nor `YYYY-N`.
    #[error("Invalid year label: '{0}'. Expected YYYY or YYYY-N (e.g., 2024, 1930-2)")]
    InvalidYearLabel(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The page did not contain the embedded Next.js payload.
    #[error("No embedded page data found at {url}")]
    MissingPageData { url: String },

    /// A key expected in the page payload was absent.
    #[error("Missing key '{key}' in {context}")]
    MissingKey { key: String, context: String },

    /// JSON decoding failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML processing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A stored YAML file did not have the expected shape.
    #[error("Unexpected YAML structure in {path}: {message}")]
    YamlShape { path: String, message: String },

    /// Git command failed.
    #[error("Git error: {message}{}", if .stderr.is_empty() { String::new() } else { format!(" ({})", .stderr.trim()) })]
    Git { message: String, stderr: String },

    /// The README does not contain the event listing marker.
    #[error("Marker line '{marker}' not found in {path}")]
    MissingMarker { marker: String, path: String },
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AwardsError>;
