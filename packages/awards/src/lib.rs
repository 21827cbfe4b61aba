//! IMDb Awards - Scrape award nominations and winners from IMDb events.
//!
//! This crate downloads the award history of a fixed list of IMDb events,
//! stores it as one YAML file per event, keeps a validation catalogue of
//! every award and category name seen, and regenerates the README listing.
//!
//! # Example
//!
//! ```
//! use imdb_awards::types::YearLabel;
//!
//! // Second ceremony of 1930
//! let label: YearLabel = "1930-2".parse().unwrap();
//! assert_eq!(label, YearLabel::new(1930, 2));
//! assert_eq!(label.to_string(), "1930-2");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, URL builders, run options and file layout
//! - [`types`]: Core data types (YearLabel, CategoryRecord, EventYears, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client, throttling and embedded page data extraction
//! - [`imdb`]: IMDb page parsing behind the `AwardsSource` trait
//! - [`merge`]: Reuse of saved editions vs. fetching fresh ones
//! - [`catalogue`]: Validation catalogue of known filter names
//! - [`summary`]: Year range summaries for catalogue comments
//! - [`yaml`]: YAML output and loading
//! - [`readme`]: README regeneration on data changes
//! - [`scrape`]: The full scraping run
//! - [`cli`]: Command-line interface

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod imdb;
pub mod merge;
pub mod readme;
pub mod scrape;
pub mod summary;
pub mod types;
pub mod yaml;

// Re-export main functions
pub use scrape::run_scrape;

// Re-export commonly used items
pub use config::{validate_event_id, Layout, RunOptions};
pub use error::{AwardsError, Result};
pub use types::{CategoryRecord, EventYears, YearLabel};
