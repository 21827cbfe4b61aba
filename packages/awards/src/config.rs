//! Configuration constants, URL builders and run options for the scraper.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{AwardsError, Result};
use crate::types::YearLabel;

/// Base URL of the IMDb website.
pub const BASE_URL: &str = "https://www.imdb.com";

/// Public link to the catalogue file, used for README line anchors.
pub const EVENT_GIT_URL: &str =
    "https://github.com/Kometa-Team/IMDb-Awards/blob/master/event_validation.yml";

/// Accept-Language header sent with every request.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// User agent sent with every request.
///
/// IMDb serves a reduced page to unknown agents, so a desktop browser is used.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/113.0";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Inclusive range (seconds) of the random pause after each request.
pub const THROTTLE_SECS: (u64, u64) = (2, 6);

/// README line after which the event listing is regenerated.
pub const README_MARKER: &str = "## Events Available";

/// File holding the list of event IDs to scrape.
pub const EVENT_IDS_FILE: &str = "event_ids.yml";

/// File holding the validation catalogue.
pub const CATALOGUE_FILE: &str = "event_validation.yml";

/// Directory holding one YAML file per event.
pub const EVENTS_DIR: &str = "events";

/// README file name.
pub const README_FILE: &str = "README.md";

/// IMDb event ID pattern: `ev` followed by 7 digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EVENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ev\d{7}$").expect("valid regex"));

/// Validate IMDb event ID format.
///
/// # Examples
/// ```
/// use imdb_awards::config::validate_event_id;
///
/// assert!(validate_event_id("ev0000003").is_ok());
/// assert!(validate_event_id("tt0000003").is_err());
/// ```
pub fn validate_event_id(event_id: &str) -> Result<()> {
    if EVENT_ID_PATTERN.is_match(event_id) {
        Ok(())
    } else {
        Err(AwardsError::InvalidEventId(event_id.to_string()))
    }
}

/// Path of an event's overview page, relative to the site root.
pub fn event_path(event_id: &str) -> String {
    format!("/event/{event_id}")
}

/// Path of one edition of an event, relative to the site root.
///
/// A plain year label maps to instance `1`; `2020-2` maps to `2020/2`.
pub fn event_year_path(event_id: &str, label: &YearLabel) -> String {
    format!("/event/{event_id}/{}/{}/", label.year(), label.instance())
}

/// Build the overview URL of an event.
pub fn event_url(event_id: &str) -> String {
    format!("{BASE_URL}{}", event_path(event_id))
}

/// Build the URL of one edition of an event.
///
/// # Examples
/// ```
/// use imdb_awards::config::event_year_url;
/// use imdb_awards::types::YearLabel;
///
/// let label = YearLabel::new(2020, 2);
/// assert_eq!(
///     event_year_url("ev0000003", &label),
///     "https://www.imdb.com/event/ev0000003/2020/2/"
/// );
/// ```
pub fn event_year_url(event_id: &str, label: &YearLabel) -> String {
    format!("{BASE_URL}{}", event_year_path(event_id, label))
}

/// Flags controlling a scraping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the random pause between requests.
    pub no_sleep: bool,
    /// Ignore all saved data and rebuild every event.
    pub clean: bool,
    /// Emit trace-level logs.
    pub trace: bool,
    /// Log every HTTP request.
    pub log_requests: bool,
}

/// Locations of the files the scraper reads and writes.
#[derive(Debug, Clone)]
pub struct Layout {
    base: PathBuf,
}

impl Layout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn event_ids(&self) -> PathBuf {
        self.base.join(EVENT_IDS_FILE)
    }

    pub fn catalogue(&self) -> PathBuf {
        self.base.join(CATALOGUE_FILE)
    }

    pub fn events_dir(&self) -> PathBuf {
        self.base.join(EVENTS_DIR)
    }

    pub fn event_file(&self, event_id: &str) -> PathBuf {
        self.events_dir().join(format!("{event_id}.yml"))
    }

    pub fn readme(&self) -> PathBuf {
        self.base.join(README_FILE)
    }
}
