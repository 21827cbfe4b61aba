//! YAML loaders for event, catalogue and event ID files.
//!
//! Comments are ignored on load; they are regenerated on every save. A file
//! that does not exist yet loads as empty.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::catalogue::{Catalogue, EventFilters};
use crate::config::event_year_url;
use crate::error::{AwardsError, Result};
use crate::types::{Award, CategoryRecord, EventYears, YearAwards, YearEdition, YearLabel};

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn shape_error(path: &str, message: impl Into<String>) -> AwardsError {
    AwardsError::YamlShape {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Render a mapping key as text (years may have been written unquoted).
fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse the text of an event file.
///
/// Year order is preserved as written. Source URLs are rebuilt from the
/// labels since they only live in comments.
///
/// # Arguments
/// * `event_id` - Event the file belongs to
/// * `text` - File content
/// * `origin` - Name used in error messages
pub fn parse_event_yaml(event_id: &str, text: &str, origin: &str) -> Result<EventYears> {
    let doc: Value = serde_yaml_ng::from_str(text)?;
    let mapping = match doc {
        Value::Null => return Ok(EventYears::default()),
        Value::Mapping(m) => m,
        _ => return Err(shape_error(origin, "expected a mapping of years")),
    };

    let mut event = EventYears::default();
    for (key, value) in mapping {
        let label_text = key_text(&key).ok_or_else(|| shape_error(origin, "non-scalar year key"))?;
        let label: YearLabel = label_text.parse()?;

        let mut awards = YearAwards::default();
        match value {
            Value::Null => {}
            Value::Mapping(award_map) => {
                for (award_key, categories) in award_map {
                    let name = key_text(&award_key)
                        .ok_or_else(|| shape_error(origin, "non-scalar award key"))?;
                    let categories: BTreeMap<String, CategoryRecord> = match categories {
                        Value::Null => BTreeMap::new(),
                        other => serde_yaml_ng::from_value(other)?,
                    };
                    awards.push(Award { name, categories });
                }
            }
            _ => {
                return Err(shape_error(
                    origin,
                    format!("year {label_text} is not a mapping of awards"),
                ))
            }
        }

        event.years.push(YearEdition {
            url: event_year_url(event_id, &label),
            label,
            awards,
        });
    }

    Ok(event)
}

/// Load an event file; a missing file is an empty event.
pub fn load_event_file(path: &Path, event_id: &str) -> Result<EventYears> {
    match read_optional(path)? {
        Some(text) => parse_event_yaml(event_id, &text, &path.display().to_string()),
        None => Ok(EventYears::default()),
    }
}

/// Parse the text of the catalogue file.
pub fn parse_catalogue_yaml(text: &str) -> Result<Catalogue> {
    let events: Option<BTreeMap<String, Option<EventFilters>>> = serde_yaml_ng::from_str(text)?;
    let events = events
        .unwrap_or_default()
        .into_iter()
        .map(|(id, filters)| (id, filters.unwrap_or_default()))
        .collect();
    Ok(Catalogue::from_events(events))
}

/// Load the catalogue; a missing file is an empty catalogue.
pub fn load_catalogue(path: &Path) -> Result<Catalogue> {
    match read_optional(path)? {
        Some(text) => parse_catalogue_yaml(&text),
        None => Ok(Catalogue::default()),
    }
}

#[derive(Debug, Deserialize)]
struct EventIdsFile {
    #[serde(default)]
    event_ids: Vec<String>,
}

/// Parse the event ID list.
pub fn parse_event_ids_yaml(text: &str) -> Result<Vec<String>> {
    let file: Option<EventIdsFile> = serde_yaml_ng::from_str(text)?;
    Ok(file.map(|f| f.event_ids).unwrap_or_default())
}

/// Load the event ID list, sorted and without duplicates.
pub fn load_event_ids(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let mut ids = parse_event_ids_yaml(&text)?;
    ids.sort();
    ids.dedup();
    Ok(ids)
}
