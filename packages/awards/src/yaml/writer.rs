//! YAML writers for event, catalogue and event ID files.
//!
//! serde_yaml_ng cannot emit comments, and the comments are the whole point
//! of the catalogue file, so these shapes are written line by line. Scalars
//! are only quoted when a plain scalar would not read back as the same
//! string.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::catalogue::Catalogue;
use crate::config::event_url;
use crate::error::Result;
use crate::summary::EventComments;
use crate::types::{CategoryRecord, EventYears};

/// Check if a plain YAML scalar would be parsed as a non-string type or
/// would not parse back to the same text.
fn needs_yaml_quoting(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return true;
    }

    // YAML booleans, null and special floats
    match value.to_lowercase().as_str() {
        "true" | "false" | "yes" | "no" | "y" | "n" | "on" | "off" | "null" | "~" | ".inf"
        | "-.inf" | "+.inf" | ".nan" => return true,
        _ => {}
    }

    // Starts with YAML special character
    if let Some(&first) = value.as_bytes().first() {
        if b"{}[],&*#?|-<>=!%@:\"`' ".contains(&first) {
            return true;
        }
    }

    // Contains problematic sequences or trailing colon
    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return true;
    }

    // Anything Rust reads as a number (integers, floats, exponents)
    if value.parse::<f64>().is_ok() {
        return true;
    }

    let lower = value.to_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0o") {
        return true;
    }

    // Date: YYYY-MM-DD
    let date_parts: Vec<&str> = value.split('-').collect();
    if date_parts.len() == 3
        && date_parts[0].len() == 4
        && date_parts[1].len() == 2
        && date_parts[2].len() == 2
        && date_parts
            .iter()
            .all(|p| p.bytes().all(|b| b.is_ascii_digit()))
    {
        return true;
    }

    false
}

/// Render a scalar in block context (mapping keys, block sequence items).
fn scalar(value: &str) -> String {
    if value.chars().any(char::is_control) {
        // JSON strings are valid double-quoted YAML scalars
        return serde_json::to_string(value).unwrap_or_else(|_| format!("'{value}'"));
    }
    if needs_yaml_quoting(value) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

/// Render a scalar inside a flow sequence (`[a, b]`).
fn flow_scalar(value: &str) -> String {
    if value.contains([',', '[', ']', '{', '}']) && !value.chars().any(char::is_control) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        scalar(value)
    }
}

/// Render a flow sequence.
fn flow_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| flow_scalar(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Append an end-of-line comment to a line.
fn with_comment(line: String, comment: Option<&str>) -> String {
    match comment {
        Some(c) if !c.is_empty() => format!("{line} # {c}"),
        _ => line,
    }
}

/// Render the nominee/winner lists of one category.
fn push_record(out: &mut Vec<String>, indent: &str, record: &CategoryRecord) {
    out.push(format!("{indent}nominee: {}", flow_list(&record.nominee)));
    out.push(format!("{indent}winner: {}", flow_list(&record.winner)));
}

/// Generate the YAML text of an event file.
///
/// The file starts with the event's display name as a comment; each year key
/// carries the URL it was scraped from.
pub fn generate_event_yaml(title: &str, event: &EventYears) -> String {
    let mut out = vec![format!("# {title}")];

    if event.is_empty() {
        out.push("{}".to_string());
    }

    for year in &event.years {
        let key = scalar(&year.label.to_string());
        if year.awards.is_empty() {
            out.push(with_comment(format!("{key}: {{}}"), Some(&year.url)));
            continue;
        }
        out.push(with_comment(format!("{key}:"), Some(&year.url)));
        for award in year.awards.iter() {
            out.push(format!("  {}:", scalar(&award.name)));
            for (category, record) in &award.categories {
                out.push(format!("    {}:", scalar(category)));
                push_record(&mut out, "      ", record);
            }
        }
    }

    format!("{}\n", out.join("\n"))
}

/// Render a block sequence with one comment per item.
fn push_commented_list(
    out: &mut Vec<String>,
    key_line: String,
    items: &[String],
    comments: Option<&[String]>,
    heading: &str,
) {
    if items.is_empty() {
        out.push(with_comment(format!("{key_line} []"), Some(heading)));
        return;
    }
    out.push(with_comment(key_line, Some(heading)));
    for (idx, item) in items.iter().enumerate() {
        let comment = comments.and_then(|c| c.get(idx)).map(String::as_str);
        out.push(with_comment(format!("    - {}", scalar(item)), comment));
    }
}

/// Generate the YAML text of the validation catalogue.
///
/// # Arguments
/// * `catalogue` - Catalogue to render, in event ID order
/// * `titles` - Display names of the events scraped this run
/// * `comments` - Range summaries for the award and category filters
pub fn generate_catalogue_yaml(
    catalogue: &Catalogue,
    titles: &BTreeMap<String, String>,
    comments: &BTreeMap<String, EventComments>,
) -> String {
    let mut out = Vec::new();

    for (event_id, filters) in catalogue.iter() {
        let title = titles.get(event_id).map(String::as_str);
        let event_comment = title.map(|t| format!("{t} ({})", event_url(event_id)));
        out.push(with_comment(
            format!("{}:", scalar(event_id)),
            event_comment.as_deref(),
        ));
        out.push(format!("  years: {}", flow_list(&filters.years)));

        let event_comments = comments.get(event_id);
        let title = title.unwrap_or(event_id);
        push_commented_list(
            &mut out,
            "  awards:".to_string(),
            &filters.awards,
            event_comments.map(|c| c.awards.as_slice()),
            &format!("Award Options: {title}"),
        );
        push_commented_list(
            &mut out,
            "  categories:".to_string(),
            &filters.categories,
            event_comments.map(|c| c.categories.as_slice()),
            &format!("Category Options: {title}"),
        );
    }

    if out.is_empty() {
        return "{}\n".to_string();
    }
    format!("{}\n", out.join("\n"))
}

/// Generate the YAML text of the event ID list, annotated with names.
pub fn generate_event_ids_yaml(event_ids: &[String], titles: &BTreeMap<String, String>) -> String {
    let mut out = vec!["event_ids:".to_string()];
    if event_ids.is_empty() {
        out[0] = "event_ids: []".to_string();
    }
    for event_id in event_ids {
        let title = titles.get(event_id).map(String::as_str);
        out.push(with_comment(format!("  - {}", scalar(event_id)), title));
    }
    format!("{}\n", out.join("\n"))
}

/// Write a file atomically.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// This ensures partial writes don't corrupt existing files on crash.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?; // Ensure data is flushed to disk
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Save an event file.
pub fn save_event_file(path: &Path, title: &str, event: &EventYears) -> Result<()> {
    write_atomic(path, &generate_event_yaml(title, event))
}

/// Save the validation catalogue.
pub fn save_catalogue(
    path: &Path,
    catalogue: &Catalogue,
    titles: &BTreeMap<String, String>,
    comments: &BTreeMap<String, EventComments>,
) -> Result<()> {
    write_atomic(path, &generate_catalogue_yaml(catalogue, titles, comments))
}

/// Save the event ID list.
pub fn save_event_ids(
    path: &Path,
    event_ids: &[String],
    titles: &BTreeMap<String, String>,
) -> Result<()> {
    write_atomic(path, &generate_event_ids_yaml(event_ids, titles))
}
