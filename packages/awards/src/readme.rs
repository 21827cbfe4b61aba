//! README regeneration.
//!
//! The README ends with a listing of every scraped event, linking to the
//! event on IMDb and to its award and category filters in the catalogue
//! file. The listing is only rewritten when a YAML file in the working tree
//! differs from the git index, so an unchanged run leaves the README alone.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};

use crate::config::{event_url, EVENT_GIT_URL, README_MARKER};
use crate::error::{AwardsError, Result};
use crate::yaml::write_atomic;

/// Line numbers (1-based) of an event's entries in the catalogue file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub event: usize,
    pub awards: usize,
    pub categories: usize,
}

/// One event in the README listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLink {
    pub id: String,
    pub name: String,
    pub anchors: Anchors,
}

/// Find the line numbers of every event and its filter lists.
///
/// Expects the layout written by the catalogue writer: event IDs as
/// top-level keys, `awards:` and `categories:` indented below them.
pub fn locate_anchors(catalogue_text: &str) -> BTreeMap<String, Anchors> {
    let mut anchors: BTreeMap<String, Anchors> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (idx, line) in catalogue_text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        if !line.starts_with(' ') {
            let key = line.split_once(':').map(|(k, _)| k.trim().trim_matches('\''));
            current = key.filter(|k| !k.is_empty()).map(str::to_string);
            if let Some(id) = &current {
                anchors.entry(id.clone()).or_default().event = line_no;
            }
            continue;
        }

        let Some(id) = &current else { continue };
        let trimmed = line.trim_start();
        if let Some(entry) = anchors.get_mut(id) {
            if trimmed.starts_with("awards:") {
                entry.awards = line_no;
            } else if trimmed.starts_with("categories:") {
                entry.categories = line_no;
            }
        }
    }

    anchors
}

/// Render the README with a fresh event listing.
///
/// Everything up to and including the marker line is kept; everything after
/// it is replaced.
pub fn render_readme(existing: &str, events: &[EventLink], now: DateTime<Utc>) -> Result<String> {
    let lines: Vec<&str> = existing.lines().collect();
    let marker = lines
        .iter()
        .position(|l| l.trim_end() == README_MARKER)
        .ok_or_else(|| AwardsError::MissingMarker {
            marker: README_MARKER.to_string(),
            path: "README".to_string(),
        })?;

    let mut out: Vec<String> = lines[..=marker].iter().map(|l| l.to_string()).collect();
    out.push(String::new());
    out.push(format!(
        "Last generated at: {} UTC",
        now.format("%B %d, %Y %H:%M")
    ));
    out.push(String::new());

    for event in events {
        out.push(format!(
            "* [{}]({}) ([{}]({EVENT_GIT_URL}#L{}))",
            event.name,
            event_url(&event.id),
            event.id,
            event.anchors.event
        ));
        out.push(format!(
            "  * [Award Filters]({EVENT_GIT_URL}#L{})",
            event.anchors.awards
        ));
        out.push(format!(
            "  * [Category Filters]({EVENT_GIT_URL}#L{})",
            event.anchors.categories
        ));
    }

    Ok(format!("{}\n", out.join("\n")))
}

/// Rewrite the README listing if any data file changed.
///
/// # Returns
/// `true` if the README was rewritten.
pub fn regenerate(
    repo: &Path,
    readme: &Path,
    events: &[EventLink],
    now: DateTime<Utc>,
) -> Result<bool> {
    let changed = changed_data_files(repo)?;
    if changed.is_empty() {
        tracing::info!("No data files changed, README left untouched");
        return Ok(false);
    }
    tracing::debug!(files = ?changed, "Data files changed");

    let existing = fs::read_to_string(readme)?;
    let content = render_readme(&existing, events, now).map_err(|e| match e {
        AwardsError::MissingMarker { marker, .. } => AwardsError::MissingMarker {
            marker,
            path: readme.display().to_string(),
        },
        other => other,
    })?;
    write_atomic(readme, &content)?;
    tracing::info!(path = %readme.display(), events = events.len(), "README regenerated");
    Ok(true)
}

/// List YAML files whose working-tree content differs from the index.
pub fn changed_data_files(repo: &Path) -> Result<Vec<String>> {
    let stdout = run_git(repo, &["diff", "--name-only"])?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|path| path.ends_with(".yml"))
        .map(str::to_string)
        .collect())
}

/// Check that the git executable can be run.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Execute a git command in the given directory and return stdout.
fn run_git(repo_path: &Path, args: &[&str]) -> Result<String> {
    tracing::debug!(cwd = %repo_path.display(), args = ?args, "running git command");

    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(|e| AwardsError::Git {
            message: format!("failed to execute git: {e}"),
            stderr: String::new(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(AwardsError::Git {
            message: format!(
                "git {} failed with exit code {:?}",
                args.join(" "),
                output.status.code()
            ),
            stderr,
        });
    }

    if !stderr.is_empty() {
        tracing::debug!(stderr = %stderr, "git stderr (non-fatal)");
    }

    Ok(stdout)
}
