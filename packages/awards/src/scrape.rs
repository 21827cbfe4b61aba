//! Main scraping run that ties all components together.

use std::collections::BTreeMap;
use std::fs;

use chrono::Utc;
use indicatif::ProgressBar;

use crate::catalogue::Catalogue;
use crate::config::{validate_event_id, Layout, RunOptions};
use crate::error::Result;
use crate::imdb::AwardsSource;
use crate::merge::build_event;
use crate::readme::{locate_anchors, regenerate, EventLink};
use crate::summary::{annotate, FilterStats};
use crate::types::EventYears;
use crate::yaml::{
    load_catalogue, load_event_file, load_event_ids, save_catalogue, save_event_file,
    save_event_ids,
};

/// Counters describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub events: usize,
    pub fetched_years: usize,
    pub reused_years: usize,
    pub readme_updated: bool,
}

/// Scrape every configured event and update all output files.
///
/// # Arguments
/// * `source` - Where event data comes from
/// * `layout` - Location of the input and output files
/// * `options` - Run flags
/// * `progress` - Progress bar advanced once per event
///
/// # Returns
/// A `RunReport` with counts of fetched and reused editions
pub fn run_scrape(
    source: &mut dyn AwardsSource,
    layout: &Layout,
    options: &RunOptions,
    progress: &ProgressBar,
) -> Result<RunReport> {
    let event_ids = load_event_ids(&layout.event_ids())?;
    for event_id in &event_ids {
        validate_event_id(event_id)?;
    }
    tracing::info!(count = event_ids.len(), ids = ?event_ids, "Loaded event IDs");

    fs::create_dir_all(layout.events_dir())?;

    let mut catalogue = if options.clean {
        Catalogue::default()
    } else {
        load_catalogue(&layout.catalogue())?
    };

    let mut report = RunReport {
        events: event_ids.len(),
        ..Default::default()
    };
    let mut titles = BTreeMap::new();
    let mut comments = BTreeMap::new();

    progress.set_length(event_ids.len() as u64);
    for event_id in &event_ids {
        progress.set_message(event_id.clone());
        let summary = source.event_summary(event_id)?;
        tracing::info!(
            event_id = %event_id,
            name = %summary.name,
            editions = summary.years.len(),
            "Processing event"
        );

        let event_path = layout.event_file(event_id);
        let prior = if options.clean {
            EventYears::default()
        } else {
            load_event_file(&event_path, event_id)?
        };

        let filters = catalogue.entry_mut(event_id);
        let built = build_event(source, event_id, &summary, &prior, options.clean, filters)?;
        filters.finish();

        save_event_file(&event_path, &summary.name, &built.years)?;

        let stats = FilterStats::from_event(&built.years);
        comments.insert(event_id.clone(), annotate(filters, &stats));
        titles.insert(event_id.clone(), summary.name);

        report.fetched_years += built.fetched.len();
        report.reused_years += built.reused.len();
        progress.inc(1);
    }

    let catalogue_path = layout.catalogue();
    save_catalogue(&catalogue_path, &catalogue, &titles, &comments)?;

    // Line numbers come from the file as saved
    let anchors = locate_anchors(&fs::read_to_string(&catalogue_path)?);

    save_event_ids(&layout.event_ids(), &event_ids, &titles)?;

    let readme = layout.readme();
    if readme.exists() {
        let links: Vec<EventLink> = event_ids
            .iter()
            .map(|id| EventLink {
                id: id.clone(),
                name: titles.get(id).cloned().unwrap_or_else(|| id.clone()),
                anchors: anchors.get(id).copied().unwrap_or_default(),
            })
            .collect();
        report.readme_updated = regenerate(layout.base(), &readme, &links, Utc::now())?;
    } else {
        tracing::warn!(path = %readme.display(), "README not found, skipping regeneration");
    }

    Ok(report)
}
