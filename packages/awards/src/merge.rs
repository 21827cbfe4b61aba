//! Incremental merge of saved event data with fresh scrapes.
//!
//! Editions already saved are considered final and reused, except the
//! latest edition which IMDb keeps updating (late nominees, corrected
//! winners) and is therefore always fetched again.

use std::collections::BTreeMap;

use crate::catalogue::EventFilters;
use crate::config::event_year_url;
use crate::error::Result;
use crate::imdb::AwardsSource;
use crate::types::{EventSummary, EventYears, YearAwards, YearEdition, YearLabel};

/// Decide whether an edition must be fetched.
///
/// Fetch on a clean run, for the latest edition, and for editions that have
/// no saved data.
pub fn should_fetch(label: &YearLabel, is_latest: bool, clean: bool, prior: &EventYears) -> bool {
    clean || is_latest || !prior.contains(label)
}

/// Labels of an event in processing order (oldest first, no duplicates).
pub fn ordered_labels(summary: &EventSummary) -> Vec<YearLabel> {
    let mut labels = summary.years.clone();
    labels.sort();
    labels.dedup();
    labels
}

/// Combine saved and freshly fetched editions.
///
/// Each label takes the fresh data when there is some and the saved data
/// otherwise. Labels with neither are skipped.
pub fn merge_years(
    event_id: &str,
    labels: &[YearLabel],
    prior: &EventYears,
    fresh: &BTreeMap<YearLabel, YearAwards>,
) -> EventYears {
    let years = labels
        .iter()
        .filter_map(|label| {
            let awards = match fresh.get(label) {
                Some(awards) => awards.clone(),
                None => prior.get(label)?.awards.clone(),
            };
            Some(YearEdition {
                label: *label,
                url: event_year_url(event_id, label),
                awards,
            })
        })
        .collect();
    EventYears { years }
}

/// Outcome of building one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltEvent {
    pub years: EventYears,
    /// Editions fetched from IMDb this run, oldest first.
    pub fetched: Vec<YearLabel>,
    /// Editions reused from saved data.
    pub reused: Vec<YearLabel>,
}

/// Build the full year data of an event.
///
/// Fetches what [`should_fetch`] asks for, merges it with `prior` and
/// registers every award and category name in `filters`. Freshly fetched
/// editions with data are recorded in the catalogue's year list, and saved
/// editions with data that the list lacks are put back in order. Nothing is
/// returned if any fetch fails.
///
/// # Arguments
/// * `source` - Where editions are fetched from
/// * `event_id` - The event being built
/// * `summary` - Event overview with all edition labels
/// * `prior` - Saved data of the event (empty on a clean run)
/// * `clean` - Whether this is a clean run
/// * `filters` - Catalogue entry of the event
pub fn build_event(
    source: &mut dyn AwardsSource,
    event_id: &str,
    summary: &EventSummary,
    prior: &EventYears,
    clean: bool,
    filters: &mut EventFilters,
) -> Result<BuiltEvent> {
    let labels = ordered_labels(summary);
    let latest = labels.last().copied();

    let mut fresh = BTreeMap::new();
    let mut fetched = Vec::new();
    let mut reused = Vec::new();
    for (idx, label) in labels.iter().enumerate() {
        let is_latest = Some(*label) == latest;
        if should_fetch(label, is_latest, clean, prior) {
            tracing::info!(
                event_id,
                year = %label,
                index = idx + 1,
                total = labels.len(),
                "Fetching edition"
            );
            let rows = source.year_detail(event_id, label)?;
            fresh.insert(*label, YearAwards::from_nominations(rows));
            fetched.push(*label);
        } else {
            tracing::trace!(event_id, year = %label, "Reusing saved edition");
            reused.push(*label);
        }
    }

    let years = merge_years(event_id, &labels, prior, &fresh);

    for year in &years.years {
        for award in year.awards.iter() {
            if filters.observe_award(&award.name) {
                tracing::debug!(event_id, award = %award.name, "New award filter");
            }
            for category in award.categories.keys() {
                if filters.observe_category(category) {
                    tracing::debug!(event_id, category = %category, "New category filter");
                }
            }
        }
    }

    for label in &fetched {
        let has_data = fresh.get(label).is_some_and(|awards| !awards.is_empty());
        if has_data {
            filters.record_year(label, clean);
        }
    }

    // Saved editions can predate the catalogue entry (a run that stopped
    // before saving it)
    for year in &years.years {
        if !year.awards.is_empty() && filters.restore_year(&year.label) {
            tracing::debug!(event_id, year = %year.label, "Restored missing catalogue year");
        }
    }

    Ok(BuiltEvent {
        years,
        fetched,
        reused,
    })
}
