//! Validation catalogue of known years, award names and category names.
//!
//! The catalogue is the whitelist consumers use to validate filters. Names
//! are only ever added; removing one is a manual edit.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::types::YearLabel;

/// Known filter values of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilters {
    #[serde(default)]
    pub years: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl EventFilters {
    /// Register an award name. Returns `true` if it was new.
    pub fn observe_award(&mut self, name: &str) -> bool {
        push_unique(&mut self.awards, name)
    }

    /// Register a category name. Returns `true` if it was new.
    pub fn observe_category(&mut self, name: &str) -> bool {
        push_unique(&mut self.categories, name)
    }

    /// Register a year that produced data. Returns `true` if it was new.
    ///
    /// Incremental runs put new years in front (most recent first); a clean
    /// run appends them in the order they are processed. A clean run followed
    /// by incremental runs therefore leaves a mixed order such as
    /// `['2022', '2020', '2021']`. Readers of this list must not rely on its
    /// order; [`crate::summary::range_summary`] sorts it before use.
    pub fn record_year(&mut self, label: &YearLabel, clean: bool) -> bool {
        let label = label.to_string();
        if self.years.contains(&label) {
            return false;
        }
        if clean {
            self.years.push(label);
        } else {
            self.years.insert(0, label);
        }
        true
    }

    /// Register a saved year that is missing from the list. Returns `true`
    /// if it was added.
    ///
    /// The year goes in front of the first parseable entry older than it,
    /// so a most-recent-first list stays in that order.
    pub fn restore_year(&mut self, label: &YearLabel) -> bool {
        let text = label.to_string();
        if self.years.contains(&text) {
            return false;
        }
        let pos = self
            .years
            .iter()
            .position(|y| y.parse::<YearLabel>().is_ok_and(|known| known < *label))
            .unwrap_or(self.years.len());
        self.years.insert(pos, text);
        true
    }

    /// Sort award and category names and drop duplicates.
    pub fn finish(&mut self) {
        self.awards.sort();
        self.awards.dedup();
        self.categories.sort();
        self.categories.dedup();
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) -> bool {
    if list.iter().any(|n| n == name) {
        false
    } else {
        list.push(name.to_string());
        true
    }
}

/// Catalogue of all events, keyed by event ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    events: BTreeMap<String, EventFilters>,
}

impl Catalogue {
    pub fn from_events(events: BTreeMap<String, EventFilters>) -> Self {
        Self { events }
    }

    /// Filters of an event, created empty on first use.
    pub fn entry_mut(&mut self, event_id: &str) -> &mut EventFilters {
        self.events.entry(event_id.to_string()).or_default()
    }

    #[must_use]
    pub fn get(&self, event_id: &str) -> Option<&EventFilters> {
        self.events.get(event_id)
    }

    /// Events in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EventFilters)> {
        self.events.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_is_idempotent() {
        let mut filters = EventFilters::default();
        assert!(filters.observe_award("oscar"));
        assert!(!filters.observe_award("oscar"));
        assert!(filters.observe_category("best picture"));
        assert!(!filters.observe_category("best picture"));
        assert_eq!(filters.awards, vec!["oscar"]);
        assert_eq!(filters.categories, vec!["best picture"]);
    }

    #[test]
    fn test_record_year_incremental_prepends() {
        let mut filters = EventFilters {
            years: vec!["2022".to_string(), "2021".to_string()],
            ..Default::default()
        };
        assert!(filters.record_year(&YearLabel::new(2023, 1), false));
        assert!(!filters.record_year(&YearLabel::new(2022, 1), false));
        assert_eq!(filters.years, vec!["2023", "2022", "2021"]);
    }

    #[test]
    fn test_record_year_clean_appends() {
        let mut filters = EventFilters::default();
        filters.record_year(&YearLabel::new(1930, 1), true);
        filters.record_year(&YearLabel::new(1930, 2), true);
        filters.record_year(&YearLabel::new(1931, 1), true);
        assert_eq!(filters.years, vec!["1930", "1930-2", "1931"]);
    }

    #[test]
    fn test_record_year_after_clean_run_mixes_order() {
        let mut filters = EventFilters::default();
        filters.record_year(&YearLabel::new(2020, 1), true);
        filters.record_year(&YearLabel::new(2021, 1), true);
        filters.record_year(&YearLabel::new(2022, 1), false);
        assert_eq!(filters.years, vec!["2022", "2020", "2021"]);
    }

    #[test]
    fn test_restore_year_keeps_recent_first_order() {
        let mut filters = EventFilters {
            years: vec!["2022".to_string()],
            ..Default::default()
        };
        assert!(filters.restore_year(&YearLabel::new(2020, 1)));
        assert!(filters.restore_year(&YearLabel::new(2021, 1)));
        assert!(filters.restore_year(&YearLabel::new(2024, 1)));
        assert!(filters.restore_year(&YearLabel::new(2020, 2)));
        assert!(!filters.restore_year(&YearLabel::new(2022, 1)));
        assert_eq!(filters.years, vec!["2024", "2022", "2021", "2020-2", "2020"]);
    }

    #[test]
    fn test_finish_sorts_and_dedups() {
        let mut filters = EventFilters {
            awards: vec!["oscar".into(), "golden globe".into(), "oscar".into()],
            categories: vec!["best sound".into(), "best actor".into()],
            ..Default::default()
        };
        filters.finish();
        assert_eq!(filters.awards, vec!["golden globe", "oscar"]);
        assert_eq!(filters.categories, vec!["best actor", "best sound"]);
    }

    #[test]
    fn test_entry_mut_creates_event() {
        let mut catalogue = Catalogue::default();
        catalogue.entry_mut("ev0000003").observe_award("oscar");
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.get("ev0000003").unwrap().awards, vec!["oscar"]);
    }
}
