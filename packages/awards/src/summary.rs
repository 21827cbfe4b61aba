//! Range summaries for catalogue comments.
//!
//! Every award and category name in the catalogue is annotated with how many
//! editions it appeared in and which runs of consecutive editions those were,
//! e.g. `4 Events: 2024, 2020-2022`.

use std::collections::BTreeMap;

use crate::catalogue::EventFilters;
use crate::types::{EventYears, YearLabel};

/// Comment shown for a filter that never occurred.
pub const NO_EVENTS: &str = "No Events Found";

/// Editions in which each award and category name occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub awards: BTreeMap<String, Vec<YearLabel>>,
    pub categories: BTreeMap<String, Vec<YearLabel>>,
}

impl FilterStats {
    /// Collect occurrences from an event, in the event's year order.
    pub fn from_event(event: &EventYears) -> Self {
        let mut stats = Self::default();
        for year in &event.years {
            for award in year.awards.iter() {
                push_year(&mut stats.awards, &award.name, year.label);
                for category in award.categories.keys() {
                    push_year(&mut stats.categories, category, year.label);
                }
            }
        }
        stats
    }
}

fn push_year(map: &mut BTreeMap<String, Vec<YearLabel>>, name: &str, label: YearLabel) {
    let years = map.entry(name.to_string()).or_default();
    if !years.contains(&label) {
        years.push(label);
    }
}

/// Summary comments for one event, parallel to its catalogue lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventComments {
    pub awards: Vec<String>,
    pub categories: Vec<String>,
}

/// Build the comments for every award and category name of an event.
pub fn annotate(filters: &EventFilters, stats: &FilterStats) -> EventComments {
    let comment = |map: &BTreeMap<String, Vec<YearLabel>>, name: &String| {
        map.get(name)
            .map(|years| range_summary(years, &filters.years))
            .unwrap_or_else(|| NO_EVENTS.to_string())
    };
    EventComments {
        awards: filters
            .awards
            .iter()
            .map(|n| comment(&stats.awards, n))
            .collect(),
        categories: filters
            .categories
            .iter()
            .map(|n| comment(&stats.categories, n))
            .collect(),
    }
}

/// Summarize the editions a filter occurred in.
///
/// The known years are viewed most recent first. Occurrences are walked in
/// the same direction; an occurrence joins the current block when it sits at
/// the next position of that view, otherwise it opens a new block. Blocks
/// print oldest year first. Occurrences missing from the known years count
/// towards the total but are not placed in a block.
///
/// # Examples
/// ```
/// use imdb_awards::summary::range_summary;
/// use imdb_awards::types::YearLabel;
///
/// let known: Vec<String> = (2018..=2024).map(|y| y.to_string()).collect();
/// let seen: Vec<YearLabel> = [2020, 2021, 2022, 2024]
///     .into_iter()
///     .map(|y| YearLabel::new(y, 1))
///     .collect();
/// assert_eq!(range_summary(&seen, &known), "4 Events: 2024, 2020-2022");
/// ```
pub fn range_summary(occurrences: &[YearLabel], known_years: &[String]) -> String {
    if occurrences.is_empty() {
        return NO_EVENTS.to_string();
    }

    let mut recent_first: Vec<YearLabel> =
        known_years.iter().filter_map(|y| y.parse().ok()).collect();
    recent_first.sort_unstable_by(|a, b| b.cmp(a));
    recent_first.dedup();

    let mut seen: Vec<YearLabel> = occurrences.to_vec();
    seen.sort_unstable_by(|a, b| b.cmp(a));
    seen.dedup();

    // (newest, oldest) of each block
    let mut blocks: Vec<(YearLabel, YearLabel)> = Vec::new();
    let mut previous: Option<usize> = None;
    for label in seen {
        let Some(pos) = recent_first.iter().position(|y| *y == label) else {
            tracing::trace!(year = %label, "Occurrence missing from known years");
            continue;
        };
        let extends = previous.is_some_and(|prev| pos == prev + 1);
        match blocks.last_mut() {
            Some(block) if extends => block.1 = label,
            _ => blocks.push((label, label)),
        }
        previous = Some(pos);
    }

    let ranges: Vec<String> = blocks
        .iter()
        .map(|(newest, oldest)| {
            if newest == oldest {
                newest.to_string()
            } else {
                format!("{oldest}-{newest}")
            }
        })
        .collect();

    let count = occurrences.len();
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} Event{plural}: {}", ranges.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Nomination, YearAwards, YearEdition};
    use pretty_assertions::assert_eq;

    fn labels(years: &[u32]) -> Vec<YearLabel> {
        years.iter().map(|y| YearLabel::new(*y, 1)).collect()
    }

    fn known(years: &[&str]) -> Vec<String> {
        years.iter().map(|y| y.to_string()).collect()
    }

    fn edition(year: u32, rows: &[(&str, &str)]) -> YearEdition {
        YearEdition {
            label: YearLabel::new(year, 1),
            url: String::new(),
            awards: YearAwards::from_nominations(rows.iter().map(|(a, c)| Nomination {
                award: a.to_string(),
                category: c.to_string(),
                nominees: vec!["tt1".to_string()],
                winners: vec![],
            })),
        }
    }

    #[test]
    fn test_range_summary_blocks() {
        let all = known(&["2018", "2019", "2020", "2021", "2022", "2023", "2024"]);
        assert_eq!(
            range_summary(&labels(&[2020, 2021, 2022, 2024]), &all),
            "4 Events: 2024, 2020-2022"
        );
    }

    #[test]
    fn test_range_summary_ignores_known_year_order() {
        // Incremental runs store new years in front
        let mixed = known(&["2024", "2018", "2019", "2020", "2021", "2022", "2023"]);
        assert_eq!(
            range_summary(&labels(&[2020, 2021, 2022, 2024]), &mixed),
            "4 Events: 2024, 2020-2022"
        );
    }

    #[test]
    fn test_range_summary_single() {
        assert_eq!(
            range_summary(&labels(&[2019]), &known(&["2019", "2020"])),
            "1 Event: 2019"
        );
    }

    #[test]
    fn test_range_summary_all_contiguous() {
        assert_eq!(
            range_summary(&labels(&[2019, 2020, 2021]), &known(&["2019", "2020", "2021"])),
            "3 Events: 2019-2021"
        );
    }

    #[test]
    fn test_range_summary_adjacency_follows_known_years() {
        // No 2021 edition: 2020 and 2022 are still adjacent editions
        assert_eq!(
            range_summary(&labels(&[2020, 2022]), &known(&["2020", "2022"])),
            "2 Events: 2020-2022"
        );
    }

    #[test]
    fn test_range_summary_instances() {
        let seen = vec![YearLabel::new(1930, 1), YearLabel::new(1930, 2)];
        assert_eq!(
            range_summary(&seen, &known(&["1930", "1930-2", "1931"])),
            "2 Events: 1930-1930-2"
        );
    }

    #[test]
    fn test_range_summary_none() {
        assert_eq!(range_summary(&[], &known(&["2020"])), NO_EVENTS);
    }

    #[test]
    fn test_filter_stats_and_annotate() {
        let event = EventYears {
            years: vec![
                edition(2020, &[("oscar", "best picture")]),
                edition(2021, &[("oscar", "best picture"), ("oscar", "best sound")]),
                edition(2022, &[("honorary", "honorary")]),
            ],
        };
        let stats = FilterStats::from_event(&event);
        assert_eq!(stats.awards["oscar"], labels(&[2020, 2021]));
        assert_eq!(stats.categories["best sound"], labels(&[2021]));

        let filters = EventFilters {
            years: known(&["2022", "2021", "2020"]),
            awards: vec!["honorary".into(), "oscar".into(), "retired".into()],
            categories: vec!["best picture".into()],
        };
        let comments = annotate(&filters, &stats);
        assert_eq!(
            comments.awards,
            vec!["1 Event: 2022", "2 Events: 2020-2021", NO_EVENTS]
        );
        assert_eq!(comments.categories, vec!["2 Events: 2020-2021"]);
    }
}
