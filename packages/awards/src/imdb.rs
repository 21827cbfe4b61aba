//! IMDb event page parsing.
//!
//! Two pages are read per event:
//! - the overview page (`/event/{id}`), listing the event name and all
//!   editions it has had
//! - one page per edition (`/event/{id}/{year}/{instance}/`), listing the
//!   awards, their categories and every nomination

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{event_path, event_year_path, BASE_URL};
use crate::error::Result;
use crate::http::{fetch_page_props, Throttle};
use crate::types::{EventSummary, Nomination, YearLabel};

/// Source of event data.
///
/// The scraping run only talks to IMDb through this trait.
pub trait AwardsSource {
    /// Fetch the display name and edition labels of an event.
    fn event_summary(&mut self, event_id: &str) -> Result<EventSummary>;

    /// Fetch the category rows of one edition.
    fn year_detail(&mut self, event_id: &str, label: &YearLabel) -> Result<Vec<Nomination>>;
}

/// [`AwardsSource`] backed by the IMDb website.
pub struct ImdbSource {
    client: Client,
    base_url: String,
    throttle: Throttle,
}

impl ImdbSource {
    pub fn new(client: Client, throttle: Throttle) -> Self {
        Self::with_base_url(client, throttle, BASE_URL)
    }

    /// Point the source at another host (used against mock servers).
    pub fn with_base_url(client: Client, throttle: Throttle, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            throttle,
        }
    }
}

impl AwardsSource for ImdbSource {
    fn event_summary(&mut self, event_id: &str) -> Result<EventSummary> {
        let url = format!("{}{}", self.base_url, event_path(event_id));
        let props = fetch_page_props(&self.client, &url, &self.throttle)?;
        parse_event_summary(props)
    }

    fn year_detail(&mut self, event_id: &str, label: &YearLabel) -> Result<Vec<Nomination>> {
        let url = format!("{}{}", self.base_url, event_year_path(event_id, label));
        let props = fetch_page_props(&self.client, &url, &self.throttle)?;
        parse_year_detail(props)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPage {
    event_name: String,
    history_event_editions: Vec<EditionRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditionRef {
    year: u32,
    instance_within_year: u32,
}

#[derive(Debug, Deserialize)]
struct EditionPage {
    edition: EditionDetail,
}

#[derive(Debug, Deserialize)]
struct EditionDetail {
    awards: Vec<AwardNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwardNode {
    text: String,
    nomination_categories: Connection<CategoryNode>,
}

/// GraphQL-style edge list.
#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct CategoryNode {
    category: Option<TextNode>,
    nominations: Connection<NominationNode>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NominationNode {
    #[serde(default)]
    is_winner: bool,
    awarded_entities: AwardedEntities,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwardedEntities {
    award_titles: Option<Vec<AwardTitle>>,
    secondary_award_titles: Option<Vec<AwardTitle>>,
}

impl AwardedEntities {
    /// Titles credited by this nomination.
    ///
    /// `awardTitles` wins whenever present; `secondaryAwardTitles` is only
    /// consulted when the primary list is absent and it has entries.
    fn titles(&self) -> &[AwardTitle] {
        match (&self.award_titles, &self.secondary_award_titles) {
            (Some(primary), _) => primary,
            (None, Some(secondary)) if !secondary.is_empty() => secondary,
            _ => &[],
        }
    }
}

#[derive(Debug, Deserialize)]
struct AwardTitle {
    title: Option<TitleRef>,
}

#[derive(Debug, Deserialize)]
struct TitleRef {
    id: Option<String>,
}

/// Parse the overview page props of an event.
pub fn parse_event_summary(props: Value) -> Result<EventSummary> {
    let page: EventPage = serde_json::from_value(props)?;
    let years = page
        .history_event_editions
        .iter()
        .map(|e| YearLabel::new(e.year, e.instance_within_year))
        .collect();
    Ok(EventSummary {
        name: page.event_name,
        years,
    })
}

/// Parse the edition page props into category rows.
///
/// Names are lowercased. A category without its own label takes the award
/// name. The ID lists of each row are sorted.
pub fn parse_year_detail(props: Value) -> Result<Vec<Nomination>> {
    let page: EditionPage = serde_json::from_value(props)?;
    let mut rows = Vec::new();

    for award in page.edition.awards {
        let award_name = award.text.to_lowercase();

        for Edge { node: category } in award.nomination_categories.edges {
            let category_name = match &category.category {
                Some(c) => c.text.to_lowercase(),
                None => award_name.clone(),
            };

            let mut nominees = Vec::new();
            let mut winners = Vec::new();
            for Edge { node: nomination } in &category.nominations.edges {
                let ids = nomination
                    .awarded_entities
                    .titles()
                    .iter()
                    .filter_map(|t| t.title.as_ref().and_then(|t| t.id.clone()))
                    .filter(|id| !id.is_empty());
                for id in ids {
                    if nomination.is_winner {
                        winners.push(id.clone());
                    }
                    nominees.push(id);
                }
            }
            nominees.sort();
            winners.sort();

            tracing::trace!(
                award = %award_name,
                category = %category_name,
                nominees = nominees.len(),
                winners = winners.len(),
                "Parsed category"
            );

            rows.push(Nomination {
                award: award_name.clone(),
                category: category_name,
                nominees,
                winners,
            });
        }
    }

    Ok(rows)
}
