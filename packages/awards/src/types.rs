//! Core data types for the scraper.
//!
//! These types describe award events as stored in the per-event YAML files:
//! year editions holding awards, which hold categories, which hold the IMDb
//! IDs of nominees and winners.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AwardsError;

/// Label of one edition of an event.
///
/// The first edition within a calendar year is labelled by the bare year
/// (`2024`); later editions in the same year get the instance appended
/// (`1930-2`). Labels order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearLabel {
    year: u32,
    instance: u32,
}

impl YearLabel {
    /// Create a label from a year and its instance within that year.
    #[must_use]
    pub fn new(year: u32, instance: u32) -> Self {
        Self { year, instance }
    }

    #[must_use]
    pub fn year(&self) -> u32 {
        self.year
    }

    #[must_use]
    pub fn instance(&self) -> u32 {
        self.instance
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance == 1 {
            write!(f, "{}", self.year)
        } else {
            write!(f, "{}-{}", self.year, self.instance)
        }
    }
}

impl FromStr for YearLabel {
    type Err = AwardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AwardsError::InvalidYearLabel(s.to_string());
        let (year, instance) = match s.split_once('-') {
            Some((year, instance)) => (year, Some(instance)),
            None => (s, None),
        };
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let instance = match instance {
            Some(i) => match i.parse::<u32>() {
                Ok(n) if n > 1 => n,
                _ => return Err(invalid()),
            },
            None => 1,
        };
        Ok(Self { year, instance })
    }
}

/// Nominees and winners of one category, as IMDb title IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub nominee: Vec<String>,
    #[serde(default)]
    pub winner: Vec<String>,
}

impl CategoryRecord {
    /// Append a nominee unless it is already listed.
    pub fn add_nominee(&mut self, id: &str) {
        if !self.nominee.iter().any(|n| n == id) {
            self.nominee.push(id.to_string());
        }
    }

    /// Append a winner unless it is already listed.
    pub fn add_winner(&mut self, id: &str) {
        if !self.winner.iter().any(|w| w == id) {
            self.winner.push(id.to_string());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nominee.is_empty() && self.winner.is_empty()
    }
}

/// One category row of an edition as read from IMDb.
///
/// Award and category names are already lowercased; the ID lists are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nomination {
    pub award: String,
    pub category: String,
    pub nominees: Vec<String>,
    pub winners: Vec<String>,
}

/// An award with its categories, sorted by category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    pub name: String,
    pub categories: BTreeMap<String, CategoryRecord>,
}

/// All awards of one edition, in the order IMDb lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearAwards {
    awards: Vec<Award>,
}

impl YearAwards {
    /// Build awards from raw category rows.
    ///
    /// Rows without nominees and winners are dropped, so an award only
    /// appears when at least one of its categories has an entry. Repeated
    /// rows for the same award/category merge without duplicating IDs.
    /// An award name listed twice in one edition is merged into a single
    /// award holding the categories of both; neither listing replaces the other.
    pub fn from_nominations(rows: impl IntoIterator<Item = Nomination>) -> Self {
        let mut awards = Self::default();
        for row in rows {
            if row.nominees.is_empty() && row.winners.is_empty() {
                continue;
            }
            let record = awards
                .award_mut(&row.award)
                .categories
                .entry(row.category)
                .or_default();
            for id in &row.nominees {
                record.add_nominee(id);
            }
            for id in &row.winners {
                record.add_winner(id);
            }
        }
        awards
    }

    fn award_mut(&mut self, name: &str) -> &mut Award {
        let idx = match self.awards.iter().position(|a| a.name == name) {
            Some(idx) => idx,
            None => {
                self.awards.push(Award {
                    name: name.to_string(),
                    categories: BTreeMap::new(),
                });
                self.awards.len() - 1
            }
        };
        &mut self.awards[idx]
    }

    /// Append an award as loaded from a stored file.
    pub fn push(&mut self, award: Award) {
        self.awards.push(award);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Award> {
        self.awards.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Award> {
        self.awards.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.awards.len()
    }
}

/// One edition of an event together with the URL it is scraped from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEdition {
    pub label: YearLabel,
    pub url: String,
    pub awards: YearAwards,
}

/// All stored editions of one event, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventYears {
    pub years: Vec<YearEdition>,
}

impl EventYears {
    #[must_use]
    pub fn get(&self, label: &YearLabel) -> Option<&YearEdition> {
        self.years.iter().find(|y| &y.label == label)
    }

    #[must_use]
    pub fn contains(&self, label: &YearLabel) -> bool {
        self.get(label).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Display name and edition labels of an event, from its overview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub name: String,
    pub years: Vec<YearLabel>,
}
