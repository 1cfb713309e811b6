//! Filter & sort engine over enriched events.
//!
//! [`apply`] keeps the events that satisfy every set field of a
//! [`FilterSet`], then stable-sorts the survivors by a [`SortKey`]. Equal
//! keys keep their input order, so output is deterministic for a given
//! input.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{EnrichedEvent, Period, Scale, UnknownLabel};

/// Equality constraints over event metadata. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSet {
    /// Compared case-insensitively with `metadata.country`.
    pub country: Option<String>,
    /// Compared case-insensitively with `metadata.category`.
    pub category: Option<String>,
    pub scale: Option<Scale>,
    pub period: Option<Period>,
}

impl FilterSet {
    /// True if no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.normalized() == FilterSet::default()
    }

    /// Trim string fields and treat empty strings as unset.
    pub fn normalized(&self) -> FilterSet {
        fn norm(v: &Option<String>) -> Option<String> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }
        FilterSet {
            country: norm(&self.country),
            category: norm(&self.category),
            scale: self.scale,
            period: self.period,
        }
    }

    /// Whether `event` satisfies every set field.
    pub fn matches(&self, event: &EnrichedEvent) -> bool {
        let meta = &event.metadata;
        let text_eq = |want: &Option<String>, have: &str| match want.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(w) => w.to_lowercase() == have.to_lowercase(),
        };
        text_eq(&self.country, &meta.country)
            && text_eq(&self.category, meta.category.as_str())
            && self.scale.map_or(true, |s| s == meta.scale)
            && self.period.map_or(true, |p| p == meta.period)
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Source order, untouched.
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "year-asc")]
    YearAscending,
    #[serde(rename = "year-desc")]
    YearDescending,
    #[serde(rename = "importance-desc")]
    ImportanceDescending,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::YearAscending => "year-asc",
            SortKey::YearDescending => "year-desc",
            SortKey::ImportanceDescending => "importance-desc",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            SortKey::Relevance,
            SortKey::YearAscending,
            SortKey::YearDescending,
            SortKey::ImportanceDescending,
        ]
        .into_iter()
        .find(|k| k.as_str() == s.trim())
        .ok_or_else(|| UnknownLabel {
            kind: "sort key",
            value: s.to_string(),
        })
    }
}

/// Filter then stable-sort `events`.
pub fn apply(events: &[EnrichedEvent], filters: &FilterSet, sort: SortKey) -> Vec<EnrichedEvent> {
    let mut out: Vec<EnrichedEvent> = events
        .iter()
        .filter(|e| filters.matches(e))
        .cloned()
        .collect();
    sort_events(&mut out, sort);
    out
}

/// Stable in-place sort. [`SortKey::Relevance`] leaves the order as is.
pub fn sort_events(events: &mut [EnrichedEvent], sort: SortKey) {
    match sort {
        SortKey::Relevance => {}
        SortKey::YearAscending => events.sort_by_key(|e| e.year()),
        SortKey::YearDescending => events.sort_by(|a, b| b.year().cmp(&a.year())),
        SortKey::ImportanceDescending => {
            events.sort_by(|a, b| b.metadata.importance.cmp(&a.metadata.importance))
        }
    }
}
