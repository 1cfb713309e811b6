//! Presentation model: a pure function from [`AppState`] to what the user
//! should see.
//!
//! Front-ends (the CLI renderer, a browser shell) draw a [`View`] and never
//! look inside [`AppState`] themselves.

use serde::Serialize;

use crate::app::{AppState, Phase};
use crate::filter::{FilterSet, SortKey};
use crate::models::{Category, EnrichedEvent, Period, Scale};
use crate::query::SearchQuery;
use crate::source::Origin;
use crate::text::clean_text;

/// Shown when an event has no linked article.
pub const MISSING_DESCRIPTION: &str = "Описание недоступно";

/// One event as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub year: i64,
    /// Sanitized event text.
    pub title: String,
    /// Sanitized article extract, or [`MISSING_DESCRIPTION`].
    pub description: String,
    pub url: Option<String>,
    pub category: Category,
    pub country: String,
    pub scale: Scale,
    pub period: Period,
    pub importance: u8,
}

impl EventCard {
    pub fn from_event(e: &EnrichedEvent) -> Self {
        let page = e.event.primary_page();
        let description = page
            .map(|p| clean_text(&p.extract))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());
        let url = page.map(|p| p.url.clone()).filter(|u| !u.is_empty());
        Self {
            year: e.event.year,
            title: clean_text(&e.event.text),
            description,
            url,
            category: e.metadata.category,
            country: e.metadata.country.clone(),
            scale: e.metadata.scale,
            period: e.metadata.period,
            importance: e.metadata.importance,
        }
    }
}

/// Everything a front-end needs to draw the results area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum View {
    /// Nothing searched yet.
    Welcome,
    Loading {
        title: String,
    },
    Error {
        title: String,
        message: String,
    },
    /// A well-formed answer with nothing to show.
    Empty {
        title: String,
        message: String,
    },
    Results {
        title: String,
        /// Number of cards shown.
        count: usize,
        /// Size of the fetched batch before filtering.
        total: usize,
        /// True when the built-in dataset answered instead of the feed.
        offline: bool,
        filters: FilterSet,
        sort: SortKey,
        filters_collapsed: bool,
        cards: Vec<EventCard>,
    },
}

/// Heading for a query, e.g. `"События 1 января"`.
pub fn title_for(query: &SearchQuery) -> String {
    format!("События {}", query.date_label())
}

/// Derive the view for `state`.
pub fn render(state: &AppState) -> View {
    match state.phase() {
        Phase::Idle => View::Welcome,
        Phase::Loading { query, .. } => View::Loading {
            title: title_for(query),
        },
        Phase::Failed { query, error } => View::Error {
            title: title_for(query),
            message: error.user_message(),
        },
        Phase::Loaded { query, origin } => {
            let title = title_for(query);
            if state.visible().is_empty() {
                let message = if state.batch().is_empty() {
                    "На эту дату событий не найдено."
                } else {
                    "Ни одно событие не подходит под выбранные фильтры."
                };
                return View::Empty {
                    title,
                    message: message.to_string(),
                };
            }
            View::Results {
                title,
                count: state.visible().len(),
                total: state.batch().len(),
                offline: *origin == Origin::Fallback,
                filters: state.filters().clone(),
                sort: state.sort(),
                filters_collapsed: state.filters_collapsed(),
                cards: state.visible().iter().map(EventCard::from_event).collect(),
            }
        }
    }
}
