//! Core data models used throughout This Day.
//!
//! These types represent the raw events produced by an event source and the
//! enriched events that flow through filtering, sorting, and display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A link to the encyclopedia article attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub extract: String,
    pub url: String,
}

/// Raw event as produced by an event source, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Calendar year. Negative for BCE.
    pub year: i64,
    pub text: String,
    #[serde(default)]
    pub pages: Vec<PageRef>,
}

impl RawEvent {
    pub fn new(year: i64, text: impl Into<String>) -> Self {
        Self {
            year,
            text: text.into(),
            pages: Vec::new(),
        }
    }

    pub fn with_page(mut self, extract: impl Into<String>, url: impl Into<String>) -> Self {
        self.pages.push(PageRef {
            extract: extract.into(),
            url: url.into(),
        });
        self
    }

    /// The first linked article, if any.
    pub fn primary_page(&self) -> Option<&PageRef> {
        self.pages.first()
    }
}

/// Read a year from either `1863` or `"1863"`.
///
/// This is the only place a wire year is interpreted; sources call it on
/// the raw JSON value and skip events it rejects.
pub fn parse_year(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Error returned when a label does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

labelled_enum! {
    /// Thematic category of an event.
    Category, "category" {
        War => "war",
        Politics => "politics",
        Science => "science",
        Art => "art",
        Literature => "literature",
        Music => "music",
        Sport => "sport",
        Other => "other",
    }
}

labelled_enum! {
    /// Coarse geographic/political reach of an event.
    Scale, "scale" {
        Global => "global",
        Regional => "regional",
        National => "national",
        Local => "local",
    }
}

labelled_enum! {
    /// Historical era bucket derived from the event year.
    Period, "period" {
        Ancient => "ancient",
        Medieval => "medieval",
        Renaissance => "renaissance",
        Modern => "modern",
        Contemporary => "contemporary",
    }
}

/// Country label used when no country keyword matches.
pub const UNKNOWN_COUNTRY: &str = "unknown";

/// Derived metadata attached to each event by the enricher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub category: Category,
    /// Lowercase canonical country name, or [`UNKNOWN_COUNTRY`].
    pub country: String,
    pub scale: Scale,
    pub period: Period,
    /// Salience score in `1..=5`.
    pub importance: u8,
}

/// A raw event together with its derived metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: RawEvent,
    pub metadata: Metadata,
}

impl EnrichedEvent {
    pub fn year(&self) -> i64 {
        self.event.year
    }
}
