//! Validated search input.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Russian month names in the genitive case ("1 января").
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// A day/month (optionally year) that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    day: u8,
    month: u8,
    year: Option<i64>,
}

impl SearchQuery {
    /// Validate raw form input.
    ///
    /// Day must be in `1..=31`, month in `1..=12`, and year (if given)
    /// positive. Missing day or month is `InputInvalid`.
    pub fn new(day: Option<u8>, month: Option<u8>, year: Option<i64>) -> Result<Self, SearchError> {
        let day = day.ok_or_else(|| SearchError::InputInvalid("day is required".into()))?;
        let month = month.ok_or_else(|| SearchError::InputInvalid("month is required".into()))?;
        if !(1..=31).contains(&day) {
            return Err(SearchError::InputInvalid(format!(
                "day must be between 1 and 31, got {day}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(SearchError::InputInvalid(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if let Some(y) = year {
            if y < 1 {
                return Err(SearchError::InputInvalid(format!(
                    "year must be positive, got {y}"
                )));
            }
        }
        Ok(Self { day, month, year })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// Key used by the fallback dataset: `"month-day"`, e.g. `"1-1"`.
    pub fn fallback_key(&self) -> String {
        format!("{}-{}", self.month, self.day)
    }

    /// Human-readable date, e.g. `"1 января"` or `"9 мая 1945 года"`.
    pub fn date_label(&self) -> String {
        let month = MONTHS_GENITIVE[usize::from(self.month - 1)];
        match self.year {
            Some(y) => format!("{} {} {} года", self.day, month, y),
            None => format!("{} {}", self.day, month),
        }
    }
}
