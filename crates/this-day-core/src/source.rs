//! Event source abstraction.
//!
//! An [`EventSource`] answers one question: which events happened on a
//! given day and month. The remote feed has no year parameter, so the
//! optional year is applied here, after the fetch, by [`fetch`]. Every
//! source (remote or built-in) goes through the same post-filter.
//!
//! Sources perform no retries; a failed fetch is reported once and the
//! caller decides what to do.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::models::RawEvent;
use crate::query::SearchQuery;

/// A provider of raw "on this day" events.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use this_day_core::models::RawEvent;
/// use this_day_core::source::EventSource;
/// use this_day_core::SearchError;
///
/// pub struct StaticSource(Vec<RawEvent>);
///
/// #[async_trait]
/// impl EventSource for StaticSource {
///     fn name(&self) -> &str { "static" }
///
///     async fn fetch_day(&self, _day: u8, _month: u8) -> Result<Vec<RawEvent>, SearchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Short label used in logs (e.g. `"wikipedia"`, `"fallback"`).
    fn name(&self) -> &str;

    /// All events recorded for `day`/`month`, any year.
    async fn fetch_day(&self, day: u8, month: u8) -> Result<Vec<RawEvent>, SearchError>;
}

/// Fetch events for `query`, applying the year post-filter if set.
pub async fn fetch<S: EventSource + ?Sized>(
    source: &S,
    query: &SearchQuery,
) -> Result<Vec<RawEvent>, SearchError> {
    let events = source.fetch_day(query.day(), query.month()).await?;
    tracing::debug!(
        source = source.name(),
        count = events.len(),
        "fetched events for {}",
        query.fallback_key()
    );
    Ok(filter_by_year(events, query.year()))
}

/// Keep only events from `year`, or everything when `year` is `None`.
pub fn filter_by_year(events: Vec<RawEvent>, year: Option<i64>) -> Vec<RawEvent> {
    match year {
        Some(y) => events.into_iter().filter(|e| e.year == y).collect(),
        None => events,
    }
}

/// Which source produced a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Primary,
    Fallback,
}

/// Fetch from `primary`, switching to `fallback` only when the primary is
/// confirmed unavailable.
///
/// A malformed primary response is reported as-is: the source was reached,
/// so the built-in dataset would hide a real problem.
pub async fn fetch_with_fallback(
    primary: &dyn EventSource,
    fallback: Option<&dyn EventSource>,
    query: &SearchQuery,
) -> Result<(Vec<RawEvent>, Origin), SearchError> {
    match fetch(primary, query).await {
        Ok(events) => Ok((events, Origin::Primary)),
        Err(SearchError::SourceUnavailable(detail)) => match fallback {
            Some(fb) => {
                tracing::warn!(
                    primary = primary.name(),
                    fallback = fb.name(),
                    error = %detail,
                    "primary source unavailable, using fallback"
                );
                let events = fetch(fb, query).await?;
                Ok((events, Origin::Fallback))
            }
            None => Err(SearchError::SourceUnavailable(detail)),
        },
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<Vec<RawEvent>, SearchError>);

    #[async_trait]
    impl EventSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_day(&self, _day: u8, _month: u8) -> Result<Vec<RawEvent>, SearchError> {
            self.0.clone()
        }
    }

    fn batch() -> Vec<RawEvent> {
        vec![
            RawEvent::new(1863, "a"),
            RawEvent::new(1942, "b"),
            RawEvent::new(1863, "c"),
        ]
    }

    fn query(year: Option<i64>) -> SearchQuery {
        SearchQuery::new(Some(1), Some(1), year).unwrap()
    }

    #[tokio::test]
    async fn test_year_post_filter() {
        let src = FixedSource(Ok(batch()));
        let all = fetch(&src, &query(None)).await.unwrap();
        assert_eq!(all.len(), 3);
        let only = fetch(&src, &query(Some(1863))).await.unwrap();
        let texts: Vec<&str> = only.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert!(fetch(&src, &query(Some(2000))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_used_when_unavailable() {
        let primary = FixedSource(Err(SearchError::SourceUnavailable("down".into())));
        let fallback = FixedSource(Ok(batch()));
        let fb: &dyn EventSource = &fallback;
        let (events, origin) = fetch_with_fallback(&primary, Some(fb), &query(Some(1942)))
            .await
            .unwrap();
        assert_eq!(origin, Origin::Fallback);
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_does_not_fall_back() {
        let primary = FixedSource(Err(SearchError::SourceMalformed("bad json".into())));
        let fallback = FixedSource(Ok(batch()));
        let fb: &dyn EventSource = &fallback;
        let err = fetch_with_fallback(&primary, Some(fb), &query(None))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::SourceMalformed(_)));
    }

    #[tokio::test]
    async fn test_unavailable_without_fallback() {
        let primary = FixedSource(Err(SearchError::SourceUnavailable("down".into())));
        let err = fetch_with_fallback(&primary, None, &query(None)).await.unwrap_err();
        assert!(matches!(err, SearchError::SourceUnavailable(_)));
    }
}
