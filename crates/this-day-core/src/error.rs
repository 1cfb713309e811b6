//! Error taxonomy for a search.
//!
//! An empty result is not an error; it is the [`crate::view::View::Empty`]
//! state.

/// Failures that can end a search before events are displayed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Day or month missing or out of range. Raised before any fetch.
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// Transport failure or a non-success response from the source.
    #[error("event source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source responded but the payload did not have the expected shape.
    #[error("malformed response from event source: {0}")]
    SourceMalformed(String),
}

impl SearchError {
    /// The message shown to the user. Source failures share one generic
    /// message with a retry hint; the detail goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::InputInvalid(msg) => format!("Проверьте дату: {msg}"),
            Self::SourceUnavailable(_) | Self::SourceMalformed(_) => {
                "Не удалось загрузить события. Проверьте подключение к интернету и попробуйте ещё раз."
                    .to_string()
            }
        }
    }
}
