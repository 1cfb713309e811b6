//! # This Day Core
//!
//! Shared, WASM-safe logic for This Day: event models, keyword tables,
//! enrichment heuristics, the filter/sort engine, the UI state store, and
//! the pure application-state/view model.
//!
//! This crate contains no tokio, reqwest, filesystem I/O, or other
//! native-only dependencies. Fetching events and persisting state are
//! reached through the [`source::EventSource`] and
//! [`store::KeyValueStore`] traits.

pub mod app;
pub mod enrich;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod keywords;
pub mod models;
pub mod query;
pub mod source;
pub mod store;
pub mod text;
pub mod view;

pub use error::SearchError;
