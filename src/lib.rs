//! rinkside — play-by-play hockey data behind a JSON API.
//!
//! The core is the [`data`] layer (load, normalize, filter) plus the
//! [`cache::DatasetCache`] that memoizes the normalized table and the
//! [`query::QueryEngine`] that answers filter and aggregate requests over
//! it. [`api`] is a thin axum router on top.

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod team;

pub use cache::DatasetCache;
pub use data::filter::{EventFilter, EventQuery};
pub use data::loader::{CsvSource, RawSource};
pub use data::model::{CanonicalRow, CanonicalTable, RawRow};
pub use error::{EngineError, EngineResult};
pub use query::QueryEngine;
