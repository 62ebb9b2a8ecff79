//! Kinetyk query engine.
//!
//! Read-only operations over the last persisted snapshot: list, get-by-id,
//! batch, search, and facets, with conjunctive filters, field projection,
//! and pagination. Independent of the write path at request time — the
//! snapshot is loaded once and shared immutably.
//!
//! # Modules
//!
//! - [`snapshot`]: loading the persisted aggregate into memory
//! - [`engine`]: the query operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod snapshot;

pub use engine::{
    CategoryFacet, ExerciseFilter, FacetEntry, PageMeta, PageParams, PageResult, QueryEngine,
};
pub use snapshot::Snapshot;
