//! Dealdesk Core Library
//!
//! Domain models, entity store and the cross-entity relation graph for the
//! dealership operations tracker.
//!
//! The relation graph is the heart of the crate: a schema registry declaring
//! every legal edge kind between record kinds, link/unlink/cascade-delete
//! operations that keep both endpoints reciprocal, and a candidate query
//! engine that derives "linked" and "available to link" sets for the UI.

pub mod entities;
pub mod error;
pub mod relations;
pub mod snapshot;
pub mod store;

pub use error::{DeskError, DeskResult};
