//! Data models for scatter-brain.
//!
//! Defines the entities persisted by the storage layer and the
//! read-side composite returned for labelled thoughts.

mod label;
mod thought;

pub use label::*;
pub use thought::*;
