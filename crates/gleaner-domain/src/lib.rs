//! Gleaner Domain Layer
//!
//! This crate contains the data model shared by every other Gleaner crate.
//! It holds no I/O: fetching, model calls, validation and persistence live in
//! their own crates and only exchange the types defined here.
//!
//! ## Key Concepts
//!
//! - **Event Record**: one conference, competition or activity
//! - **Sub-Event**: a dated round, deadline or track of a record; its `id` is
//!   the dedup key of a dataset
//! - **Candidate Record**: the untrusted shape a model produces, before
//!   validation turns it into an Event Record
//! - **Dataset**: every record of one category, persisted as one file
//!
//! ## Architecture
//!
//! - Pure data and small pure helpers only
//! - Trait definitions for external interactions (model providers)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod category;
pub mod dataset;
pub mod record;
pub mod tags;
pub mod traits;

// Re-exports for convenience
pub use candidate::{CandidateMilestone, CandidateRecord, CandidateSubEvent};
pub use category::Category;
pub use dataset::{Dataset, MergeOutcome};
pub use record::{EventRecord, Milestone, SubEvent, DATE_FORMAT, DATETIME_FORMAT};
pub use tags::{merge_tags, normalize_tag, normalize_tags, normalize_title};
