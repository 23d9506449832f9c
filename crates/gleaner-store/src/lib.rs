//! Gleaner Dataset Store
//!
//! File-backed persistence for event datasets: one YAML sequence per category
//! (`activities.yml`, `competitions.yml`, `conferences.yml`) under a data
//! directory.
//!
//! # Operations
//!
//! - [`DatasetStore::load`]: read a category's records; a missing file is an
//!   empty dataset
//! - [`upsert`]: dedup an incoming record by sub-event id and merge it into
//!   the in-memory dataset
//! - [`DatasetStore::save`]: overwrite the category file with the full dataset
//! - [`DatasetStore::known_hints`]: tags and ids across all files, used as
//!   prompt hints
//!
//! # Examples
//!
//! ```no_run
//! use gleaner_domain::{Category, MergeOutcome};
//! use gleaner_store::{upsert, DatasetStore};
//!
//! # fn example(record: gleaner_domain::EventRecord) -> Result<(), gleaner_store::StoreError> {
//! let store = DatasetStore::new("data");
//! let mut dataset = store.load(Category::Conference)?;
//! if upsert(&mut dataset, record) != MergeOutcome::AllDuplicate {
//!     store.save(Category::Conference, &dataset)?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod merge;
mod store;

pub use error::StoreError;
pub use merge::upsert;
pub use store::{render, render_record, DatasetStore, KnownHints};
