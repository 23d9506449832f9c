//! Gleaner Extractor
//!
//! Converts fetched text into a validated event record with one model call,
//! and runs the whole pipeline shared by both command-line drivers.
//!
//! # Architecture
//!
//! ```text
//! Source → Fetcher → text → Extractor → LLM → CandidateRecord
//!        → Gatekeeper → EventRecord → upsert → DatasetStore
//! ```
//!
//! # Key Features
//!
//! - **Prompting**: schema instructions plus tags and ids already in the
//!   datasets as deduplication hints; content capped in characters
//! - **Tolerant parsing**: markdown fences stripped, one JSON object expected
//! - **Deterministic ids**: sub-events without an id get a stable derived one
//! - **Bounded**: the model call has a timeout and is never retried
//!
//! # Example Usage
//!
//! ```no_run
//! use gleaner_extractor::{Extractor, ExtractorConfig, Pipeline};
//! use gleaner_fetch::{FetchConfig, Fetcher, Source};
//! use gleaner_gatekeeper::Gatekeeper;
//! use gleaner_llm::MockProvider;
//! use gleaner_store::DatasetStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(
//!     Fetcher::new(FetchConfig::default())?,
//!     Extractor::new(MockProvider::default(), ExtractorConfig::default()),
//!     Gatekeeper::default_config(),
//!     DatasetStore::new("data"),
//! );
//!
//! let report = pipeline.run(&Source::parse("https://example.com/event")?, true).await?;
//! println!("{}: {}", report.record.title, report.outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod ids;
mod parser;
mod pipeline;
mod prompt;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{ExtractionRequest, Extractor};
pub use ids::{derive_sub_event_id, SubEventKey};
pub use parser::parse_llm_response;
pub use pipeline::{MergePlan, Pipeline, PipelineError, PipelineReport};
pub use prompt::PromptBuilder;
