//! The fetch → extract → validate → load → upsert → save pipeline
//!
//! Both drivers run the same stages; they differ only in how a plan is
//! confirmed. Nothing is written unless every earlier stage succeeded.

use crate::error::ExtractorError;
use crate::extractor::{ExtractionRequest, Extractor};
use gleaner_domain::traits::LlmProvider;
use gleaner_domain::{Category, Dataset, EventRecord, MergeOutcome, SubEvent};
use gleaner_fetch::{FetchError, Fetcher, Source};
use gleaner_gatekeeper::{Gatekeeper, ValidationError};
use gleaner_store::{upsert, DatasetStore, StoreError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// A failure in any pipeline stage
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Content could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The model call or its reply failed
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// The candidate broke a record rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Dataset files could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Stage name for reports: fetch, extraction, validation or store
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Extraction(_) => "extraction",
            PipelineError::Validation(_) => "validation",
            PipelineError::Store(_) => "store",
        }
    }
}

/// A validated record merged into an in-memory copy of its dataset, not yet saved
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// The validated record
    pub record: EventRecord,

    /// Dataset after the upsert
    pub dataset: Dataset,

    /// Result of the upsert
    pub outcome: MergeOutcome,

    /// Sub-events the upsert added
    pub new_events: usize,

    /// The record's sub-events whose ids the dataset did not know yet
    pub fresh_events: Vec<SubEvent>,

    /// File the dataset lives in
    pub file: PathBuf,
}

impl MergePlan {
    /// Category of the record and dataset
    pub fn category(&self) -> Category {
        self.record.category
    }

    /// The record as it will land in the dataset, with only its fresh sub-events
    pub fn preview(&self) -> EventRecord {
        EventRecord {
            events: self.fresh_events.clone(),
            ..self.record.clone()
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The validated record
    pub record: EventRecord,

    /// Result of the upsert
    pub outcome: MergeOutcome,

    /// Sub-events added to the dataset
    pub new_events: usize,

    /// Dataset file
    pub file: PathBuf,

    /// Whether the file was written
    pub saved: bool,
}

/// Wires fetcher, extractor, validator and store together
pub struct Pipeline<L: LlmProvider> {
    fetcher: Fetcher,
    extractor: Extractor<L>,
    gatekeeper: Gatekeeper,
    store: DatasetStore,
}

impl<L: LlmProvider> Pipeline<L> {
    /// Create a pipeline from its parts
    pub fn new(
        fetcher: Fetcher,
        extractor: Extractor<L>,
        gatekeeper: Gatekeeper,
        store: DatasetStore,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            gatekeeper,
            store,
        }
    }

    /// The extractor, for its provider and configuration
    pub fn extractor(&self) -> &Extractor<L> {
        &self.extractor
    }

    /// The dataset store
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Fetch, extract and validate one source
    pub async fn extract(&self, source: &Source) -> Result<EventRecord, PipelineError> {
        let content = self.fetcher.fetch(source).await?;
        let hints = self.store.known_hints()?;

        let source_label = source.to_string();
        let candidate = self
            .extractor
            .extract(ExtractionRequest {
                content: &content,
                source_url: source.url().map(|url| url.as_str()),
                source_label: &source_label,
                hints: &hints,
            })
            .await?;

        let record = self.gatekeeper.validate(candidate)?;
        info!("Validated '{}' ({})", record.title, record.category);
        Ok(record)
    }

    /// Load the record's dataset and upsert into it, without saving
    pub fn plan(&self, record: EventRecord) -> Result<MergePlan, PipelineError> {
        let category = record.category;
        let mut dataset = self.store.load(category)?;

        let fresh_events: Vec<SubEvent> = {
            let known = dataset.known_ids();
            record
                .events
                .iter()
                .filter(|e| !known.contains(e.id.as_str()))
                .cloned()
                .collect()
        };

        let before = event_count(&dataset);
        let outcome = upsert(&mut dataset, record.clone());
        let new_events = event_count(&dataset) - before;

        Ok(MergePlan {
            record,
            dataset,
            outcome,
            new_events,
            fresh_events,
            file: self.store.path_for(category),
        })
    }

    /// Save a plan's dataset; an `AllDuplicate` plan leaves the file untouched
    pub fn commit(&self, plan: MergePlan) -> Result<PipelineReport, PipelineError> {
        let saved = if plan.outcome.is_change() {
            self.store.save(plan.category(), &plan.dataset)?;
            true
        } else {
            info!("All sub-events of '{}' already exist, nothing to write", plan.record.title);
            false
        };

        Ok(PipelineReport {
            record: plan.record,
            outcome: plan.outcome,
            new_events: plan.new_events,
            file: plan.file,
            saved,
        })
    }

    /// Run every stage; with `save` false the outcome is computed but not written
    pub async fn run(&self, source: &Source, save: bool) -> Result<PipelineReport, PipelineError> {
        let record = self.extract(source).await?;
        let plan = self.plan(record)?;
        info!("Upsert outcome for '{}': {}", plan.record.title, plan.outcome);

        if save {
            self.commit(plan)
        } else {
            Ok(PipelineReport {
                record: plan.record,
                outcome: plan.outcome,
                new_events: plan.new_events,
                file: plan.file,
                saved: false,
            })
        }
    }
}

fn event_count(dataset: &Dataset) -> usize {
    dataset.records().iter().map(|r| r.events.len()).sum()
}
