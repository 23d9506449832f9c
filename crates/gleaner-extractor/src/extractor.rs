//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::ids::assign_missing_ids;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use gleaner_domain::traits::LlmProvider;
use gleaner_domain::CandidateRecord;
use gleaner_store::KnownHints;
use tokio::time::timeout;
use tracing::{debug, info};

/// Input for one extraction
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    /// Readable text of the source
    pub content: &'a str,

    /// Page URL, when the content came from the web
    pub source_url: Option<&'a str>,

    /// URL or path; feeds derived sub-event ids
    pub source_label: &'a str,

    /// Tags and ids already present in the datasets
    pub hints: &'a KnownHints,
}

/// Turns fetched text into a candidate record with one model call
pub struct Extractor<L: LlmProvider> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L: LlmProvider> Extractor<L> {
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// The provider in use
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a candidate record from text
    ///
    /// Sub-events the model left without an id get a derived one.
    pub async fn extract(
        &self,
        request: ExtractionRequest<'_>,
    ) -> Result<CandidateRecord, ExtractorError> {
        info!(
            "Extracting from '{}' ({} chars) with model '{}'",
            request.source_label,
            request.content.chars().count(),
            self.llm_provider.model_name()
        );

        let chat = PromptBuilder::new(request.content)
            .with_source_url(request.source_url)
            .with_hints(&request.hints.tags, &request.hints.ids)
            .with_hint_limits(self.config.tag_hint_limit, self.config.id_hint_limit)
            .with_max_content_chars(self.config.max_content_chars)
            .with_temperature(self.config.temperature)
            .build();

        debug!("Prompt length: {} chars", chat.system.len() + chat.user.len());

        let response = timeout(self.config.extraction_timeout(), self.llm_provider.complete(&chat))
            .await
            .map_err(|_| ExtractorError::Timeout(self.config.extraction_timeout_secs))?
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let mut candidate = parse_llm_response(&response)?;
        let derived = assign_missing_ids(&mut candidate, request.source_label);
        if derived > 0 {
            debug!("Derived {} sub-event ids", derived);
        }

        info!(
            "Extracted '{}' ({}) with {} sub-events",
            candidate.title,
            candidate.category,
            candidate.events.len()
        );
        Ok(candidate)
    }
}
