//! Command implementations.

pub mod ci;
pub mod extract;

pub use self::ci::{execute_ci, run_ci, CiReport};
pub use self::extract::execute_extract;

use crate::config::Config;
use crate::error::Result;
use gleaner_extractor::{Extractor, Pipeline};
use gleaner_fetch::Fetcher;
use gleaner_gatekeeper::{Gatekeeper, ValidationConfig};
use gleaner_llm::Provider;
use gleaner_store::DatasetStore;

/// Wire a pipeline from resolved configuration.
///
/// Fails before any network call when the data directory is missing or the
/// provider's credential is not set.
pub fn build_pipeline(config: &Config, strict: bool) -> Result<Pipeline<Provider>> {
    let data_dir = config.existing_data_dir()?;
    let provider_config = config.active_provider_config()?;
    let provider = Provider::from_config(&config.active_provider, &provider_config)?;

    let validation = if strict {
        ValidationConfig::strict()
    } else {
        config.validation.clone()
    };

    Ok(Pipeline::new(
        Fetcher::new(config.fetch.clone())?,
        Extractor::new(provider, config.extractor.clone()),
        Gatekeeper::new(validation),
        DatasetStore::new(data_dir),
    ))
}
