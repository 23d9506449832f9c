//! CI command implementation.
//!
//! Never prompts. Exactly one JSON object goes to stdout, logs go to stderr.

use crate::cli::{CiArgs, GlobalArgs};
use crate::commands::build_pipeline;
use crate::config::Config;
use crate::error::{CliError, Result};
use gleaner_extractor::PipelineReport;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use tracing::error;

/// Machine-readable result of a ci run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CiReport {
    /// Every stage passed
    Success {
        success: bool,
        title: String,
        category: String,
        outcome: String,
        new_events: usize,
        file: String,
        saved: bool,
    },
    /// A stage failed; nothing was written
    Failure {
        success: bool,
        stage: String,
        error: String,
    },
}

impl CiReport {
    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, CiReport::Success { .. })
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl From<PipelineReport> for CiReport {
    fn from(report: PipelineReport) -> Self {
        CiReport::Success {
            success: true,
            title: report.record.title,
            category: report.record.category.as_str().to_string(),
            outcome: report.outcome.as_str().to_string(),
            new_events: report.new_events,
            file: report.file.display().to_string(),
            saved: report.saved,
        }
    }
}

impl From<CliError> for CiReport {
    fn from(e: CliError) -> Self {
        let error = match &e {
            CliError::Pipeline(inner) => inner.to_string(),
            other => other.to_string(),
        };
        CiReport::Failure {
            success: false,
            stage: e.stage().to_string(),
            error,
        }
    }
}

/// Run the whole pipeline and describe the result; configuration problems
/// are reported the same way as stage failures.
pub async fn run_ci(args: &CiArgs, global: &GlobalArgs) -> CiReport {
    match try_run(args, global).await {
        Ok(report) => report.into(),
        Err(e) => {
            error!(stage = e.stage(), "ci run failed: {}", e);
            e.into()
        }
    }
}

async fn try_run(args: &CiArgs, global: &GlobalArgs) -> Result<PipelineReport> {
    let config = Config::resolve(global)?;
    let source = args.source.to_source()?;
    let pipeline = build_pipeline(&config, args.strict)?;
    Ok(pipeline.run(&source, !args.no_save).await?)
}

/// Execute the ci command.
pub async fn execute_ci(args: CiArgs, global: &GlobalArgs) -> Result<ExitCode> {
    let report = run_ci(&args, global).await;
    println!("{}", serde_json::to_string(&report)?);
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_extractor::PipelineError;
    use gleaner_fetch::FetchError;
    use serde_json::json;

    #[test]
    fn test_failure_shape() {
        let report = CiReport::from(CliError::Pipeline(PipelineError::Fetch(FetchError::Timeout(
            "https://example.com".to_string(),
        ))));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["stage"], json!("fetch"));
        assert!(value["error"].as_str().unwrap().contains("example.com"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_config_failure_stage() {
        let report =
            CiReport::from(CliError::Config("Data directory data does not exist".to_string()));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["stage"], json!("config"));
        assert_eq!(
            value["error"],
            json!("Configuration error: Data directory data does not exist")
        );
    }

    #[test]
    fn test_success_round_trips_as_success() {
        let report = CiReport::Success {
            success: true,
            title: "PyCon US 2024".to_string(),
            category: "conference".to_string(),
            outcome: "appended".to_string(),
            new_events: 1,
            file: "data/conferences.yml".to_string(),
            saved: true,
        };
        let text = serde_json::to_string(&report).unwrap();
        assert_eq!(serde_json::from_str::<CiReport>(&text).unwrap(), report);
    }
}
