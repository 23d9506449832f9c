//! Extract command implementation.
//!
//! Shows the record before anything is written and asks for confirmation
//! unless `--yes` is given.

use crate::cli::ExtractArgs;
use crate::commands::build_pipeline;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use gleaner_domain::MergeOutcome;
use gleaner_extractor::Pipeline;
use gleaner_fetch::Source;
use gleaner_llm::Provider;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<ExitCode> {
    let source = args.source.to_source()?;
    let pipeline = build_pipeline(config, args.strict)?;

    let mut editor = if args.yes { None } else { Some(DefaultEditor::new()?) };

    loop {
        match attempt(&pipeline, &source, editor.as_mut(), formatter).await {
            Ok(()) => return Ok(ExitCode::SUCCESS),
            Err(e) => {
                eprintln!("{}", formatter.error(&e.to_string()));
                let retry = match editor.as_mut() {
                    Some(editor) => confirm(editor, "Try again? (y/n) ")?,
                    None => false,
                };
                if !retry {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
}

async fn attempt(
    pipeline: &Pipeline<Provider>,
    source: &Source,
    editor: Option<&mut DefaultEditor>,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info(&format!("Extracting from {}", source)));

    let record = pipeline.extract(source).await?;
    let plan = pipeline.plan(record)?;

    println!("{}", formatter.record_preview(&plan.preview())?);
    println!("{}", formatter.sub_event_table(&plan.fresh_events));
    println!("{}", formatter.plan_summary(&plan));

    if plan.outcome == MergeOutcome::AllDuplicate {
        println!("{}", formatter.info("Nothing to save"));
        return Ok(());
    }

    if let Some(editor) = editor {
        let question = format!("Append to {}? (y/n) ", plan.file.display());
        if !confirm(editor, &question)? {
            println!("{}", formatter.info("Discarded, dataset unchanged"));
            return Ok(());
        }
    }

    let report = pipeline.commit(plan)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Saved '{}' to {} ({})",
            report.record.title,
            report.file.display(),
            report.outcome
        ))
    );
    Ok(())
}

/// Ask until the answer is yes or no; Ctrl-C and Ctrl-D count as no.
fn confirm(editor: &mut DefaultEditor, prompt: &str) -> Result<bool> {
    loop {
        match editor.readline(prompt) {
            Ok(line) => {
                if let Some(answer) = parse_answer(&line) {
                    return Ok(answer);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e.into()),
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y"), Some(true));
        assert_eq!(parse_answer(" YES \n"), Some(true));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("No"), Some(false));
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("maybe"), None);
    }
}
