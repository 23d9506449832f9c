//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use gleaner_domain::{EventRecord, MergeOutcome, SubEvent};
use gleaner_extractor::MergePlan;
use gleaner_store::render_record;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// YAML of the record exactly as it would be written.
    pub fn record_preview(&self, record: &EventRecord) -> Result<String> {
        let yaml = render_record(record)?;
        let header = self.colorize(&format!("# {}", record.category.file_name()), "cyan");
        Ok(format!("{}\n{}", header, yaml))
    }

    /// Format sub-events as a table.
    pub fn sub_event_table(&self, events: &[SubEvent]) -> String {
        if events.is_empty() {
            return self.colorize("No sub-events.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Deadline", "Timeline", "Link"]);

        for event in events {
            let deadline = event.deadline.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
            let timeline = event
                .timeline
                .iter()
                .map(|m| format!("{} {}", m.deadline, m.comment).trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n");
            builder.push_record([
                event.id.as_str(),
                or_dash(&event.title),
                deadline.as_str(),
                or_dash(&timeline),
                event.link.as_deref().unwrap_or("-"),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Describe what saving a plan will do.
    pub fn plan_summary(&self, plan: &MergePlan) -> String {
        let target = plan.file.display();
        match plan.outcome {
            MergeOutcome::Appended => {
                self.info(&format!("New record '{}' for {}", plan.record.title, target))
            }
            MergeOutcome::Merged(n) => self.info(&format!(
                "{} new sub-event(s) for existing record '{}' in {}",
                n, plan.record.title, target
            )),
            MergeOutcome::AllDuplicate => self.warning(&format!(
                "'{}' is already in {} with all its sub-events",
                plan.record.title, target
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gleaner_domain::{Category, Dataset, Milestone};
    use std::path::PathBuf;

    fn record() -> EventRecord {
        let mut event = SubEvent::new("pycon-us-2024-cfp")
            .with_title("Talks")
            .with_deadline(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        event.timeline.push(Milestone {
            deadline: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(23, 59, 0).unwrap(),
            comment: "CFP closes".to_string(),
        });

        EventRecord {
            title: "PyCon US 2024".to_string(),
            description: String::new(),
            category: Category::Conference,
            tags: vec!["python".to_string()],
            website: None,
            location: Some("Pittsburgh".to_string()),
            start_date: None,
            end_date: None,
            events: vec![event],
        }
    }

    fn plan(outcome: MergeOutcome) -> MergePlan {
        MergePlan {
            record: record(),
            dataset: Dataset::new(),
            outcome,
            new_events: 0,
            fresh_events: Vec::new(),
            file: PathBuf::from("data/conferences.yml"),
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(false);
        let output = formatter.sub_event_table(&record().events);
        assert!(output.contains("Deadline"));
        assert!(output.contains("pycon-us-2024-cfp"));
        assert!(output.contains("2024-03-01"));
        assert!(output.contains("CFP closes"));
    }

    #[test]
    fn test_empty_sub_events() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.sub_event_table(&[]), "No sub-events.");
    }

    #[test]
    fn test_record_preview_names_the_file() {
        let formatter = Formatter::new(false);
        let output = formatter.record_preview(&record()).unwrap();
        assert!(output.starts_with("# conferences.yml"));
        assert!(output.contains("title: PyCon US 2024"));
    }

    #[test]
    fn test_plan_summary() {
        let formatter = Formatter::new(false);
        assert!(formatter.plan_summary(&plan(MergeOutcome::Appended)).contains("New record"));
        assert!(formatter
            .plan_summary(&plan(MergeOutcome::Merged(2)))
            .contains("2 new sub-event(s)"));
        assert!(formatter
            .plan_summary(&plan(MergeOutcome::AllDuplicate))
            .starts_with("⚠"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("saved"), "✓ saved");
    }
}
