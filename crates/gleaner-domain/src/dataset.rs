//! Dataset module - all records of one category

use crate::category::Category;
use crate::record::EventRecord;
use crate::tags::normalize_title;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered collection of records, persisted as one YAML sequence
///
/// Invariant: sub-event ids are unique across all records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<EventRecord>,
}

/// What an upsert did to a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Every incoming sub-event was already known; nothing changed
    AllDuplicate,

    /// New sub-events were appended to an existing record
    Merged(usize),

    /// The record was added at the end of the dataset
    Appended,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from records
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// All records, in file order
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Mutable access for merging
    pub fn records_mut(&mut self) -> &mut Vec<EventRecord> {
        &mut self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every sub-event id present in the dataset
    pub fn known_ids(&self) -> HashSet<&str> {
        self.records.iter().flat_map(|r| r.event_ids()).collect()
    }

    /// Position of the record with the same normalized title and category
    pub fn position_of(&self, title: &str, category: Category) -> Option<usize> {
        let key = normalize_title(title);
        self.records
            .iter()
            .position(|r| r.category == category && normalize_title(&r.title) == key)
    }
}

impl MergeOutcome {
    /// Stable snake_case name for machine-readable output
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeOutcome::AllDuplicate => "all_duplicate",
            MergeOutcome::Merged(_) => "merged",
            MergeOutcome::Appended => "appended",
        }
    }

    /// Whether the dataset changed
    pub fn is_change(&self) -> bool {
        !matches!(self, MergeOutcome::AllDuplicate)
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::AllDuplicate => write!(f, "all sub-events already present"),
            MergeOutcome::Merged(n) => {
                write!(f, "merged {} new sub-event(s) into existing record", n)
            }
            MergeOutcome::Appended => write!(f, "appended as a new record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SubEvent;

    fn record(title: &str, category: Category, ids: &[&str]) -> EventRecord {
        EventRecord {
            title: title.to_string(),
            description: String::new(),
            category,
            tags: vec![],
            website: None,
            location: None,
            start_date: None,
            end_date: None,
            events: ids.iter().map(|id| SubEvent::new(*id)).collect(),
        }
    }

    #[test]
    fn test_known_ids_spans_all_records() {
        let dataset = Dataset::from_records(vec![
            record("A", Category::Conference, &["a1", "a2"]),
            record("B", Category::Conference, &["b1"]),
        ]);
        let ids = dataset.known_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("a2"));
        assert!(ids.contains("b1"));
    }

    #[test]
    fn test_position_of_matches_normalized_title() {
        let dataset = Dataset::from_records(vec![
            record("RustConf", Category::Conference, &[]),
            record("PyCon", Category::Conference, &[]),
        ]);
        assert_eq!(dataset.position_of("  pycon ", Category::Conference), Some(1));
        assert_eq!(dataset.position_of("PyCon", Category::Competition), None);
        assert_eq!(dataset.position_of("GopherCon", Category::Conference), None);
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(MergeOutcome::AllDuplicate.as_str(), "all_duplicate");
        assert_eq!(MergeOutcome::Merged(2).as_str(), "merged");
        assert_eq!(MergeOutcome::Appended.as_str(), "appended");
        assert!(!MergeOutcome::AllDuplicate.is_change());
        assert!(MergeOutcome::Merged(1).is_change());
    }
}
