//! Candidate module - the untrusted record shape produced by a model
//!
//! A candidate keeps every value as raw text: categories are unchecked, dates
//! unparsed, sub-event ids optional. The validator is the only way to turn a
//! candidate into an [`EventRecord`].

use crate::record::{EventRecord, Milestone, SubEvent, DATETIME_FORMAT, DATE_FORMAT};
use serde::{Deserialize, Serialize};

/// Raw record as extracted from model output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Record title, may still be blank
    pub title: String,

    /// Category as written by the model
    pub category: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Tags, not yet normalized
    #[serde(default)]
    pub tags: Vec<String>,

    /// Website URL
    #[serde(default)]
    pub website: Option<String>,

    /// Location
    #[serde(default)]
    pub location: Option<String>,

    /// Start date text
    #[serde(default)]
    pub start_date: Option<String>,

    /// End date text
    #[serde(default)]
    pub end_date: Option<String>,

    /// Sub-events
    #[serde(default)]
    pub events: Vec<CandidateSubEvent>,
}

/// Raw sub-event as extracted from model output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSubEvent {
    /// Id, absent when the model did not supply one
    #[serde(default)]
    pub id: Option<String>,

    /// Title
    #[serde(default)]
    pub title: Option<String>,

    /// Edition year text
    #[serde(default)]
    pub year: Option<String>,

    /// Deadline text
    #[serde(default)]
    pub deadline: Option<String>,

    /// Link
    #[serde(default)]
    pub link: Option<String>,

    /// Timeline entries
    #[serde(default)]
    pub timeline: Vec<CandidateMilestone>,

    /// Timezone
    #[serde(default)]
    pub timezone: Option<String>,

    /// Human-readable date span
    #[serde(default)]
    pub date: Option<String>,

    /// Venue
    #[serde(default)]
    pub place: Option<String>,
}

/// Raw timeline entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMilestone {
    /// Date-time text
    #[serde(default)]
    pub deadline: Option<String>,

    /// Comment
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<EventRecord> for CandidateRecord {
    fn from(record: EventRecord) -> Self {
        Self {
            title: record.title,
            category: record.category.as_str().to_string(),
            description: Some(record.description).filter(|d| !d.is_empty()),
            tags: record.tags,
            website: record.website,
            location: record.location,
            start_date: record.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            end_date: record.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            events: record.events.into_iter().map(CandidateSubEvent::from).collect(),
        }
    }
}

impl From<SubEvent> for CandidateSubEvent {
    fn from(event: SubEvent) -> Self {
        Self {
            id: Some(event.id),
            title: Some(event.title).filter(|t| !t.is_empty()),
            year: event.year.map(|y| y.to_string()),
            deadline: event.deadline.map(|d| d.format(DATE_FORMAT).to_string()),
            link: event.link,
            timeline: event.timeline.into_iter().map(CandidateMilestone::from).collect(),
            timezone: event.timezone,
            date: event.date,
            place: event.place,
        }
    }
}

impl From<Milestone> for CandidateMilestone {
    fn from(milestone: Milestone) -> Self {
        Self {
            deadline: Some(milestone.deadline.format(DATETIME_FORMAT).to_string()),
            comment: Some(milestone.comment).filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_from_record_formats_dates() {
        let record = EventRecord {
            title: "PyCon".to_string(),
            description: String::new(),
            category: Category::Conference,
            tags: vec!["python".to_string()],
            website: None,
            location: None,
            start_date: NaiveDate::from_ymd_opt(2024, 5, 15),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 23),
            events: vec![SubEvent::new("t1")],
        };

        let candidate = CandidateRecord::from(record);
        assert_eq!(candidate.category, "conference");
        assert_eq!(candidate.start_date.as_deref(), Some("2024-05-15"));
        assert_eq!(candidate.end_date.as_deref(), Some("2024-05-23"));
        assert_eq!(candidate.description, None);
        assert_eq!(candidate.events[0].id.as_deref(), Some("t1"));
        assert_eq!(candidate.events[0].title, None);
    }
}
