//! Record module - validated event records and their sub-events

use crate::category::Category;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Textual format of calendar dates (`start_date`, `end_date`, `deadline`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Textual format of timeline milestones
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A validated conference, competition or activity
///
/// Records are only built by the validator (or loaded from a dataset file that
/// the validator previously wrote), so field contents are already normalized:
/// strings trimmed, tags lowercase and unique, dates parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Human-readable name
    pub title: String,

    /// One-line description, may be empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Record kind, selects the dataset file
    pub category: Category,

    /// Lowercase tags, unique, in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Official website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Venue or "online"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// First day of the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Last day of the event, never before `start_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Rounds, tracks or deadlines of this record
    #[serde(default)]
    pub events: Vec<SubEvent>,
}

/// A dated round, track or deadline nested under an [`EventRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubEvent {
    /// Dedup key, unique across the whole dataset of a category
    pub id: String,

    /// Short label for the round or track
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Edition year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Main deadline of this sub-event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// Page for this specific sub-event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Key moments (registration close, start, end)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<Milestone>,

    /// IANA timezone the timeline is expressed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Human-readable date span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Venue of this sub-event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// A point on a sub-event's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Local date and time of the milestone
    pub deadline: NaiveDateTime,

    /// What happens at this point
    #[serde(default)]
    pub comment: String,
}

impl EventRecord {
    /// Ids of all sub-events, in order
    pub fn event_ids(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.id.as_str())
    }
}

impl SubEvent {
    /// Create a sub-event carrying only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            year: None,
            deadline: None,
            link: None,
            timeline: Vec::new(),
            timezone: None,
            date: None,
            place: None,
        }
    }

    /// Set the deadline
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
