//! Category module - the fixed set of record kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an event record
///
/// Every category owns one dataset file:
/// - Activity: community activities and meetups
/// - Competition: contests, hackathon-style programs, mentorship rounds
/// - Conference: talks-based events with calls for proposals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Community activities
    Activity,

    /// Competitions and contests
    Competition,

    /// Conferences
    Conference,
}

impl Category {
    /// Every category, in dataset-file order
    pub const ALL: [Category; 3] =
        [Category::Activity, Category::Competition, Category::Conference];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Activity => "activity",
            Category::Competition => "competition",
            Category::Conference => "conference",
        }
    }

    /// Parse a category, ignoring surrounding whitespace and case
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::Category;
    ///
    /// assert_eq!(Category::parse(" Conference "), Some(Category::Conference));
    /// assert_eq!(Category::parse("hackathon"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "activity" => Some(Category::Activity),
            "competition" => Some(Category::Competition),
            "conference" => Some(Category::Conference),
            _ => None,
        }
    }

    /// File name of this category's dataset (e.g. `conferences.yml`)
    pub fn file_name(&self) -> String {
        let plural = match self {
            Category::Activity => "activities",
            Category::Competition => "competitions",
            Category::Conference => "conferences",
        };
        format!("{}.yml", plural)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
