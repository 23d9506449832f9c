//! Candidate validation logic

use crate::{ValidationConfig, ValidationError, ValidationErrorKind};
use chrono::{NaiveDate, NaiveDateTime};
use gleaner_domain::{
    normalize_tags, CandidateMilestone, CandidateRecord, CandidateSubEvent, Category, EventRecord,
    Milestone, SubEvent, DATETIME_FORMAT, DATE_FORMAT,
};
use std::collections::HashSet;

/// The Gatekeeper validates candidates before storage
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a candidate and return the normalized record
    ///
    /// Rules run in a fixed order and the first failure is returned:
    /// category, title, strict-mode fields, record dates, sub-events.
    pub fn validate(&self, candidate: CandidateRecord) -> Result<EventRecord, ValidationError> {
        let category = Category::parse(&candidate.category).ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::InvalidCategory,
                format!(
                    "'{}' is not one of activity, competition, conference",
                    candidate.category
                ),
            )
        })?;

        let title = candidate.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingTitle,
                "title is empty",
            ));
        }

        let description = clean(candidate.description).unwrap_or_default();
        if self.config.require_description && description.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingDescription,
                "description is empty",
            ));
        }

        let tags = normalize_tags(&candidate.tags);
        if self.config.require_tags && tags.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingTags,
                "at least one tag is required",
            ));
        }

        let start_date = parse_date("start_date", candidate.start_date)?;
        let end_date = parse_date("end_date", candidate.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ValidationError::new(
                    ValidationErrorKind::DateOrderViolation,
                    format!("end_date {} precedes start_date {}", end, start),
                ));
            }
        }

        if self.config.require_sub_events && candidate.events.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingSubEvents,
                "at least one sub-event is required",
            ));
        }

        let mut seen = HashSet::new();
        let mut events = Vec::with_capacity(candidate.events.len());
        for (idx, raw) in candidate.events.into_iter().enumerate() {
            let event = validate_sub_event(idx, raw)?;
            if !seen.insert(event.id.clone()) {
                return Err(ValidationError::new(
                    ValidationErrorKind::DuplicateSubEventId,
                    format!("sub-event id '{}' appears more than once", event.id),
                ));
            }
            events.push(event);
        }

        Ok(EventRecord {
            title,
            description,
            category,
            tags,
            website: clean(candidate.website),
            location: clean(candidate.location),
            start_date,
            end_date,
            events,
        })
    }
}

/// Validate one sub-event
fn validate_sub_event(idx: usize, raw: CandidateSubEvent) -> Result<SubEvent, ValidationError> {
    let id = clean(raw.id).ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::MissingSubEventId,
            format!("sub-event {} has no id", idx),
        )
    })?;

    let deadline = parse_date(&format!("events[{}].deadline", idx), raw.deadline)?;

    let year = match clean(raw.year) {
        Some(text) => Some(text.parse::<i32>().map_err(|_| {
            ValidationError::new(
                ValidationErrorKind::InvalidDate,
                format!("events[{}].year '{}' is not a year", idx, text),
            )
        })?),
        None => None,
    };

    let timeline = raw
        .timeline
        .into_iter()
        .enumerate()
        .map(|(m, milestone)| validate_milestone(idx, m, milestone))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubEvent {
        id,
        title: clean(raw.title).unwrap_or_default(),
        year,
        deadline,
        link: clean(raw.link),
        timeline,
        timezone: clean(raw.timezone),
        date: clean(raw.date),
        place: clean(raw.place),
    })
}

fn validate_milestone(
    event_idx: usize,
    idx: usize,
    raw: CandidateMilestone,
) -> Result<Milestone, ValidationError> {
    let field = format!("events[{}].timeline[{}].deadline", event_idx, idx);
    let text = clean(raw.deadline).ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::InvalidDate, format!("{} is missing", field))
    })?;
    let deadline = NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::InvalidDate,
            format!("{} '{}' is not YYYY-MM-DDTHH:MM:SS", field, text),
        )
    })?;

    Ok(Milestone {
        deadline,
        comment: clean(raw.comment).unwrap_or_default(),
    })
}

/// Parse an optional `YYYY-MM-DD` date; blank counts as absent
fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(text) = clean(value) else {
        return Ok(None);
    };
    // parse_from_str accepts unpadded fields, so the shape is checked first
    let well_formed = text.len() == 10
        && text
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    let parsed = if well_formed {
        NaiveDate::parse_from_str(&text, DATE_FORMAT).ok()
    } else {
        None
    };
    parsed.map(Some).ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::InvalidDate,
            format!("{} '{}' is not a valid YYYY-MM-DD date", field, text),
        )
    })
}

/// Trim, mapping blank strings to `None`
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
