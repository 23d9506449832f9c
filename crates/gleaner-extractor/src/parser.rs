//! Parse LLM output into a candidate record

use crate::error::ExtractorError;
use gleaner_domain::{CandidateMilestone, CandidateRecord, CandidateSubEvent};
use serde_json::{Map, Value};

/// Parse the model's reply into an unvalidated candidate
///
/// Only the shape is checked here: one JSON object with string `title` and
/// `category`. Everything else is carried as text for the validator to judge.
pub fn parse_llm_response(response: &str) -> Result<CandidateRecord, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;
    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected a JSON object".to_string()))?;

    let title = required_string(obj, "title")?;
    let category = required_string(obj, "category")?;

    let events = match obj.get("events") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_sub_event(idx, item))
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(ExtractorError::InvalidFormat("'events' must be an array".to_string()))
        }
    };

    Ok(CandidateRecord {
        title,
        category,
        description: optional_string(obj, "description"),
        tags: string_list(obj.get("tags")),
        website: optional_string(obj, "website"),
        location: optional_string(obj, "location"),
        start_date: optional_string(obj, "start_date"),
        end_date: optional_string(obj, "end_date"),
        events,
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        // Skip the opening fence line, including any language tag
        let after_fence = &trimmed[start + 3..];
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(after_fence.len());
        let body = &after_fence[body_start..];
        let body = match body.rfind("```") {
            Some(end) => &body[..end],
            None => body,
        };
        let body = body.trim();
        if body.is_empty() {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }
        return Ok(body);
    }

    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }
    Ok(trimmed)
}

fn required_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ExtractorError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractorError::MissingField(field))
}

/// Absent and null are absent; scalars other than strings are kept as their JSON text
fn optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
    scalar_text(obj.get(field)?)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn parse_sub_event(idx: usize, value: &Value) -> Result<CandidateSubEvent, ExtractorError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat(format!("events[{}] is not an object", idx)))?;

    let timeline = match obj.get("timeline") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(entry, item)| {
                let milestone = item.as_object().ok_or_else(|| {
                    ExtractorError::InvalidFormat(format!(
                        "events[{}].timeline[{}] is not an object",
                        idx, entry
                    ))
                })?;
                Ok::<_, ExtractorError>(CandidateMilestone {
                    deadline: optional_string(milestone, "deadline"),
                    comment: optional_string(milestone, "comment"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(CandidateSubEvent {
        id: optional_string(obj, "id"),
        title: optional_string(obj, "title"),
        year: optional_string(obj, "year"),
        deadline: optional_string(obj, "deadline"),
        link: optional_string(obj, "link"),
        timeline,
        timezone: optional_string(obj, "timezone"),
        date: optional_string(obj, "date"),
        place: optional_string(obj, "place"),
    })
}
