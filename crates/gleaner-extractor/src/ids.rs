//! Deterministic sub-event ids
//!
//! When a model leaves a sub-event without an id, one is derived from the
//! record title, the sub-event's own attributes (title, year, deadline, link,
//! first timeline deadline) and the source. The same inputs always give the
//! same id, so re-extracting a page deduplicates.

use gleaner_domain::{CandidateRecord, CandidateSubEvent};
use sha2::{Digest, Sha256};

const SLUG_MAX_CHARS: usize = 40;
const HASH_CHARS: usize = 12;
const FIELD_SEPARATOR: &str = "\u{1f}";

/// Stable attributes an id is derived from; absent fields are empty strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubEventKey<'a> {
    /// Title of the enclosing record
    pub record_title: &'a str,
    /// Sub-event title
    pub title: &'a str,
    /// Edition year as text
    pub year: &'a str,
    /// Main deadline as text
    pub deadline: &'a str,
    /// Sub-event page
    pub link: &'a str,
    /// Deadline of the first timeline milestone
    pub first_milestone: &'a str,
    /// URL or path the content came from
    pub source: &'a str,
}

impl<'a> SubEventKey<'a> {
    /// Key for a candidate sub-event of `record_title` read from `source`
    pub fn of(record_title: &'a str, event: &'a CandidateSubEvent, source: &'a str) -> Self {
        Self {
            record_title,
            title: event.title.as_deref().unwrap_or_default(),
            year: event.year.as_deref().unwrap_or_default(),
            deadline: event.deadline.as_deref().unwrap_or_default(),
            link: event.link.as_deref().unwrap_or_default(),
            first_milestone: event
                .timeline
                .first()
                .and_then(|m| m.deadline.as_deref())
                .unwrap_or_default(),
            source,
        }
    }
}

/// Derive an id of the form `<slug>-<hash>`
///
/// Just `<hash>` when the record title has no ASCII words.
pub fn derive_sub_event_id(key: &SubEventKey<'_>) -> String {
    let normalized = [
        key.record_title,
        key.title,
        key.year,
        key.deadline,
        key.link,
        key.first_milestone,
        key.source,
    ]
    .iter()
    .map(|field| normalize(field))
    .collect::<Vec<_>>()
    .join(FIELD_SEPARATOR);

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    let hash = &digest[..HASH_CHARS];

    let slug = slugify(key.record_title);
    if slug.is_empty() {
        hash.to_string()
    } else {
        format!("{}-{}", slug, hash)
    }
}

/// Give every sub-event without a usable id a derived one
///
/// Returns how many ids were filled in.
pub fn assign_missing_ids(candidate: &mut CandidateRecord, source: &str) -> usize {
    let derived: Vec<Option<String>> = candidate
        .events
        .iter()
        .map(|event| {
            let missing = event.id.as_deref().is_none_or(|id| id.trim().is_empty());
            missing.then(|| derive_sub_event_id(&SubEventKey::of(&candidate.title, event, source)))
        })
        .collect();

    let mut assigned = 0;
    for (event, id) in candidate.events.iter_mut().zip(derived) {
        if let Some(id) = id {
            event.id = Some(id);
            assigned += 1;
        }
    }
    assigned
}

fn normalize(field: &str) -> String {
    field.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn slugify(title: &str) -> String {
    let lowered = title.to_ascii_lowercase();
    let mut slug = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    slug.truncate(SLUG_MAX_CHARS);
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::CandidateMilestone;

    fn key<'a>(
        record_title: &'a str,
        title: &'a str,
        deadline: &'a str,
        source: &'a str,
    ) -> SubEventKey<'a> {
        SubEventKey {
            record_title,
            title,
            deadline,
            source,
            ..Default::default()
        }
    }

    fn edition(year: &str) -> CandidateSubEvent {
        CandidateSubEvent {
            year: Some(year.to_string()),
            link: Some(format!("https://summer-ospp.ac.cn/{}", year)),
            timeline: vec![CandidateMilestone {
                deadline: Some(format!("{}-06-04T18:00:00", year)),
                comment: Some("applications close".to_string()),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_same_inputs_same_id() {
        let key = key("PyCon US 2024", "CFP", "2024-03-01", "https://pycon.org");
        let a = derive_sub_event_id(&key);
        let b = derive_sub_event_id(&key);
        assert_eq!(a, b);
        assert!(a.starts_with("pycon-us-2024-"));
        assert_eq!(a.len(), "pycon-us-2024-".len() + HASH_CHARS);
    }

    #[test]
    fn test_case_and_whitespace_do_not_matter() {
        let a = derive_sub_event_id(&key("PyCon US 2024", "CFP", "2024-03-01", "src"));
        let b = derive_sub_event_id(&key("  pycon   us 2024 ", "cfp", "2024-03-01", "SRC"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_deadline_different_id() {
        let a = derive_sub_event_id(&key("PyCon", "CFP", "2024-03-01", "src"));
        let b = derive_sub_event_id(&key("PyCon", "CFP", "2024-03-02", "src"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_year_link_and_timeline_feed_the_id() {
        let base = key("Open Source Summer", "", "", "src");
        let id = derive_sub_event_id(&base);

        for changed in [
            SubEventKey { year: "2025", ..base },
            SubEventKey { link: "https://summer-ospp.ac.cn/2025", ..base },
            SubEventKey { first_milestone: "2025-06-04T18:00:00", ..base },
        ] {
            assert_ne!(derive_sub_event_id(&changed), id);
        }
    }

    #[test]
    fn test_fields_do_not_run_together() {
        let a = derive_sub_event_id(&key("ab", "c", "", ""));
        let b = derive_sub_event_id(&key("a", "bc", "", ""));
        assert_ne!(a[a.len() - HASH_CHARS..], b[b.len() - HASH_CHARS..]);
    }

    #[test]
    fn test_non_ascii_title_is_hash_only() {
        let id = derive_sub_event_id(&key("开源之夏", "", "", ""));
        assert_eq!(id.len(), HASH_CHARS);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_slug_is_capped() {
        let slug = slugify("The Extraordinarily Long Annual International Open Source Gathering");
        assert!(slug.len() <= SLUG_MAX_CHARS);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_editions_without_title_or_deadline_get_distinct_ids() {
        let mut candidate = CandidateRecord {
            title: "Open Source Summer".to_string(),
            category: "competition".to_string(),
            events: vec![edition("2024"), edition("2025")],
            ..Default::default()
        };

        assert_eq!(assign_missing_ids(&mut candidate, "https://summer-ospp.ac.cn"), 2);
        let first = candidate.events[0].id.clone().unwrap();
        let second = candidate.events[1].id.clone().unwrap();
        assert!(first.starts_with("open-source-summer-"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_assign_missing_ids_only_fills_gaps() {
        let mut candidate = CandidateRecord {
            title: "RustConf".to_string(),
            category: "conference".to_string(),
            events: vec![
                CandidateSubEvent {
                    id: Some("rustconf-2024".to_string()),
                    ..Default::default()
                },
                CandidateSubEvent {
                    id: Some("  ".to_string()),
                    ..Default::default()
                },
                CandidateSubEvent::default(),
            ],
            ..Default::default()
        };

        assert_eq!(assign_missing_ids(&mut candidate, "src"), 2);
        assert_eq!(candidate.events[0].id.as_deref(), Some("rustconf-2024"));
        let second = candidate.events[1].id.clone().unwrap();
        assert!(second.starts_with("rustconf-"));
        // Identical inputs give identical ids; the validator reports the clash
        assert_eq!(candidate.events[1].id, candidate.events[2].id);
    }
}
