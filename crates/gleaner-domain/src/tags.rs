//! Tag and title normalization

/// Normalize a single tag: trim, fold whitespace runs to one space, lowercase
///
/// Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use gleaner_domain::normalize_tag;
///
/// assert_eq!(normalize_tag("  Open   Source "), Some("open source".to_string()));
/// assert_eq!(normalize_tag("   "), None);
/// ```
pub fn normalize_tag(tag: &str) -> Option<String> {
    let folded = tag.split_whitespace().collect::<Vec<_>>().join(" ");
    if folded.is_empty() {
        None
    } else {
        Some(folded.to_lowercase())
    }
}

/// Normalize a list of tags, dropping empties and keeping first occurrences
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    merge_tags(&mut out, tags);
    out
}

/// Add normalized `incoming` tags to `existing` unless already present
///
/// Existing entries keep their position. Returns how many tags were added.
pub fn merge_tags<I, S>(existing: &mut Vec<String>, incoming: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let before = existing.len();
    for tag in incoming {
        let Some(tag) = normalize_tag(tag.as_ref()) else {
            continue;
        };
        if !existing.iter().any(|t| t.to_lowercase() == tag) {
            existing.push(tag);
        }
    }
    existing.len() - before
}

/// Title key used to recognise the same record across extractions
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_tags_dedups_case_insensitively() {
        let tags = normalize_tags(["Rust", " rust ", "RUST", "Open Source", ""]);
        assert_eq!(tags, vec!["rust", "open source"]);
    }

    #[test]
    fn test_normalize_tags_keeps_first_occurrence_order() {
        let tags = normalize_tags(["b", "a", "B", "c", "A"]);
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_tags_appends_only_new() {
        let mut existing = vec!["python".to_string(), "pycon".to_string()];
        let added = merge_tags(&mut existing, ["PyCon", "community"]);
        assert_eq!(added, 1);
        assert_eq!(existing, vec!["python", "pycon", "community"]);
    }

    #[test]
    fn test_merge_tags_tolerates_hand_edited_case() {
        let mut existing = vec!["Python".to_string()];
        let added = merge_tags(&mut existing, ["python"]);
        assert_eq!(added, 0);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  PyCon   US "), "pycon us");
        assert_eq!(normalize_title("PYCON us"), normalize_title("pycon US"));
    }

    proptest! {
        #[test]
        fn prop_normalize_tags_is_idempotent(
            tags in proptest::collection::vec("[ a-zA-Z]{0,8}", 0..12)
        ) {
            let once = normalize_tags(&tags);
            let twice = normalize_tags(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
