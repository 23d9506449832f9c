//! Dedup and merge of an incoming record into a dataset

use gleaner_domain::{merge_tags, Dataset, EventRecord, MergeOutcome};
use tracing::debug;

/// Insert `record` into `dataset`, skipping sub-events whose id is already known
///
/// - No new sub-events: [`MergeOutcome::AllDuplicate`], dataset untouched.
/// - A record with the same normalized title and category exists: its
///   `events` grow by the new sub-events (incoming order) and its tags gain the
///   incoming ones, [`MergeOutcome::Merged`].
/// - Otherwise the record, reduced to its new sub-events, is pushed at the end,
///   [`MergeOutcome::Appended`].
///
/// A record without any sub-events brings nothing new and is a duplicate too.
pub fn upsert(dataset: &mut Dataset, mut record: EventRecord) -> MergeOutcome {
    let incoming = record.events.len();
    let existing = dataset.position_of(&record.title, record.category);

    {
        let known = dataset.known_ids();
        record.events.retain(|e| !known.contains(e.id.as_str()));
    }
    let skipped = incoming - record.events.len();

    debug!(
        "Upsert '{}': {} incoming sub-events, {} already known",
        record.title, incoming, skipped
    );

    if record.events.is_empty() {
        return MergeOutcome::AllDuplicate;
    }

    match existing {
        Some(idx) => {
            let target = &mut dataset.records_mut()[idx];
            let added = record.events.len();
            merge_tags(&mut target.tags, &record.tags);
            target.events.extend(record.events);
            MergeOutcome::Merged(added)
        }
        None => {
            dataset.records_mut().push(record);
            MergeOutcome::Appended
        }
    }
}
