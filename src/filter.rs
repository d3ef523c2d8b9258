use crate::format::{format_date, format_time};
use crate::models::CatchRecord;

/// Keeps the records whose displayed fields contain `keyword`, ignoring case.
/// An empty keyword keeps everything in its original order.
pub fn filter_records(records: &[CatchRecord], keyword: &str) -> Vec<CatchRecord> {
    let needle = normalize_keyword(keyword);
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}

pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// `needle` must already be normalized.
pub fn matches(record: &CatchRecord, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&format_date(&record.date))
        || hit(&format_time(&record.time))
        || hit(&record.id.to_string())
        || hit(&record.location)
        || hit(&record.species)
        || [record.length_in, record.weight_lbs, record.temperature]
            .into_iter()
            .flatten()
            .any(|value| hit(&value.to_string()))
        || record.bait.as_deref().is_some_and(hit)
}
