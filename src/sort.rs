use crate::models::CatchRecord;
use std::cmp::Ordering;

/// Most recent catch first. Records with the same effective timestamp fall
/// back to the higher id first; undated records go last.
pub fn sort_records(records: &mut [CatchRecord]) {
    records.sort_by(recency);
}

pub fn recency(a: &CatchRecord, b: &CatchRecord) -> Ordering {
    b.effective_timestamp()
        .cmp(&a.effective_timestamp())
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use proptest::prelude::*;

    fn ids(records: &[CatchRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn newest_timestamp_first() {
        let mut rows = vec![
            record(1, "2024-03-05", "06:00", "Bass"),
            record(2, "2024-03-06", "05:00", "Bass"),
            record(3, "2024-03-05", "18:30", "Bass"),
        ];
        sort_records(&mut rows);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn ties_break_on_higher_id() {
        let mut rows = vec![
            record(4, "2024-03-05", "06:00", "Bass"),
            record(9, "2024-03-05", "06:00:00", "Bass"),
            record(6, "2024-03-05", "06:00", "Bass"),
        ];
        sort_records(&mut rows);
        assert_eq!(ids(&rows), vec![9, 6, 4]);
    }

    #[test]
    fn missing_time_is_start_of_day_and_undated_sorts_last() {
        let mut rows = vec![
            record(1, "2024-03-05", "", "Bass"),
            record(2, "", "23:00", "Bass"),
            record(3, "2024-03-05", "00:01", "Bass"),
            record(4, "2024-03-04", "23:59", "Bass"),
        ];
        sort_records(&mut rows);
        assert_eq!(ids(&rows), vec![3, 1, 4, 2]);
    }

    proptest! {
        #[test]
        fn sorting_is_idempotent(
            entries in proptest::collection::vec((1u32..=28, 0u32..24, 0u32..60), 0..40),
        ) {
            let mut rows: Vec<CatchRecord> = entries
                .iter()
                .enumerate()
                .map(|(i, (day, hour, minute))| {
                    record(
                        i as i64,
                        &format!("2024-02-{day:02}"),
                        &format!("{hour:02}:{minute:02}"),
                        "Bass",
                    )
                })
                .collect();
            sort_records(&mut rows);
            let once = rows.clone();
            sort_records(&mut rows);
            prop_assert_eq!(rows, once);
        }
    }
}
